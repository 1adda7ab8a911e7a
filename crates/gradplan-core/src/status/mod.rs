//! Semester status timeline transitions.
//!
//! A student's semesters form an ordered timeline where every semester is
//! `previous`, `present`, or `future`. The canonical shape is a run of
//! previous semesters, at most one present semester, then a run of future
//! semesters. [`apply_status_change`] is a pure transform: it takes the
//! full semester list and a requested change and returns the full
//! recomputed list. Callers must persist every changed semester, not just
//! the one the change targeted.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::model::{SemesterStatus, StudentSemester};

/// Errors from a status transition request.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("unknown semester: {0}")]
    UnknownSemester(Uuid),
}

/// Result of a status transition: the full recomputed timeline plus the ids
/// of semesters whose status actually changed.
#[derive(Debug, Clone)]
pub struct TimelineUpdate {
    pub semesters: Vec<StudentSemester>,
    pub changed: Vec<Uuid>,
}

/// Apply a requested status change to one semester and recompute the whole
/// timeline.
///
/// Transition rules, for a target at timeline position `k`:
///
/// * request `present`: positions before `k` become previous, `k` becomes
///   present, positions after become future.
/// * request `previous`: positions up to and including `k` become previous,
///   the rest future.
/// * request `future`: when every semester is still future (nothing
///   activated yet) this is treated as a `present` request; otherwise
///   positions before `k` become previous and `k` onward stay future.
///
/// After the rule runs, if no semester is present the earliest future
/// semester is promoted to present. A timeline whose semesters are all
/// previous has no future to promote and stays without a present semester.
pub fn apply_status_change(
    semesters: &[StudentSemester],
    target: Uuid,
    requested: SemesterStatus,
) -> Result<TimelineUpdate, StatusError> {
    let mut next: Vec<StudentSemester> = semesters.to_vec();
    next.sort_by_key(|s| s.number);

    let k = next
        .iter()
        .position(|s| s.id == target)
        .ok_or(StatusError::UnknownSemester(target))?;

    let bootstrap = next.iter().all(|s| s.status == SemesterStatus::Future);
    let effective = match requested {
        SemesterStatus::Future if bootstrap => SemesterStatus::Present,
        other => other,
    };

    for (i, semester) in next.iter_mut().enumerate() {
        semester.status = match effective {
            SemesterStatus::Present => match i.cmp(&k) {
                std::cmp::Ordering::Less => SemesterStatus::Previous,
                std::cmp::Ordering::Equal => SemesterStatus::Present,
                std::cmp::Ordering::Greater => SemesterStatus::Future,
            },
            SemesterStatus::Previous => {
                if i <= k {
                    SemesterStatus::Previous
                } else {
                    SemesterStatus::Future
                }
            }
            SemesterStatus::Future => {
                if i < k {
                    SemesterStatus::Previous
                } else {
                    SemesterStatus::Future
                }
            }
        };
    }

    // Restore the single-present shape when a future semester exists.
    if !next.iter().any(|s| s.status == SemesterStatus::Present) {
        if let Some(first_future) = next
            .iter_mut()
            .find(|s| s.status == SemesterStatus::Future)
        {
            first_future.status = SemesterStatus::Present;
        }
    }

    debug_assert!(is_canonical(&next));

    let changed: Vec<Uuid> = next
        .iter()
        .filter(|after| {
            semesters
                .iter()
                .any(|before| before.id == after.id && before.status != after.status)
        })
        .map(|s| s.id)
        .collect();

    debug!(
        target = %target,
        requested = %requested,
        changed = changed.len(),
        "applied status transition"
    );

    Ok(TimelineUpdate {
        semesters: next,
        changed,
    })
}

/// Whether an ordered timeline has the canonical shape: statuses never move
/// backwards from previous through present to future, with at most one
/// present semester.
pub fn is_canonical(semesters: &[StudentSemester]) -> bool {
    let mut present_count = 0usize;
    let mut max_rank = 0u8;
    for semester in semesters {
        let rank = match semester.status {
            SemesterStatus::Previous => 0,
            SemesterStatus::Present => 1,
            SemesterStatus::Future => 2,
        };
        if rank < max_rank {
            return false;
        }
        max_rank = rank;
        if semester.status == SemesterStatus::Present {
            present_count += 1;
        }
    }
    present_count <= 1
}
