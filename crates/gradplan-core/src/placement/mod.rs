//! Moving a course between semesters.
//!
//! A move reassigns the course's owning semester and appends it at the end
//! of the target's ordering. Every check runs before anything is written,
//! so a rejected move leaves the snapshot exactly as it was.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::credits::{self, CreditOverload};
use crate::model::PlanSnapshot;

/// Rejections and failures for a course move.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("unknown course: {0}")]
    UnknownCourse(Uuid),
    #[error("unknown semester: {0}")]
    UnknownSemester(Uuid),
    #[error("course is already in that semester")]
    SameSemester,
    #[error(transparent)]
    Overload(#[from] CreditOverload),
}

/// Where a completed move left the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Uuid,
    pub to: Uuid,
    pub position: u32,
}

/// Move a course into another semester, guarding the target's credit load.
///
/// Moving out of a semester is never blocked, however light it leaves the
/// source. Dropped courses carry no load, so they move freely even into a
/// full semester.
pub fn move_course(
    snapshot: &mut PlanSnapshot,
    course_id: Uuid,
    to_semester: Uuid,
) -> Result<MoveOutcome, MoveError> {
    let course = snapshot
        .course(course_id)
        .ok_or(MoveError::UnknownCourse(course_id))?;
    if snapshot.semester(to_semester).is_none() {
        return Err(MoveError::UnknownSemester(to_semester));
    }
    let from = course.semester_id;
    if from == to_semester {
        return Err(MoveError::SameSemester);
    }

    let candidate = if course.is_enrolled() {
        course.credits
    } else {
        0
    };
    credits::check_addition(snapshot.credit_load(to_semester), candidate)?;

    let position = snapshot.next_position(to_semester);
    if let Some(course) = snapshot.courses.iter_mut().find(|c| c.id == course_id) {
        course.semester_id = to_semester;
        course.position = position;
    }

    debug!(course = %course_id, %from, to = %to_semester, position, "moved course");

    Ok(MoveOutcome {
        from,
        to: to_semester,
        position,
    })
}
