//! Semester timeline generation.
//!
//! Given a starting term and academic year, produces display names for a run
//! of semesters following the fixed Fall, Spring, Summer rotation. The
//! academic year pair advances every time the rotation wraps past Summer.

use crate::model::{AcademicYear, Term};

/// Term rotation within one academic year.
pub const TERM_ROTATION: [Term; 3] = [Term::Fall, Term::Spring, Term::Summer];

/// Position of a term in the rotation.
fn rotation_position(term: Term) -> usize {
    match term {
        Term::Fall => 0,
        Term::Spring => 1,
        Term::Summer => 2,
    }
}

/// Generate `count` semester names starting at the given term and year.
///
/// Slot `i` uses rotation index `(start + i) % 3` and shifts the year pair
/// by `(start + i) / 3`, so a plan starting in Spring reaches the next
/// academic year after its first Summer.
pub fn semester_names(start_term: Term, start_year: AcademicYear, count: usize) -> Vec<String> {
    let start = rotation_position(start_term);
    (0..count)
        .map(|i| {
            let order = start + i;
            let term = TERM_ROTATION[order % 3];
            let year = start_year.offset((order / 3) as i32);
            format!("{term} {year}")
        })
        .collect()
}
