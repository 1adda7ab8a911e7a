//! Prerequisite validation.
//!
//! Checks are one level deep and conjunctive: every prerequisite listed for
//! the candidate course must be claimed, and nothing is checked beyond that
//! (no transitive closure, no grade threshold on the prerequisite). A course
//! is claimed by any non-dropped enrollment anywhere in the plan, current or
//! planned, graded or not.

use std::fmt;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::PlanSnapshot;

/// Errors from a prerequisite check request.
#[derive(Debug, Error)]
pub enum PrereqError {
    #[error("unknown course: {0}")]
    UnknownCourse(String),
}

/// A prerequisite the student has not claimed, labeled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPrerequisite {
    pub code: String,
    pub title: String,
}

impl fmt::Display for MissingPrerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.title)
    }
}

/// Outcome of a prerequisite check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrereqCheck {
    Satisfied,
    Missing(Vec<MissingPrerequisite>),
}

impl PrereqCheck {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PrereqCheck::Satisfied)
    }
}

/// Check whether the plan claims every prerequisite of `course_label`.
pub fn check_prerequisites(
    catalog: &Catalog,
    snapshot: &PlanSnapshot,
    course_label: &str,
) -> Result<PrereqCheck, PrereqError> {
    let course = catalog
        .course(course_label)
        .ok_or_else(|| PrereqError::UnknownCourse(course_label.to_owned()))?;

    if course.prerequisites.is_empty() {
        return Ok(PrereqCheck::Satisfied);
    }

    let claimed = snapshot.claimed_codes();
    let missing: Vec<MissingPrerequisite> = course
        .prerequisites
        .iter()
        .filter(|prereq| !claimed.contains(prereq.as_str()))
        .map(|prereq| MissingPrerequisite {
            code: prereq.clone(),
            title: catalog
                .course(prereq)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| prereq.clone()),
        })
        .collect();

    if missing.is_empty() {
        Ok(PrereqCheck::Satisfied)
    } else {
        Ok(PrereqCheck::Missing(missing))
    }
}
