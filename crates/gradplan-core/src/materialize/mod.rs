//! Plan materialization: create a student's semesters and courses from a
//! catalog template through the storage seam.
//!
//! Materialization is idempotent. Semesters are matched by timeline number
//! and never re-created; a semester that already holds any course rows does
//! not get template courses copied again. An interrupted run therefore
//! completes by invoking [`materialize_plan`] again with the same inputs.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::model::{
    AcademicYear, EnrollmentStatus, SemesterStatus, StudentCourse, StudentSemester, Term,
};
use crate::timeline;

pub mod store;

pub use store::{MemoryStore, PlanStore, StoreError};

/// Errors that can occur during materialization.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The backend failed before anything was written. Nothing changed.
    #[error("failed to read existing plan state: {0}")]
    Load(StoreError),

    /// The backend failed mid-run. Everything created before the failure is
    /// persisted; re-invoking with the same inputs completes the remainder.
    #[error(
        "plan materialization interrupted after creating {semesters} semesters and {courses} courses: {source}"
    )]
    Interrupted {
        semesters: usize,
        courses: usize,
        source: StoreError,
    },
}

/// Counts of records created by one materialization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOutcome {
    pub created_semesters: usize,
    pub created_courses: usize,
}

/// Materialize a student's plan from the catalog template.
///
/// On the first run (no semesters exist yet) the timeline is bootstrapped:
/// the first semester becomes `present` and the rest `future`. Semester
/// names come from [`timeline::semester_names`] applied to the starting
/// term and year.
pub fn materialize_plan(
    store: &mut dyn PlanStore,
    catalog: &Catalog,
    student_id: Uuid,
    start_term: Term,
    start_year: AcademicYear,
) -> Result<MaterializeOutcome, MaterializeError> {
    let template = catalog.template();
    let names = timeline::semester_names(start_term, start_year, template.len());

    let existing = store
        .semesters_for(student_id)
        .map_err(|e| store_failure(0, 0, e))?;
    let bootstrap = existing.is_empty();

    let mut by_number: HashMap<u32, StudentSemester> =
        existing.into_iter().map(|s| (s.number, s)).collect();

    let mut created_semesters = 0usize;
    let mut created_courses = 0usize;

    // Create the missing semester rows in one batch.
    let mut new_semesters = Vec::new();
    for (i, template_semester) in template.iter().enumerate() {
        if by_number.contains_key(&template_semester.number) {
            continue;
        }
        let status = if bootstrap && i == 0 {
            SemesterStatus::Present
        } else {
            SemesterStatus::Future
        };
        new_semesters.push(StudentSemester {
            id: Uuid::new_v4(),
            student_id,
            number: template_semester.number,
            name: names[i].clone(),
            status,
            created_at: Utc::now(),
        });
    }
    if !new_semesters.is_empty() {
        store
            .insert_semesters(&new_semesters)
            .map_err(|e| store_failure(created_semesters, created_courses, e))?;
        created_semesters = new_semesters.len();
        for row in new_semesters {
            by_number.insert(row.number, row);
        }
    }

    // Copy template courses into each semester that has none yet.
    for template_semester in template {
        let semester = &by_number[&template_semester.number];
        let existing_courses = store
            .courses_in(semester.id)
            .map_err(|e| store_failure(created_semesters, created_courses, e))?;
        if !existing_courses.is_empty() {
            continue;
        }

        let rows: Vec<StudentCourse> = template_semester
            .slots
            .iter()
            .enumerate()
            .map(|(position, slot)| StudentCourse {
                id: Uuid::new_v4(),
                student_id,
                semester_id: semester.id,
                code: slot.course.clone(),
                title: slot.title.clone(),
                credits: slot.credits,
                attribute: slot.attribute,
                grade: None,
                enrollment: EnrollmentStatus::Enrolled,
                position: position as u32,
                created_at: Utc::now(),
            })
            .collect();
        if rows.is_empty() {
            continue;
        }

        store
            .insert_courses(&rows)
            .map_err(|e| store_failure(created_semesters, created_courses, e))?;
        created_courses += rows.len();
    }

    info!(
        student = %student_id,
        semesters = created_semesters,
        courses = created_courses,
        "materialized plan"
    );

    Ok(MaterializeOutcome {
        created_semesters,
        created_courses,
    })
}

/// Classify a store failure: nothing written yet means a plain load error,
/// anything else is an interrupted run the caller can resume.
fn store_failure(semesters: usize, courses: usize, source: StoreError) -> MaterializeError {
    if semesters == 0 && courses == 0 {
        return MaterializeError::Load(source);
    }
    warn!(
        semesters,
        courses,
        error = %source,
        "plan materialization interrupted"
    );
    MaterializeError::Interrupted {
        semesters,
        courses,
        source,
    }
}
