//! Course registration and per-course edits on a plan snapshot.
//!
//! Registration checks run in a fixed order: duplicate enrollment, then
//! credit load, then prerequisites. The first rejection wins and nothing
//! is written. Dropping keeps the course row as history; removal deletes
//! it outright.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::credits::{self, CreditOverload};
use crate::model::{
    CourseAttribute, EnrollmentStatus, Grade, PlanSnapshot, SemesterStatus, StudentCourse,
};
use crate::prereq::{self, MissingPrerequisite, PrereqCheck, PrereqError};

/// Rejections and failures for registrar operations.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("unknown semester: {0}")]
    UnknownSemester(Uuid),
    #[error("course not in catalog: {0}")]
    UnknownCatalogCourse(String),
    #[error("unknown course: {0}")]
    UnknownCourse(Uuid),
    #[error("already enrolled in {0}")]
    AlreadyEnrolled(String),
    #[error(transparent)]
    Overload(#[from] CreditOverload),
    #[error("missing prerequisites: {}", format_missing(.0))]
    MissingPrerequisites(Vec<MissingPrerequisite>),
    #[error("grades in {semester} are locked until the semester is previous")]
    GradeLocked { semester: String },
}

fn format_missing(missing: &[MissingPrerequisite]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Register a catalog course into a semester, appending it to the
/// semester's ordering. Returns the new course row's id.
pub fn register_course(
    snapshot: &mut PlanSnapshot,
    catalog: &Catalog,
    semester_id: Uuid,
    course_label: &str,
) -> Result<Uuid, RegistrarError> {
    let semester = snapshot
        .semester(semester_id)
        .ok_or(RegistrarError::UnknownSemester(semester_id))?;
    let student_id = semester.student_id;
    let course = catalog
        .course(course_label)
        .ok_or_else(|| RegistrarError::UnknownCatalogCourse(course_label.to_owned()))?;
    let label = course.label();

    if snapshot.claimed_codes().contains(label.as_str()) {
        return Err(RegistrarError::AlreadyEnrolled(label));
    }

    credits::check_addition(snapshot.credit_load(semester_id), course.credits)?;

    match prereq::check_prerequisites(catalog, snapshot, course_label) {
        Ok(PrereqCheck::Satisfied) => {}
        Ok(PrereqCheck::Missing(missing)) => {
            return Err(RegistrarError::MissingPrerequisites(missing));
        }
        Err(PrereqError::UnknownCourse(c)) => {
            return Err(RegistrarError::UnknownCatalogCourse(c));
        }
    }

    let row = StudentCourse {
        id: Uuid::new_v4(),
        student_id,
        semester_id,
        code: label.clone(),
        title: course.title.clone(),
        credits: course.credits,
        attribute: course.attribute,
        grade: None,
        enrollment: EnrollmentStatus::Enrolled,
        position: snapshot.next_position(semester_id),
        created_at: Utc::now(),
    };
    let id = row.id;
    snapshot.courses.push(row);

    info!(course = %label, semester = %semester_id, "registered course");
    Ok(id)
}

/// Mark a course dropped, keeping its row in the plan. Dropping an
/// already-dropped course changes nothing.
pub fn drop_course(snapshot: &mut PlanSnapshot, course_id: Uuid) -> Result<(), RegistrarError> {
    let course = snapshot
        .courses
        .iter_mut()
        .find(|c| c.id == course_id)
        .ok_or(RegistrarError::UnknownCourse(course_id))?;
    course.enrollment = EnrollmentStatus::Dropped;
    debug!(course = %course_id, "dropped course");
    Ok(())
}

/// Delete a course row from the plan. Returns the removed row.
pub fn remove_course(
    snapshot: &mut PlanSnapshot,
    course_id: Uuid,
) -> Result<StudentCourse, RegistrarError> {
    let index = snapshot
        .courses
        .iter()
        .position(|c| c.id == course_id)
        .ok_or(RegistrarError::UnknownCourse(course_id))?;
    let removed = snapshot.courses.remove(index);
    info!(course = %removed.code, "removed course");
    Ok(removed)
}

/// Set or clear a course's grade. Grades unlock only once the owning
/// semester is previous.
pub fn set_grade(
    snapshot: &mut PlanSnapshot,
    course_id: Uuid,
    grade: Option<Grade>,
) -> Result<(), RegistrarError> {
    let semester_id = snapshot
        .course(course_id)
        .ok_or(RegistrarError::UnknownCourse(course_id))?
        .semester_id;
    let semester = snapshot
        .semester(semester_id)
        .ok_or(RegistrarError::UnknownSemester(semester_id))?;
    if semester.status != SemesterStatus::Previous {
        return Err(RegistrarError::GradeLocked {
            semester: semester.name.clone(),
        });
    }
    if let Some(course) = snapshot.courses.iter_mut().find(|c| c.id == course_id) {
        course.grade = grade;
    }
    debug!(course = %course_id, ?grade, "set grade");
    Ok(())
}

/// Retag a course's requirement attribute. Not gated by semester status.
pub fn set_attribute(
    snapshot: &mut PlanSnapshot,
    course_id: Uuid,
    attribute: CourseAttribute,
) -> Result<(), RegistrarError> {
    let course = snapshot
        .courses
        .iter_mut()
        .find(|c| c.id == course_id)
        .ok_or(RegistrarError::UnknownCourse(course_id))?;
    course.attribute = attribute;
    debug!(course = %course_id, %attribute, "set attribute");
    Ok(())
}
