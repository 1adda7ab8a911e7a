//! Fixture builders shared by the unit tests.

use chrono::Utc;
use uuid::Uuid;

use crate::model::{
    CourseAttribute, EnrollmentStatus, Grade, SemesterStatus, StudentCourse, StudentSemester,
};

/// A future semester with a placeholder name.
pub(crate) fn semester(student_id: Uuid, number: u32) -> StudentSemester {
    semester_with_status(student_id, number, SemesterStatus::Future)
}

pub(crate) fn semester_with_status(
    student_id: Uuid,
    number: u32,
    status: SemesterStatus,
) -> StudentSemester {
    StudentSemester {
        id: Uuid::new_v4(),
        student_id,
        number,
        name: format!("Semester {number}"),
        status,
        created_at: Utc::now(),
    }
}

/// An enrolled, ungraded major course.
pub(crate) fn course(
    student_id: Uuid,
    semester_id: Uuid,
    code: &str,
    credits: u32,
) -> StudentCourse {
    StudentCourse {
        id: Uuid::new_v4(),
        student_id,
        semester_id,
        code: code.to_owned(),
        title: format!("{code} title"),
        credits,
        attribute: CourseAttribute::MajorCourse,
        grade: None,
        enrollment: EnrollmentStatus::Enrolled,
        position: 0,
        created_at: Utc::now(),
    }
}

/// An enrolled course with a final grade.
pub(crate) fn graded_course(
    student_id: Uuid,
    semester_id: Uuid,
    code: &str,
    credits: u32,
    grade: Grade,
) -> StudentCourse {
    let mut c = course(student_id, semester_id, code, credits);
    c.grade = Some(grade);
    c
}
