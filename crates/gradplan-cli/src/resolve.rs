//! Resolution of user-facing names to plan rows.
//!
//! Commands take course labels ("CMPS 200") and semester numbers; these
//! helpers map them onto snapshot rows and produce useful errors when a name
//! is unknown or ambiguous.

use anyhow::{Context, Result, bail};
use uuid::Uuid;

use gradplan_core::model::{PlanSnapshot, StudentCourse, StudentSemester};

/// Find the plan row for a course label, case-insensitively.
///
/// A code can appear more than once when a dropped attempt sits next to a
/// re-registered one; the enrolled row wins in that case.
pub fn find_course<'a>(snapshot: &'a PlanSnapshot, label: &str) -> Result<&'a StudentCourse> {
    let matches: Vec<&StudentCourse> = snapshot
        .courses
        .iter()
        .filter(|c| c.code.eq_ignore_ascii_case(label))
        .collect();

    match matches.len() {
        0 => bail!("no course {label:?} on the plan"),
        1 => Ok(matches[0]),
        _ => {
            let enrolled: Vec<&StudentCourse> = matches
                .iter()
                .copied()
                .filter(|c| c.is_enrolled())
                .collect();
            if enrolled.len() == 1 {
                return Ok(enrolled[0]);
            }
            let locations: Vec<String> = matches
                .iter()
                .map(|c| semester_name(snapshot, c.semester_id))
                .collect();
            bail!(
                "course {label:?} appears {} times on the plan (in {}); remove the extras first",
                matches.len(),
                locations.join(", ")
            );
        }
    }
}

/// Find a semester by its 1-based timeline number.
pub fn find_semester(snapshot: &PlanSnapshot, number: u32) -> Result<&StudentSemester> {
    snapshot.semester_by_number(number).with_context(|| {
        format!(
            "no semester {number} on the plan (timeline has {})",
            snapshot.semesters.len()
        )
    })
}

fn semester_name(snapshot: &PlanSnapshot, semester_id: Uuid) -> String {
    snapshot
        .semester(semester_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| semester_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use gradplan_core::model::{CourseAttribute, EnrollmentStatus, SemesterStatus};

    fn semester(student_id: Uuid, number: u32, name: &str) -> StudentSemester {
        StudentSemester {
            id: Uuid::new_v4(),
            student_id,
            number,
            name: name.to_string(),
            status: SemesterStatus::Future,
            created_at: Utc::now(),
        }
    }

    fn course(
        student_id: Uuid,
        semester_id: Uuid,
        code: &str,
        enrollment: EnrollmentStatus,
    ) -> StudentCourse {
        StudentCourse {
            id: Uuid::new_v4(),
            student_id,
            semester_id,
            code: code.to_string(),
            title: code.to_string(),
            credits: 3,
            attribute: CourseAttribute::MajorCourse,
            grade: None,
            enrollment,
            position: 0,
            created_at: Utc::now(),
        }
    }

    fn sample_plan() -> PlanSnapshot {
        let student = Uuid::new_v4();
        let s1 = semester(student, 1, "Fall 2026-2027");
        let s2 = semester(student, 2, "Spring 2026-2027");
        let courses = vec![
            course(student, s1.id, "CMPS 200", EnrollmentStatus::Dropped),
            course(student, s2.id, "CMPS 200", EnrollmentStatus::Enrolled),
            course(student, s2.id, "MATH 201", EnrollmentStatus::Enrolled),
        ];
        PlanSnapshot {
            semesters: vec![s1, s2],
            courses,
        }
    }

    #[test]
    fn finds_course_by_code() {
        let snapshot = sample_plan();
        let found = find_course(&snapshot, "MATH 201").unwrap();
        assert_eq!(found.code, "MATH 201");
    }

    #[test]
    fn course_lookup_is_case_insensitive() {
        let snapshot = sample_plan();
        let found = find_course(&snapshot, "math 201").unwrap();
        assert_eq!(found.code, "MATH 201");
    }

    #[test]
    fn duplicate_code_prefers_the_enrolled_row() {
        let snapshot = sample_plan();
        let found = find_course(&snapshot, "CMPS 200").unwrap();
        assert!(found.is_enrolled());
    }

    #[test]
    fn unknown_course_is_an_error() {
        let snapshot = sample_plan();
        let err = find_course(&snapshot, "PHYS 210").unwrap_err();
        assert!(err.to_string().contains("PHYS 210"));
    }

    #[test]
    fn ambiguous_dropped_rows_name_their_semesters() {
        let mut snapshot = sample_plan();
        // Both CMPS 200 rows dropped: no enrolled row to prefer.
        for c in &mut snapshot.courses {
            c.enrollment = EnrollmentStatus::Dropped;
        }
        let err = find_course(&snapshot, "CMPS 200").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Fall 2026-2027"), "got: {message}");
        assert!(message.contains("Spring 2026-2027"), "got: {message}");
    }

    #[test]
    fn finds_semester_by_number() {
        let snapshot = sample_plan();
        assert_eq!(find_semester(&snapshot, 2).unwrap().number, 2);
    }

    #[test]
    fn unknown_semester_reports_timeline_length() {
        let snapshot = sample_plan();
        let err = find_semester(&snapshot, 9).unwrap_err();
        assert!(err.to_string().contains("timeline has 2"));
    }
}
