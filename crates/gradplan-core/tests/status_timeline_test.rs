//! Status timeline transitions over a materialized plan: the single-present
//! shape must hold after any click sequence, and grade editability must
//! track the owning semester's status.

use uuid::Uuid;

use gradplan_core::catalog::parse_catalog_toml;
use gradplan_core::materialize::{MemoryStore, materialize_plan};
use gradplan_core::model::{AcademicYear, Grade, PlanSnapshot, SemesterStatus, Term};
use gradplan_core::registrar::{self, RegistrarError};
use gradplan_core::status::{apply_status_change, is_canonical};

fn five_semester_plan() -> (PlanSnapshot, Uuid) {
    let catalog = parse_catalog_toml(
        r#"
[catalog]
name = "Five semesters"

[[courses]]
code = "CMPS"
number = "200"
title = "Introduction to Programming"
attribute = "Major Course"

[[semesters]]
number = 1

[[semesters.slots]]
course = "CMPS 200"

[[semesters]]
number = 2

[[semesters]]
number = 3

[[semesters]]
number = 4

[[semesters]]
number = 5
"#,
    )
    .expect("catalog should parse");
    let student = Uuid::new_v4();
    let mut store = MemoryStore::new();
    materialize_plan(
        &mut store,
        &catalog,
        student,
        Term::Spring,
        AcademicYear::starting(2025),
    )
    .expect("materialization should succeed");
    (store.snapshot(student), student)
}

fn statuses(snap: &PlanSnapshot) -> Vec<SemesterStatus> {
    snap.ordered_semesters().iter().map(|s| s.status).collect()
}

#[test]
fn click_sequences_keep_the_single_present_shape() {
    use SemesterStatus::*;
    let (mut snap, _) = five_semester_plan();

    // Every (target index, requested status) pair a UI could produce.
    let clicks = [
        (3usize, Present),
        (1, Previous),
        (4, Future),
        (0, Present),
        (4, Previous),
        (2, Future),
        (0, Previous),
    ];

    for (idx, requested) in clicks {
        let target = snap.ordered_semesters()[idx].id;
        let update = apply_status_change(&snap.semesters, target, requested).unwrap();
        assert!(
            is_canonical(&update.semesters),
            "clicking {requested} on index {idx} broke the timeline: {:?}",
            update
                .semesters
                .iter()
                .map(|s| s.status)
                .collect::<Vec<_>>()
        );
        snap.semesters = update.semesters;
    }
}

#[test]
fn walking_the_plan_to_graduation_ends_all_previous() {
    use SemesterStatus::*;
    let (mut snap, _) = five_semester_plan();
    assert_eq!(statuses(&snap), vec![Present, Future, Future, Future, Future]);

    for idx in 0..5 {
        let target = snap.ordered_semesters()[idx].id;
        let update = apply_status_change(&snap.semesters, target, Previous).unwrap();
        snap.semesters = update.semesters;
    }

    assert_eq!(
        statuses(&snap),
        vec![Previous, Previous, Previous, Previous, Previous]
    );
}

#[test]
fn changed_ids_cover_exactly_the_repartitioned_semesters() {
    use SemesterStatus::*;
    let (mut snap, _) = five_semester_plan();

    // Jump straight to semester four: the first three flip to previous and
    // four becomes present. Five is already future.
    let target = snap.ordered_semesters()[3].id;
    let update = apply_status_change(&snap.semesters, target, Present).unwrap();
    let expected: Vec<Uuid> = snap.ordered_semesters()[..4].iter().map(|s| s.id).collect();
    assert_eq!(update.changed, expected);
    snap.semesters = update.semesters;

    // Re-applying the same request changes nothing.
    let update = apply_status_change(&snap.semesters, target, Present).unwrap();
    assert!(update.changed.is_empty());
}

#[test]
fn grade_gate_follows_the_timeline() {
    use SemesterStatus::*;
    let (mut snap, _) = five_semester_plan();
    let course = snap.enrolled_course("CMPS 200").unwrap().id;
    let first = snap.ordered_semesters()[0].id;

    let err = registrar::set_grade(&mut snap, course, Some(Grade::BPlus)).unwrap_err();
    assert!(
        matches!(err, RegistrarError::GradeLocked { .. }),
        "expected GradeLocked, got: {err}"
    );

    let update = apply_status_change(&snap.semesters, first, Previous).unwrap();
    snap.semesters = update.semesters;
    registrar::set_grade(&mut snap, course, Some(Grade::BPlus)).unwrap();

    // Rewinding the timeline locks the grade again, but keeps its value.
    let update = apply_status_change(&snap.semesters, first, Present).unwrap();
    snap.semesters = update.semesters;
    let err = registrar::set_grade(&mut snap, course, None).unwrap_err();
    assert!(matches!(err, RegistrarError::GradeLocked { .. }), "got: {err}");
    assert_eq!(snap.course(course).unwrap().grade, Some(Grade::BPlus));
}
