//! Course commands: add, move, drop, remove, grade, attribute.
//!
//! Rule rejections (duplicate registration, credit overload, missing
//! prerequisites, locked grades, same-semester moves) print as
//! `rejected: ...` and leave the plan file untouched. Bad input and IO
//! problems are hard errors.

use anyhow::Result;
use uuid::Uuid;

use gradplan_core::credits::load_warning;
use gradplan_core::model::{CourseAttribute, Grade, PlanSnapshot};
use gradplan_core::placement::{MoveError, move_course};
use gradplan_core::registrar::{
    RegistrarError, drop_course, register_course, remove_course, set_attribute, set_grade,
};

use crate::catalog_cmds;
use crate::config::GradplanConfig;
use crate::plan_file::PlanDocument;
use crate::resolve;

/// Run the add command: register a catalog course into a semester.
pub fn run_add(config: &GradplanConfig, course: &str, semester: u32) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let catalog = catalog_cmds::catalog_for_plan(config, &doc)?;
    let mut snapshot = doc.snapshot();

    let target = resolve::find_semester(&snapshot, semester)?;
    let semester_id = target.id;
    let semester_name = target.name.clone();
    let label = course.to_uppercase();

    match register_course(&mut snapshot, &catalog, semester_id, &label) {
        Ok(_) => {
            println!(
                "Added {label} to {semester_name} ({} cr).",
                snapshot.credit_load(semester_id)
            );
            print_load_warning(&snapshot, semester_id);
            doc.absorb(snapshot);
            doc.save(&config.plan_path)
        }
        Err(
            e @ (RegistrarError::AlreadyEnrolled(_)
            | RegistrarError::Overload(_)
            | RegistrarError::MissingPrerequisites(_)),
        ) => {
            println!("rejected: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the move command: place a course into another semester.
pub fn run_move(config: &GradplanConfig, course: &str, to: u32) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let mut snapshot = doc.snapshot();

    let row = resolve::find_course(&snapshot, course)?;
    let course_id = row.id;
    let code = row.code.clone();
    let target = resolve::find_semester(&snapshot, to)?;
    let to_id = target.id;
    let to_name = target.name.clone();

    match move_course(&mut snapshot, course_id, to_id) {
        Ok(outcome) => {
            println!(
                "Moved {code} to {to_name} ({} cr).",
                snapshot.credit_load(to_id)
            );
            print_load_warning(&snapshot, outcome.from);
            print_load_warning(&snapshot, to_id);
            doc.absorb(snapshot);
            doc.save(&config.plan_path)
        }
        Err(e @ (MoveError::SameSemester | MoveError::Overload(_))) => {
            println!("rejected: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the drop command: strike a course without removing its row.
pub fn run_drop(config: &GradplanConfig, course: &str) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let mut snapshot = doc.snapshot();

    let row = resolve::find_course(&snapshot, course)?;
    if !row.is_enrolled() {
        println!("{} is already dropped.", row.code);
        return Ok(());
    }
    let course_id = row.id;
    let code = row.code.clone();
    let semester_id = row.semester_id;

    drop_course(&mut snapshot, course_id)?;
    println!("Dropped {code} (stays on the plan, excluded from loads and metrics).");
    print_load_warning(&snapshot, semester_id);
    doc.absorb(snapshot);
    doc.save(&config.plan_path)
}

/// Run the remove command: delete a course row from the plan.
pub fn run_remove(config: &GradplanConfig, course: &str) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let mut snapshot = doc.snapshot();

    let row = resolve::find_course(&snapshot, course)?;
    let course_id = row.id;

    let removed = remove_course(&mut snapshot, course_id)?;
    let semester = snapshot
        .semester(removed.semester_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| removed.semester_id.to_string());
    println!("Removed {} from {semester}.", removed.code);
    doc.absorb(snapshot);
    doc.save(&config.plan_path)
}

/// Run the grade command: record or clear a grade.
pub fn run_grade(config: &GradplanConfig, course: &str, grade: &str) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let mut snapshot = doc.snapshot();

    let row = resolve::find_course(&snapshot, course)?;
    let course_id = row.id;
    let code = row.code.clone();

    let parsed = if grade.eq_ignore_ascii_case("clear") {
        None
    } else {
        Some(grade.to_uppercase().parse::<Grade>()?)
    };

    match set_grade(&mut snapshot, course_id, parsed) {
        Ok(()) => {
            match parsed {
                Some(grade) => println!("Recorded {grade} for {code}."),
                None => println!("Cleared grade for {code}."),
            }
            doc.absorb(snapshot);
            doc.save(&config.plan_path)
        }
        Err(e @ RegistrarError::GradeLocked { .. }) => {
            println!("rejected: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the attribute command: reassign a course's degree attribute.
pub fn run_attribute(config: &GradplanConfig, course: &str, attribute: &str) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let mut snapshot = doc.snapshot();

    let row = resolve::find_course(&snapshot, course)?;
    let course_id = row.id;
    let code = row.code.clone();

    let attribute: CourseAttribute = attribute.parse()?;
    set_attribute(&mut snapshot, course_id, attribute)?;
    println!("{code} now counts as {attribute}.");
    doc.absorb(snapshot);
    doc.save(&config.plan_path)
}

fn print_load_warning(snapshot: &PlanSnapshot, semester_id: Uuid) {
    if let Some(warning) = load_warning(snapshot.credit_load(semester_id)) {
        println!("warning: {warning}");
    }
}
