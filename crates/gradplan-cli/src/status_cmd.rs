//! `gradplan status` and `gradplan semester` commands: show the plan
//! timeline and move the previous/present/future boundary.

use anyhow::Result;

use gradplan_core::credits::load_warning;
use gradplan_core::metrics::semester_gpa;
use gradplan_core::model::{PlanSnapshot, SemesterStatus, StudentSemester};
use gradplan_core::status::apply_status_change;

use crate::SemesterCommands;
use crate::config::GradplanConfig;
use crate::plan_file::PlanDocument;
use crate::resolve;

/// Run the status command: print the timeline with loads and grades.
pub fn run_status(config: &GradplanConfig) -> Result<()> {
    let doc = PlanDocument::load(&config.plan_path)?;
    let snapshot = doc.snapshot();

    println!("Plan: {}", config.plan_path.display());
    println!();

    for semester in snapshot.ordered_semesters() {
        print_semester(&snapshot, semester);
    }

    Ok(())
}

/// Run a semester subcommand.
pub fn run_semester_command(command: SemesterCommands, config: &GradplanConfig) -> Result<()> {
    match command {
        SemesterCommands::Set { number, status } => cmd_set(config, number, &status),
    }
}

fn cmd_set(config: &GradplanConfig, number: u32, status: &str) -> Result<()> {
    let mut doc = PlanDocument::load(&config.plan_path)?;
    let snapshot = doc.snapshot();

    let requested: SemesterStatus = status.to_lowercase().parse()?;
    let target = resolve::find_semester(&snapshot, number)?;

    let update = apply_status_change(&snapshot.semesters, target.id, requested)?;
    if update.changed.is_empty() {
        println!("No status changes.");
        return Ok(());
    }

    println!("Timeline updated:");
    for id in &update.changed {
        if let Some(semester) = update.semesters.iter().find(|s| s.id == *id) {
            println!(
                "  [{}] {}: {}",
                status_icon(semester.status),
                semester.name,
                semester.status
            );
        }
    }

    doc.semesters = update.semesters;
    doc.save(&config.plan_path)?;

    Ok(())
}

fn print_semester(snapshot: &PlanSnapshot, semester: &StudentSemester) {
    let load = snapshot.credit_load(semester.id);
    let mut header = format!(
        "[{}] {} ({}, {} cr",
        status_icon(semester.status),
        semester.name,
        semester.status,
        load
    );
    let graded = snapshot
        .enrolled_in(semester.id)
        .iter()
        .any(|c| c.grade.is_some());
    if graded {
        header.push_str(&format!(", gpa {}", semester_gpa(snapshot, semester.id)));
    }
    header.push(')');
    println!("{header}");

    if let Some(warning) = load_warning(load) {
        println!("      warning: {warning}");
    }

    for course in snapshot.courses_in(semester.id) {
        let mut line = format!(
            "      {:<10} {:>2} cr  {}",
            course.code, course.credits, course.title
        );
        if !course.is_enrolled() {
            line.push_str("  (dropped)");
        } else if let Some(grade) = course.grade {
            line.push_str(&format!("  [{grade}]"));
        }
        println!("{line}");
    }
}

fn status_icon(status: SemesterStatus) -> &'static str {
    match status {
        SemesterStatus::Previous => "+",
        SemesterStatus::Present => "*",
        SemesterStatus::Future => ".",
    }
}
