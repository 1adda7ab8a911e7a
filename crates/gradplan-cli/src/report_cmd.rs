//! `gradplan report` command: GPA, credit totals, and bucket progress.

use anyhow::Result;

use gradplan_core::metrics::{
    bucket_progress, cumulative_gpa, degree_progress, planned_credits, semester_gpa,
};

use crate::catalog_cmds;
use crate::config::GradplanConfig;
use crate::plan_file::PlanDocument;

/// Run the report command.
pub fn run_report(config: &GradplanConfig) -> Result<()> {
    let doc = PlanDocument::load(&config.plan_path)?;
    let catalog = catalog_cmds::catalog_for_plan(config, &doc)?;
    let snapshot = doc.snapshot();

    println!("Cumulative GPA: {}", cumulative_gpa(&snapshot));
    let progress = degree_progress(&snapshot, &catalog);
    if progress.total > 0 {
        println!(
            "Completed credits: {} of {} ({}%)",
            progress.completed, progress.total, progress.percent
        );
        println!("Remaining credits: {}", progress.remaining);
    } else {
        println!("Completed credits: {}", progress.completed);
    }
    println!("Planned credits: {}", planned_credits(&snapshot));
    println!();

    println!("Semesters:");
    for semester in snapshot.ordered_semesters() {
        let load = snapshot.credit_load(semester.id);
        let mut line = format!(
            "  {:<20} {:<9} {:>2} cr",
            semester.name,
            semester.status.to_string(),
            load
        );
        let graded = snapshot
            .enrolled_in(semester.id)
            .iter()
            .any(|c| c.grade.is_some());
        if graded {
            line.push_str(&format!("  gpa {}", semester_gpa(&snapshot, semester.id)));
        }
        println!("{line}");
    }

    let buckets = bucket_progress(&snapshot, &catalog);
    if !buckets.is_empty() {
        println!();
        println!("Requirement buckets:");
        println!(
            "  {:<26} {:>6} {:>9} {:>10} {:>9}",
            "ATTRIBUTE", "EARNED", "REQUIRED", "REMAINING", "PROGRESS"
        );
        println!("  {}", "-".repeat(64));
        for bucket in &buckets {
            println!(
                "  {:<26} {:>6} {:>9} {:>10} {:>8}%",
                bucket.attribute.to_string(),
                bucket.earned,
                bucket.required,
                bucket.remaining,
                bucket.percent
            );
        }
    }

    Ok(())
}
