//! `gradplan init` command: materialize a fresh plan file from a catalog.

use anyhow::{Context, Result};
use chrono::Datelike;
use uuid::Uuid;

use gradplan_core::materialize::materialize_plan;
use gradplan_core::model::{AcademicYear, Term};

use crate::catalog_cmds;
use crate::config::GradplanConfig;
use crate::plan_file::PlanDocument;

/// Run the init command: expand the catalog template into a plan file.
///
/// Materialization is idempotent, so running init again without `--force`
/// completes whatever an interrupted run left missing instead of failing.
pub fn run_init(
    config: &GradplanConfig,
    catalog_arg: &str,
    term: &str,
    year: Option<i32>,
    force: bool,
) -> Result<()> {
    let plan_path = &config.plan_path;
    let term: Term = term.parse()?;
    let year = AcademicYear::starting(year.unwrap_or_else(|| chrono::Utc::now().year()));

    // Record an absolute catalog path so later commands find the catalog
    // from any working directory.
    let catalog_path = std::fs::canonicalize(catalog_arg)
        .with_context(|| format!("catalog file not found: {catalog_arg}"))?;
    let catalog = catalog_cmds::read_catalog(&catalog_path)?;

    if plan_path.exists() && !force {
        let mut doc = PlanDocument::load(plan_path)
            .context("existing plan file is unreadable; pass --force to start over")?;
        let student_id = doc.student_id;
        let outcome = materialize_plan(&mut doc, &catalog, student_id, term, year)?;
        doc.catalog_path = catalog_path.to_string_lossy().into_owned();
        doc.save(plan_path)?;

        if outcome.created_semesters == 0 && outcome.created_courses == 0 {
            println!("Plan at {} is already complete.", plan_path.display());
        } else {
            println!(
                "Completed the existing plan: +{} semesters, +{} courses.",
                outcome.created_semesters, outcome.created_courses
            );
        }
        return Ok(());
    }

    let student_id = Uuid::new_v4();
    let mut doc = PlanDocument::new(student_id, &catalog_path.to_string_lossy());
    let outcome = materialize_plan(&mut doc, &catalog, student_id, term, year)?;
    doc.save(plan_path)?;

    println!("Plan written to {}", plan_path.display());
    println!("  catalog: {} ({})", catalog.name(), catalog_path.display());
    println!(
        "  {} semesters, {} courses",
        outcome.created_semesters, outcome.created_courses
    );
    println!();
    println!("Next: run `gradplan status` to see the timeline.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        [catalog]
        name = "Init Test"

        [[courses]]
        code = "CMPS"
        number = "200"
        title = "Intro"
        attribute = "Major Course"

        [[semesters]]
        number = 1

        [[semesters.slots]]
        course = "CMPS 200"
    "#;

    fn test_config(dir: &std::path::Path) -> GradplanConfig {
        GradplanConfig {
            plan_path: dir.join("plan.json"),
            catalog_path: None,
        }
    }

    #[test]
    fn init_writes_a_plan_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog_file = tmp.path().join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let config = test_config(tmp.path());

        run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "fall",
            Some(2026),
            false,
        )
        .unwrap();

        let doc = PlanDocument::load(&config.plan_path).unwrap();
        assert_eq!(doc.semesters.len(), 1);
        assert_eq!(doc.semesters[0].name, "Fall 2026-2027");
    }

    #[test]
    fn rerunning_init_completes_instead_of_duplicating() {
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog_file = tmp.path().join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let config = test_config(tmp.path());

        run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "fall",
            Some(2026),
            false,
        )
        .unwrap();
        let first = PlanDocument::load(&config.plan_path).unwrap();

        run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "fall",
            Some(2026),
            false,
        )
        .unwrap();
        let second = PlanDocument::load(&config.plan_path).unwrap();

        assert_eq!(first.student_id, second.student_id);
        assert_eq!(second.semesters.len(), 1);
        assert_eq!(second.courses.len(), 1);
        assert_eq!(first.semesters[0].id, second.semesters[0].id);
    }

    #[test]
    fn init_force_starts_a_new_plan() {
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog_file = tmp.path().join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let config = test_config(tmp.path());

        run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "spring",
            Some(2027),
            false,
        )
        .unwrap();
        let first = PlanDocument::load(&config.plan_path).unwrap();

        run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "spring",
            Some(2027),
            true,
        )
        .unwrap();
        let second = PlanDocument::load(&config.plan_path).unwrap();

        assert_ne!(first.student_id, second.student_id);
        assert_eq!(second.semesters[0].name, "Spring 2027-2028");
    }

    #[test]
    fn init_rejects_a_bad_term() {
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog_file = tmp.path().join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let config = test_config(tmp.path());

        let err = run_init(
            &config,
            catalog_file.to_str().unwrap(),
            "winter",
            Some(2026),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("winter"));
        assert!(!config.plan_path.exists());
    }
}
