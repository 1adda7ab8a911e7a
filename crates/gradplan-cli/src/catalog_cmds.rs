//! `gradplan catalog` commands: validate and inspect catalog files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use gradplan_core::catalog::{Catalog, parse_catalog_toml};

use crate::CatalogCommands;
use crate::config::GradplanConfig;
use crate::plan_file::PlanDocument;

/// Run a catalog subcommand.
pub fn run_catalog_command(command: CatalogCommands, config: &GradplanConfig) -> Result<()> {
    match command {
        CatalogCommands::Check { file } => cmd_check(config, file.as_deref()),
        CatalogCommands::Show { file } => cmd_show(config, file.as_deref()),
    }
}

/// Read and parse a catalog TOML file.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    let catalog = parse_catalog_toml(&contents)
        .with_context(|| format!("invalid catalog at {}", path.display()))?;
    Ok(catalog)
}

/// The catalog a plan-editing command should use: the configured path when
/// set, else the one recorded in the plan document at init time.
pub fn catalog_for_plan(config: &GradplanConfig, doc: &PlanDocument) -> Result<Catalog> {
    let path = match &config.catalog_path {
        Some(p) => p.clone(),
        None => PathBuf::from(&doc.catalog_path),
    };
    read_catalog(&path)
}

fn resolve_file(config: &GradplanConfig, file: Option<&str>) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(PathBuf::from(file));
    }
    if let Some(path) = &config.catalog_path {
        return Ok(path.clone());
    }
    if let Ok(doc) = PlanDocument::load(&config.plan_path) {
        return Ok(PathBuf::from(doc.catalog_path));
    }
    bail!("no catalog file given (pass a path, set --catalog, or run `gradplan init`)");
}

fn cmd_check(config: &GradplanConfig, file: Option<&str>) -> Result<()> {
    let path = resolve_file(config, file)?;
    let catalog = read_catalog(&path)?;

    let slots: usize = catalog.template().iter().map(|s| s.slots.len()).sum();
    println!("Catalog OK: {}", catalog.name());
    println!(
        "  {} courses, {} buckets, {} template semesters ({} slots)",
        catalog.courses().len(),
        catalog.buckets().len(),
        catalog.template().len(),
        slots,
    );
    if catalog.total_credits() > 0 {
        println!("  {} credits to graduate", catalog.total_credits());
    }
    Ok(())
}

fn cmd_show(config: &GradplanConfig, file: Option<&str>) -> Result<()> {
    let path = resolve_file(config, file)?;
    let catalog = read_catalog(&path)?;

    println!("Catalog: {}", catalog.name());
    if catalog.total_credits() > 0 {
        println!("Credits to graduate: {}", catalog.total_credits());
    }
    println!();

    println!("Courses:");
    for course in catalog.courses() {
        let mut line = format!(
            "  {:<10} {:>2} cr  {:<26} {}",
            course.label(),
            course.credits,
            course.attribute.to_string(),
            course.title
        );
        if !course.prerequisites.is_empty() {
            line.push_str(&format!("  [requires {}]", course.prerequisites.join(", ")));
        }
        println!("{line}");
    }

    if !catalog.buckets().is_empty() {
        println!();
        println!("Requirement buckets:");
        for bucket in catalog.buckets() {
            println!(
                "  {:<26} {} credits",
                bucket.attribute.to_string(),
                bucket.required_credits
            );
        }
    }

    if !catalog.template().is_empty() {
        println!();
        println!("Template:");
        for semester in catalog.template() {
            let credits: u32 = semester.slots.iter().map(|s| s.credits).sum();
            let codes: Vec<&str> = semester.slots.iter().map(|s| s.course.as_str()).collect();
            println!(
                "  Semester {} ({credits} cr): {}",
                semester.number,
                codes.join(", ")
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        [catalog]
        name = "Resolve Test"

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

    #[test]
    fn read_catalog_parses_a_valid_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = read_catalog(&path).unwrap();
        assert_eq!(catalog.name(), "Resolve Test");
        assert_eq!(catalog.courses().len(), 1);
    }

    #[test]
    fn read_catalog_reports_parse_failures_with_the_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.toml");
        std::fs::write(&path, "not even toml [").unwrap();

        let err = read_catalog(&path).unwrap_err();
        assert!(format!("{err:#}").contains("catalog.toml"));
    }

    #[test]
    fn explicit_file_beats_configured_catalog() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = GradplanConfig {
            plan_path: tmp.path().join("plan.json"),
            catalog_path: Some(tmp.path().join("configured.toml")),
        };

        let path = resolve_file(&config, Some("explicit.toml")).unwrap();
        assert_eq!(path, PathBuf::from("explicit.toml"));

        let path = resolve_file(&config, None).unwrap();
        assert_eq!(path, tmp.path().join("configured.toml"));
    }

    #[test]
    fn missing_catalog_everywhere_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = GradplanConfig {
            plan_path: tmp.path().join("absent.json"),
            catalog_path: None,
        };

        let err = resolve_file(&config, None).unwrap_err();
        assert!(err.to_string().contains("no catalog file"));
    }
}
