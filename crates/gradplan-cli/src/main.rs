mod catalog_cmds;
mod config;
mod course_cmds;
mod init_cmd;
mod plan_file;
mod report_cmd;
mod resolve;
mod status_cmd;
#[cfg(test)]
mod test_util;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::GradplanConfig;

#[derive(Parser)]
#[command(
    name = "gradplan",
    about = "Degree plan manager for multi-semester course schedules",
    version
)]
struct Cli {
    /// Plan file (overrides GRADPLAN_PLAN env var)
    #[arg(long, global = true)]
    plan: Option<String>,

    /// Catalog TOML file (overrides GRADPLAN_CATALOG env var)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a plan file from a catalog's template
    Init {
        /// Path to the catalog TOML file
        catalog: String,
        /// Term the first semester falls in: fall, spring, or summer
        #[arg(long, default_value = "fall")]
        term: String,
        /// Calendar year the first semester falls in (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Overwrite an existing plan file
        #[arg(long)]
        force: bool,
    },
    /// Catalog inspection
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Show the plan timeline with statuses and credit loads
    Status,
    /// Semester management
    Semester {
        #[command(subcommand)]
        command: SemesterCommands,
    },
    /// Register a catalog course into a semester
    Add {
        /// Catalog course label (e.g. "CMPS 200")
        course: String,
        /// Semester number to register into
        #[arg(long)]
        semester: u32,
    },
    /// Move a course to another semester
    Move {
        /// Course label (e.g. "CMPS 200")
        course: String,
        /// Semester number to move into
        #[arg(long)]
        to: u32,
    },
    /// Drop a course (stays on the plan, excluded from loads and metrics)
    Drop {
        /// Course label
        course: String,
    },
    /// Delete a course from the plan entirely
    Remove {
        /// Course label
        course: String,
    },
    /// Record a grade ("clear" removes it)
    Grade {
        /// Course label
        course: String,
        /// Grade value, A+ through F, or "clear"
        grade: String,
    },
    /// Reassign a course's degree attribute
    Attribute {
        /// Course label
        course: String,
        /// New attribute (e.g. "Elective", "Major Course")
        attribute: String,
    },
    /// Show GPA, credit totals, and requirement-bucket progress
    Report,
    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Parse and validate a catalog file
    Check {
        /// Catalog TOML path (defaults to the configured catalog)
        file: Option<String>,
    },
    /// Show a catalog's courses, buckets, and template
    Show {
        /// Catalog TOML path (defaults to the configured catalog)
        file: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SemesterCommands {
    /// Set a semester's status: previous, present, or future
    Set {
        /// Semester number on the timeline
        number: u32,
        /// Requested status
        status: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Record default plan and catalog paths
    Set {
        /// Plan file path to record
        #[arg(long)]
        plan: Option<String>,
        /// Catalog file path to record
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Show the config file path and contents
    Show,
}

/// Execute `gradplan config set`: merge values into the config file.
fn cmd_config_set(plan: Option<String>, catalog: Option<String>) -> Result<()> {
    if plan.is_none() && catalog.is_none() {
        anyhow::bail!("nothing to set: pass --plan and/or --catalog");
    }

    let mut cfg = config::load_config().unwrap_or_default();
    if let Some(plan) = plan {
        cfg.files.plan = Some(plan);
    }
    if let Some(catalog) = catalog {
        cfg.files.catalog = Some(catalog);
    }
    config::save_config(&cfg)?;

    println!("Config written to {}", config::config_path().display());
    if let Some(plan) = &cfg.files.plan {
        println!("  files.plan = {plan}");
    }
    if let Some(catalog) = &cfg.files.catalog {
        println!("  files.catalog = {catalog}");
    }
    Ok(())
}

/// Execute `gradplan config show`.
fn cmd_config_show() -> Result<()> {
    println!("Config file: {}", config::config_path().display());
    match config::load_config() {
        Ok(cfg) => {
            println!(
                "  files.plan = {}",
                cfg.files.plan.as_deref().unwrap_or("(unset)")
            );
            println!(
                "  files.catalog = {}",
                cfg.files.catalog.as_deref().unwrap_or("(unset)")
            );
        }
        Err(_) => println!("  (no config file)"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = GradplanConfig::resolve(cli.plan.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Commands::Init {
            catalog,
            term,
            year,
            force,
        } => {
            init_cmd::run_init(&config, &catalog, &term, year, force)?;
        }
        Commands::Catalog { command } => {
            catalog_cmds::run_catalog_command(command, &config)?;
        }
        Commands::Status => {
            status_cmd::run_status(&config)?;
        }
        Commands::Semester { command } => {
            status_cmd::run_semester_command(command, &config)?;
        }
        Commands::Add { course, semester } => {
            course_cmds::run_add(&config, &course, semester)?;
        }
        Commands::Move { course, to } => {
            course_cmds::run_move(&config, &course, to)?;
        }
        Commands::Drop { course } => {
            course_cmds::run_drop(&config, &course)?;
        }
        Commands::Remove { course } => {
            course_cmds::run_remove(&config, &course)?;
        }
        Commands::Grade { course, grade } => {
            course_cmds::run_grade(&config, &course, &grade)?;
        }
        Commands::Attribute { course, attribute } => {
            course_cmds::run_attribute(&config, &course, &attribute)?;
        }
        Commands::Report => {
            report_cmd::run_report(&config)?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Set { plan, catalog } => cmd_config_set(plan, catalog)?,
            ConfigCommands::Show => cmd_config_show()?,
        },
    }

    Ok(())
}
