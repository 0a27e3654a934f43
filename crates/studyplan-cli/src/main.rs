mod config;
mod export_cmd;
mod plan_cmds;
mod status_cmd;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use studyplan_core::StudyPlanner;
use studyplan_store::JsonFileStore;

use config::StudyplanConfig;

#[derive(Parser)]
#[command(name = "studyplan", about = "Exam study plan generator and tracker")]
struct Cli {
    /// Plan file (overrides STUDYPLAN_PLAN_FILE env var and config file)
    #[arg(long, global = true)]
    plan_file: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a studyplan config file with default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a new study plan from a syllabus file (replaces any active plan)
    Generate {
        /// Path to the syllabus TOML file
        syllabus: PathBuf,
        /// University identifier
        #[arg(long)]
        university: Option<String>,
        /// Course identifier
        #[arg(long)]
        course: Option<String>,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: Option<NaiveDate>,
        /// Planned study hours per day (advisory)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=24))]
        hours_per_day: Option<u32>,
    },
    /// Show the full day-by-day schedule
    Show,
    /// Show progress and today's topics
    Status,
    /// Mark a topic done (or not done) by day and topic number
    Toggle {
        /// Day number as listed by `studyplan show` (1-based)
        day: usize,
        /// Topic number within that day (1-based)
        topic: usize,
    },
    /// Discard the active plan
    Reset,
    /// Export the schedule as an iCalendar file
    Export {
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `studyplan init` command: write config file.
fn cmd_init(plan_file: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        storage: config::StorageSection { plan_file },
        planner: config::PlannerSection::default(),
    };
    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    match &cfg.storage.plan_file {
        Some(p) => println!("  storage.plan_file = {}", p.display()),
        None => println!(
            "  storage.plan_file = (default) {}",
            studyplan_store::StoreConfig::default_plan_file().display()
        ),
    }
    println!("  planner.min_lead_days = {}", cfg.planner.min_lead_days);
    println!("  planner.reserved_revision_days = {}", cfg.planner.reserved_revision_days);
    println!("  planner.hours_per_day = {}", cfg.planner.hours_per_day);
    println!();
    println!(
        "Next: run `studyplan generate <syllabus.toml> --university .. --course .. --exam-date ..`."
    );

    Ok(())
}

fn open_planner(resolved: &StudyplanConfig) -> anyhow::Result<StudyPlanner<JsonFileStore>> {
    let store = JsonFileStore::from_config(&resolved.store_config);
    StudyPlanner::open(store, resolved.planner_config).with_context(|| {
        format!("failed to load plan from {}", resolved.store_config.plan_file.display())
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.plan_file, force)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "studyplan", &mut std::io::stdout());
        }
        Commands::Generate {
            syllabus,
            university,
            course,
            exam_date,
            hours_per_day,
        } => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let mut planner = open_planner(&resolved)?;
            let args = plan_cmds::GenerateArgs {
                syllabus,
                university,
                course,
                exam_date,
                hours_per_day: hours_per_day.unwrap_or(resolved.default_hours_per_day),
                today,
            };
            plan_cmds::cmd_generate(&mut planner, &args)?;
        }
        Commands::Show => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let planner = open_planner(&resolved)?;
            plan_cmds::cmd_show(&planner, today)?;
        }
        Commands::Status => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let planner = open_planner(&resolved)?;
            status_cmd::run_status(&planner, today)?;
        }
        Commands::Toggle { day, topic } => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let mut planner = open_planner(&resolved)?;
            plan_cmds::cmd_toggle(&mut planner, day, topic)?;
        }
        Commands::Reset => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let mut planner = open_planner(&resolved)?;
            plan_cmds::cmd_reset(&mut planner)?;
        }
        Commands::Export { output } => {
            let resolved = StudyplanConfig::resolve(cli.plan_file.as_deref())?;
            let planner = open_planner(&resolved)?;
            export_cmd::run_export_ics(&planner, output.as_deref())?;
        }
    }

    Ok(())
}
