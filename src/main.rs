//! Mealtrack CLI
//!
//! Terminal front end for the meal pages:
//! - List meals with the calorie total
//! - Add, edit and delete meals
//! - Render any route

use anyhow::Context;
use clap::{Parser, Subcommand};
use mealtrack::{Config, HttpMealStore, LoggingConfig, Route, Shell, SubmitOutcome, TimeSlot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mealtrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track meals and their calories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Meal store base URL (overrides config)
    #[arg(long, global = true)]
    pub store_url: Option<String>,

    /// Config file (default: ~/.config/mealtrack/config.toml, ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all meals, newest first, with the calorie total
    List,

    /// Add a meal
    Add {
        /// Time slot (breakfast, snack, lunch, dinner)
        #[arg(short, long)]
        time: TimeSlot,
        /// What was eaten
        #[arg(short, long)]
        description: String,
        /// Energy in kcal
        #[arg(short, long)]
        calories: u32,
    },

    /// Edit a stored meal; omitted fields keep their stored value
    Edit {
        /// Meal id
        id: String,
        #[arg(short, long)]
        time: Option<TimeSlot>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        calories: Option<u32>,
    },

    /// Delete a meal
    Delete {
        /// Meal id
        id: String,
    },

    /// Render the page for a path (e.g. "/", "/addMeal", "/meals/<id>/edit")
    Open {
        path: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.store_url {
        config.store.base_url = url;
    }

    init_logging(&config.logging);
    tracing::debug!(store = %config.store.base_url, "Mealtrack v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(HttpMealStore::new(config.store).context("Failed to create HTTP client")?);
    let mut shell = Shell::new(store);
    let mut failed = false;

    match cli.command {
        Commands::List => {
            shell.navigate(Route::List).await;
        }

        Commands::Add {
            time,
            description,
            calories,
        } => {
            shell.navigate(Route::AddMeal).await;
            let form = shell.form_mut().context("Add page did not open a form")?;
            form.set_time_slot(time);
            form.set_description(description);
            form.set_calories(calories);

            failed = !handle_submit(shell.submit_form().await)?;
        }

        Commands::Edit {
            id,
            time,
            description,
            calories,
        } => {
            shell.navigate(Route::edit(id)).await;
            let form = shell.form_mut().context("Edit page did not open a form")?;
            if let Some(time) = time {
                form.set_time_slot(time);
            }
            if let Some(description) = description {
                form.set_description(description);
            }
            if let Some(calories) = calories {
                form.set_calories(calories);
            }

            handle_submit(shell.submit_form().await)?;
        }

        Commands::Delete { id } => {
            shell.navigate(Route::List).await;
            failed = shell.delete_meal(&id).await == Some(false);
        }

        Commands::Open { path } => {
            shell.open(&path).await;
        }

        Commands::Config { .. } => unreachable!("handled before config load"),
    }

    print!("{}", shell.render());

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns `false` when a create stayed on the form
fn handle_submit(outcome: Option<SubmitOutcome>) -> anyhow::Result<bool> {
    match outcome {
        Some(SubmitOutcome::Navigate(_)) => Ok(true),
        Some(SubmitOutcome::Stay) => Ok(false),
        Some(SubmitOutcome::Incomplete(fields)) => {
            let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
            anyhow::bail!("Missing required fields: {}", names.join(", "))
        }
        None => anyhow::bail!("No form to submit"),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mealtrack={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = mealtrack::config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
