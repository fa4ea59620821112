//! CLI module for strokewatch
//!
//! Command-line front end over the interaction components.
//!
//! # Commands
//!
//! - `predict` - Submit patient data for a stroke-risk prediction
//! - `chat` - Talk to the health assistant (one-shot or interactive)
//! - `plan` - Ask an AI planner (food, exercise, medical, ...) for a plan
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! strokewatch predict --gender Male --age 67 --hypertension 0 --heart-disease 1 \
//!     --ever-married Yes --work-type Private --residence-type Urban \
//!     --avg-glucose-level 228.69 --bmi 36.6 --smoking-status "formerly smoked"
//!
//! strokewatch plan exercise "62 years old, mild knee pain"
//!
//! strokewatch completions bash > ~/.bash_completion.d/strokewatch
//! ```

pub mod chat;
pub mod completions;
pub mod config;
pub mod output;
pub mod plan;
pub mod predict;
pub mod session;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::client::PlannerKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// strokewatch - stroke risk prediction client
#[derive(Parser, Debug)]
#[command(
    name = "strokewatch",
    version,
    about = "Client for a stroke-risk prediction, chat and planner backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict stroke risk for a patient
    Predict(PredictArgs),
    /// Chat with the health assistant
    Chat(ChatArgs),
    /// Get a plan from an AI planner
    Plan(PlanArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "strokewatch.toml")]
    pub config: PathBuf,

    /// Override backend base URL
    #[arg(long, env = "STROKEWATCH_BACKEND_URL")]
    pub base_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STROKEWATCH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long, value_parser = ["Male", "Female", "Other"])]
    pub gender: String,

    /// Age in years
    #[arg(long)]
    pub age: f64,

    /// 1 if the patient has hypertension
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub hypertension: u8,

    /// 1 if the patient has heart disease
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub heart_disease: u8,

    #[arg(long, value_parser = ["Yes", "No"])]
    pub ever_married: String,

    #[arg(long, value_parser = ["Private", "Self-employed", "Govt_job", "children", "Never_worked"])]
    pub work_type: String,

    #[arg(long, value_parser = ["Urban", "Rural"])]
    pub residence_type: String,

    /// Average glucose level (mg/dL)
    #[arg(long)]
    pub avg_glucose_level: f64,

    /// Body mass index
    #[arg(long)]
    pub bmi: f64,

    #[arg(long, value_parser = ["formerly smoked", "never smoked", "smokes", "Unknown"])]
    pub smoking_status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send; omit to chat interactively from stdin
    pub message: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Planner type (food, exercise, medical)
    #[arg(value_parser = parse_planner_kind)]
    pub kind: PlannerKind,

    /// What the planner should take into account
    #[arg(required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

fn parse_planner_kind(s: &str) -> Result<PlannerKind, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "strokewatch.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
