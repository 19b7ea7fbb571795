pub mod edit;
pub mod interests;
pub mod run;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(
    author,
    version,
    about = "Concurrent city event discovery and itinerary planner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover events and build an itinerary for a city and date range
    Run(RunArgs),

    /// Apply an AI edit to a single itinerary activity
    Edit(EditArgs),

    /// Print the interest taxonomy
    Interests,

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// Path to config file
    #[arg(short, long, default_value = "wayfinder.yaml")]
    pub config: PathBuf,

    /// City to search
    #[arg(long)]
    pub city: String,

    /// Interests (comma-separated, at least one)
    #[arg(long, value_delimiter = ',')]
    pub interests: Vec<String>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// Last day of the trip, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: String,

    /// Override artifact output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Show the execution plan without calling the provider
    #[arg(long)]
    pub dry_run: bool,

    /// Exit 1 when the run ends with no discovered links (CI mode)
    #[arg(long)]
    pub fail_on_empty: bool,
}

#[derive(Parser, Clone)]
pub struct EditArgs {
    /// Path to config file
    #[arg(short, long, default_value = "wayfinder.yaml")]
    pub config: PathBuf,

    /// The edit to apply, in plain language
    #[arg(long)]
    pub request: String,

    /// JSON file holding the activity to edit
    #[arg(long, value_name = "FILE")]
    pub activity: PathBuf,

    /// City the activity is in
    #[arg(long)]
    pub city: String,

    /// Day of the activity (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Interests for context (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub interests: Option<Vec<String>>,
}
