//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::HealthCondition;

/// CLI mirror of [`HealthCondition`] so clap derives stay out of the
/// config types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConditionArg {
    Hypertension,
    Diabetes,
    HighCholesterol,
    KidneyDisease,
    Pregnancy,
}

impl From<ConditionArg> for HealthCondition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::Hypertension => HealthCondition::Hypertension,
            ConditionArg::Diabetes => HealthCondition::Diabetes,
            ConditionArg::HighCholesterol => HealthCondition::HighCholesterol,
            ConditionArg::KidneyDisease => HealthCondition::KidneyDisease,
            ConditionArg::Pregnancy => HealthCondition::Pregnancy,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "platescan")]
#[command(about = "Analyze food safety from an image: spoilage, burning, oil quality, and more")]
pub struct Args {
    /// Input image file or directory
    #[arg(short, long)]
    pub input: PathBuf,

    /// Health conditions to personalize recommendations (repeatable)
    #[arg(long = "condition", value_enum)]
    pub conditions: Vec<ConditionArg>,

    /// Per-detector timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    /// Optional whole-request deadline in seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Maximum number of recommendations in the report
    #[arg(long, default_value = "8")]
    pub max_recommendations: usize,

    /// Custom criticality table (JSON)
    #[arg(long)]
    pub criticality: Option<PathBuf>,

    /// Custom recommendation templates (JSON)
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Custom detector weight table (JSON)
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Emit the report as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Verbose output (per-detector findings and confidences)
    #[arg(short, long)]
    pub verbose: bool,
}
