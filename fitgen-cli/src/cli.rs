//! Command-line definitions for the plan generator forms.

use clap::{Args, Parser, Subcommand};
use fitgen_core::prompt::fields;
use fitgen_core::types::Flow;
use fitgen_runtime::defaults::DEFAULT_RELAY_URL;

/// fitgen - diet and workout plan generator
#[derive(Debug, Parser)]
#[command(
    name = "fitgen",
    about = "Fill in a plan form and generate it through a fitgen relay",
    after_help = "Set RUST_LOG=debug for request logging."
)]
pub struct Cli {
    /// Relay server base URL
    #[arg(long, global = true, env = "FITGEN_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Call the completion API directly with this process's settings instead of a relay server
    #[arg(long, global = true)]
    pub local: bool,

    /// Print the assembled prompt before generating
    #[arg(long, global = true)]
    pub print_prompt: bool,

    /// Print the assembled prompt and exit without generating
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a 7-day diet plan
    Diet(DietForm),

    /// Generate a 7-day workout plan
    Workout(WorkoutForm),
}

#[derive(Debug, Args)]
pub struct DietForm {
    /// Current weight (kg)
    #[arg(long)]
    pub weight: Option<String>,

    /// Height (cm)
    #[arg(long)]
    pub height: Option<String>,

    /// Target weight (kg)
    #[arg(long)]
    pub target_weight: Option<String>,

    /// Lifestyle (sedentary, active, ...)
    #[arg(long)]
    pub lifestyle: Option<String>,

    /// Do you want to fast? (yes/no, details)
    #[arg(long)]
    pub fasting: Option<String>,

    #[arg(long)]
    pub age: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long)]
    pub allergies: Option<String>,

    /// Preferences (vegetarian, etc.)
    #[arg(long)]
    pub preferences: Option<String>,

    #[command(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Args)]
pub struct WorkoutForm {
    #[arg(long)]
    pub goal: Option<String>,

    /// Current weight (kg)
    #[arg(long)]
    pub weight: Option<String>,

    /// Height (cm)
    #[arg(long)]
    pub height: Option<String>,

    /// Target weight (kg)
    #[arg(long)]
    pub target_weight: Option<String>,

    /// Type of workout (cut, bulk, lean bulk)
    #[arg(long)]
    pub workout_type: Option<String>,

    #[arg(long)]
    pub note: Option<String>,

    #[command(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Args)]
pub struct ExtraFields {
    /// Set any form attribute as name=value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub set: Vec<(String, String)>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty field name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

impl Command {
    pub fn flow(&self) -> Flow {
        match self {
            Command::Diet(_) => Flow::Diet,
            Command::Workout(_) => Flow::Workout,
        }
    }

    /// Form values in entry order; `--set` values come last and win.
    pub fn field_values(&self) -> Vec<(String, String)> {
        let (named, extra): (Vec<(&str, &Option<String>)>, &ExtraFields) = match self {
            Command::Diet(f) => (
                vec![
                    (fields::WEIGHT, &f.weight),
                    (fields::HEIGHT, &f.height),
                    (fields::TARGET_WEIGHT, &f.target_weight),
                    (fields::LIFESTYLE, &f.lifestyle),
                    (fields::FASTING, &f.fasting),
                    (fields::AGE, &f.age),
                    (fields::GENDER, &f.gender),
                    (fields::ALLERGIES, &f.allergies),
                    (fields::PREFERENCES, &f.preferences),
                ],
                &f.extra,
            ),
            Command::Workout(f) => (
                vec![
                    (fields::GOAL, &f.goal),
                    (fields::WEIGHT, &f.weight),
                    (fields::HEIGHT, &f.height),
                    (fields::TARGET_WEIGHT, &f.target_weight),
                    (fields::WORKOUT_TYPE, &f.workout_type),
                    (fields::NOTE, &f.note),
                ],
                &f.extra,
            ),
        };

        named
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
            .chain(extra.set.iter().cloned())
            .collect()
    }
}
