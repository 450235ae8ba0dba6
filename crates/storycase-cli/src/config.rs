use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use storycase_client::{
    ModelConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};

#[derive(Debug, Parser)]
#[command(
    name = "storycase",
    version,
    about = "Generate structured test cases from user stories"
)]
pub struct Cli {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Without a subcommand, start the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate test cases for one story without the menu
    Generate(GenerateArgs),
    /// Verify the API key and model endpoint
    Check,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// User story text
    #[arg(long, conflicts_with = "story_file", required_unless_present = "story_file")]
    pub story: Option<String>,

    /// File containing the user story ("-" reads stdin)
    #[arg(long)]
    pub story_file: Option<PathBuf>,

    /// Write the suite as JSON to this path (overwritten if it exists)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print JSON to stdout instead of the text rendering
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// API key for the model provider
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(long, global = true, env = "STORYCASE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature; low values keep output stable
    #[arg(
        long,
        global = true,
        env = "STORYCASE_TEMPERATURE",
        default_value_t = DEFAULT_TEMPERATURE
    )]
    pub temperature: f64,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout (seconds)
    #[arg(
        long,
        global = true,
        env = "STORYCASE_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs()
    )]
    pub timeout: u64,
}

impl ModelArgs {
    pub fn to_model_config(&self) -> ModelConfig {
        ModelConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
