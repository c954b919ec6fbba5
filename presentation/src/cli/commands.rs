//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for relay_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => relay_domain::OutputFormat::Text,
            OutputFormat::Json => relay_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for prompt-relay
#[derive(Parser, Debug)]
#[command(name = "prompt-relay")]
#[command(author, version, about = "Queue-paced prompts against any OpenAI-compatible endpoint")]
#[command(long_about = r#"
prompt-relay sends prompts to an OpenAI-compatible chat completions endpoint.

Every generation call passes through one FIFO queue, so at most one request
is on the wire at a time and consecutive requests are spaced by the
configured delay. `translate` fans one text out to many languages; a failure
for one language is reported next to the others instead of aborting them.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. PROMPT_RELAY_* environment variables     e.g. PROMPT_RELAY_QUEUE__DELAY_MS=250
3. ./prompt-relay.toml                      Project-level config
4. ~/.config/prompt-relay/config.toml       Global config

Example:
  prompt-relay models
  prompt-relay ask "How do I pin a future?"
  prompt-relay translate "Good morning" --from en --to vi --to fr --to ja
  prompt-relay -o json diagram "OAuth device flow" --kind sequence
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Model to use instead of the configured one
    #[arg(short, long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Run every request immediately instead of queueing
    #[arg(long, global = true)]
    pub no_queue: bool,

    /// Pause between queued requests, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List chat-capable models offered by the endpoint
    Models,

    /// Check that a model answers a minimal request
    TestModel {
        /// Model id to test
        model: String,
    },

    /// Ask a free-form question
    Ask {
        prompt: String,

        /// System prompt replacing the default one
        #[arg(long, value_name = "TEXT")]
        system: Option<String>,
    },

    /// Generate a migration script between two schema files
    Migrate {
        /// Current schema
        old_schema: PathBuf,

        /// Target schema
        new_schema: PathBuf,

        /// SQL dialect of both schemas
        #[arg(long, default_value = "postgresql")]
        dialect: String,
    },

    /// Translate a text into one or more languages
    Translate {
        text: String,

        /// Source language code
        #[arg(long, default_value = "en")]
        from: String,

        /// Target language code (repeatable)
        #[arg(long, required = true, value_name = "CODE")]
        to: Vec<String>,

        /// Tone of the translation
        #[arg(long, default_value = "neutral")]
        style: String,
    },

    /// Generate a Mermaid diagram from a description
    Diagram {
        description: String,

        /// Mermaid diagram type
        #[arg(long, default_value = "flowchart")]
        kind: String,
    },
}
