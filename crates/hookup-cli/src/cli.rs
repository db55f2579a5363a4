//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Hookup CLI - map JSON and YAML documents through declarative schemas
///
/// A schema names every field of the output document and where its value
/// comes from in the input, optionally with a transform and validators.
#[derive(Parser, Debug)]
#[command(
    name = "hookup",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HOOKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Map a source document through a schema
    Map(MapArgs),

    /// Parse a schema and list its fields
    Check(CheckArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the map command
#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Path to the schema document (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Path to the source document (JSON or YAML); an array maps element by element
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Also print the per-field validation report
    #[arg(long)]
    pub errors: bool,

    /// Exit with a failure code when any field is invalid
    #[arg(long)]
    pub strict: bool,

    /// Leave fields whose source path is absent out of the output
    #[arg(long)]
    pub omit_missing: bool,

    /// Write the mapped document to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the schema document (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a configured format name, accepting `json_pretty` as well
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "json-pretty" | "json_pretty" => Some(Self::JsonPretty),
            _ => None,
        }
    }
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
