//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// tcapi2postman - Postman collections from Teamcenter service catalogues
///
/// Reads the `structure.js` published by the Teamcenter web tier and writes a
/// Postman v2.1 collection with one request per service operation.
#[derive(Parser, Debug)]
#[command(
    name = "tcapi2postman",
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

    /// Path to configuration file (TCApi2Postman.config, JSON, YAML or TOML)
    #[arg(short, long, global = true, env = "TCPOSTMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for command results
    #[arg(long, value_enum, global = true, default_value = "human")]
    pub format: OutputFormat,

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
    /// Generate a Postman collection from a structure.js file
    Generate(GenerateArgs),

    /// Show the sample payload and field docs of one type
    Inspect(InspectArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to structure.js (usually aws2/stage/out/soa/api/structure.js)
    #[arg(value_name = "STRUCTURE_JS")]
    pub structure: PathBuf,

    /// Path of the collection file to write
    #[arg(value_name = "OUT_COLLECTION")]
    pub output: PathBuf,

    /// Also generate requests for Soa.Internal libraries
    #[arg(long)]
    pub include_internal: bool,

    /// Pretty-print the collection JSON
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Write the collection JSON on one line
    #[arg(long)]
    pub compact: bool,
}

impl GenerateArgs {
    /// `Some` when a layout flag was given on the command line
    pub fn pretty_override(&self) -> Option<bool> {
        if self.pretty {
            Some(true)
        } else if self.compact {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to structure.js
    #[arg(value_name = "STRUCTURE_JS")]
    pub structure: PathBuf,

    /// Namespaced type, e.g. Teamcenter::Soa::Core::_2011_06::Session::Credentials
    #[arg(value_name = "TYPE_PATH")]
    pub type_path: String,

    /// Show only the sample payload
    #[arg(long)]
    pub sample: bool,

    /// Show only the field documentation
    #[arg(long)]
    pub fields: bool,
}

impl InspectArgs {
    /// Neither flag means both sections
    pub fn show_sample(&self) -> bool {
        self.sample || !self.fields
    }

    pub fn show_fields(&self) -> bool {
        self.fields || !self.sample
    }
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
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
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
