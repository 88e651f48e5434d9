// tollgate/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tollgate")]
#[command(about = "Checkpoint configuration toolkit for data-quality validation runs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Parses, validates and lints a checkpoint file
    Check {
        /// Checkpoint document (YAML or JSON)
        file: PathBuf,
    },

    /// 📄 Prints the normalised checkpoint document
    Show {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },

    /// 📚 Lists the checkpoints of a data context
    List {
        /// Data context directory (holds great_expectations.yml)
        #[arg(long, default_value = ".", env = "TOLLGATE_CONTEXT_DIR")]
        context_dir: PathBuf,
    },

    /// 🗺️  Resolves what a run of the checkpoint would execute (JSON)
    Plan {
        /// Checkpoint name in the store (ex: "sqlite" or "nightly/orders")
        name: String,

        #[arg(long, default_value = ".", env = "TOLLGATE_CONTEXT_DIR")]
        context_dir: PathBuf,

        /// Instant used to render the run name (RFC 3339). Defaults to now.
        #[arg(long)]
        run_time: Option<String>,
    },

    /// ✏️  Replaces an action by name, or appends it, and writes the checkpoint back
    SetAction {
        file: PathBuf,

        /// Action label in action_list
        #[arg(long)]
        name: String,

        #[arg(long)]
        class_name: String,

        #[arg(long)]
        module_name: Option<String>,

        /// Action parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,

        /// Write to this file instead of overwriting the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
