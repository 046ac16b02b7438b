// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::ViewKind;

/// Command-line arguments for `techdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "techdag",
    version,
    about = "Maintain a tech tree of tasks with dependency edges, levels and layout.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Techdag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Path to the graph data file (JSON); overrides `[data].path`.
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TECHDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print one view of the tree (the default command).
    Show {
        /// Which view to print.
        #[arg(long, value_enum, default_value = "tech-tree")]
        view: ViewArg,

        /// Show job nodes instead of everyday nodes in the free view.
        #[arg(long)]
        job_mode: bool,
    },

    /// Add a new node.
    Add {
        /// Node id; generated from the current time when omitted.
        #[arg(long, value_name = "ID")]
        id: Option<String>,

        #[arg(long, default_value = "")]
        name: String,

        /// Image reference stored verbatim on the node.
        #[arg(long, value_name = "REF", default_value = "/images/default.png")]
        image: String,

        /// Upload this file into the image store and use the resulting path
        /// instead of --image.
        #[arg(long, value_name = "PATH")]
        image_file: Option<String>,
    },

    /// Delete a node; its id is stripped from every dependency list.
    Remove {
        id: String,
    },

    /// Make TARGET depend on SOURCE (SOURCE must complete first).
    Link {
        source: String,
        target: String,
    },

    /// Remove the SOURCE -> TARGET dependency.
    Unlink {
        source: String,
        target: String,
    },

    /// Update a node's attributes; omitted flags keep their current value.
    Set {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_name = "REF")]
        image: Option<String>,

        #[arg(long)]
        done: Option<bool>,

        #[arg(long)]
        waiting: Option<bool>,

        #[arg(long)]
        hidden: Option<bool>,

        #[arg(long)]
        job: Option<bool>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// View selector as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ViewArg {
    TechTree,
    DoneTree,
    Free,
    Waiting,
}

impl From<ViewArg> for ViewKind {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::TechTree => ViewKind::TechTree,
            ViewArg::DoneTree => ViewKind::DoneTree,
            ViewArg::Free => ViewKind::Free,
            ViewArg::Waiting => ViewKind::Waiting,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
