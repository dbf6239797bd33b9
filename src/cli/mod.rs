//! CLI command definitions for watchman-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! Options given with `--option` land in the argument tier.

use crate::config::parse_option;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Inspect effective watchman configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set a config option as NAME=VALUE (VALUE is JSON, or a plain string)
    #[arg(
        short,
        long = "option",
        value_name = "NAME=VALUE",
        value_parser = parse_option,
        global = true
    )]
    pub options: Vec<(String, Value)>,

    /// Global config file (overrides WATCHMAN_CONFIG_FILE)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Watched root whose .watchmanconfig is consulted first
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Type an option is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueType {
    /// Raw JSON, no type check
    #[default]
    Json,
    String,
    Int,
    Bool,
    Double,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective value of an option
    Get {
        /// Option name
        name: String,

        /// Type to read the option as
        #[arg(long = "as", value_enum, default_value_t = ValueType::Json)]
        value_type: ValueType,

        /// Value printed when no tier sets the option
        #[arg(long)]
        default: Option<String>,
    },

    /// Print the root marker files and whether enforcement is on
    RootFiles,

    /// Print the troubleshooting URL
    TroubleUrl,

    /// Print the argument and global documents
    Dump,
}
