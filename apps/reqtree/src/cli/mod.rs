//! # reqtree CLI Module
//!
//! This module implements the CLI interface for reqtree.
//!
//! ## Available Commands
//!
//! - `describe` - List normalized criteria with their descriptions
//! - `tree` - Draw the requirement tree, optionally evaluated
//! - `check` - Decide pass/fail against a stat snapshot
//! - `format` - Render the expression as a boolean string

mod commands;

use crate::config;
use crate::input::InputFormat;
use clap::{Args, Parser, Subcommand};
use reqtree_core::ReqTreeError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// reqtree - requirement criteria inspector
///
/// Turns postfix requirement criteria into descriptions, requirement trees
/// and pass/fail verdicts.
#[derive(Parser, Debug)]
#[command(name = "reqtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Name table (TOML). Defaults to $REQTREE_NAMES
    #[arg(short = 'N', long, global = true)]
    pub names: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter implied by `--verbose` / `--quiet`.
    ///
    /// Targets match by prefix, so `reqtree` also covers `reqtree_core`.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "reqtree=debug"
        } else if self.quiet {
            "reqtree=error"
        } else {
            "reqtree=info"
        }
    }
}

/// Where to read the criteria array from.
#[derive(Args, Debug, Clone)]
pub struct CriteriaArgs {
    /// Path to the criteria file
    #[arg(short, long)]
    pub criteria: PathBuf,

    /// Criteria file format
    #[arg(short = 't', long, value_enum, default_value_t = InputFormat::Json)]
    pub input_format: InputFormat,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List normalized criteria
    Describe {
        #[command(flatten)]
        input: CriteriaArgs,
    },

    /// Draw the requirement tree
    Tree {
        #[command(flatten)]
        input: CriteriaArgs,

        /// Stat snapshot (JSON); leaves are unknown without one
        #[arg(short, long)]
        stats: Option<PathBuf>,
    },

    /// Check requirements against a stat snapshot
    Check {
        #[command(flatten)]
        input: CriteriaArgs,

        /// Stat snapshot (JSON)
        #[arg(short, long)]
        stats: PathBuf,
    },

    /// Render the expression as a boolean string
    Format {
        #[command(flatten)]
        input: CriteriaArgs,

        /// Render the raw postfix expression instead of the consolidated tree
        #[arg(long)]
        postfix: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ReqTreeError> {
    let names = config::load_configured_names(cli.names.as_deref())?;
    let json_mode = cli.json_mode;

    let output = match cli.command {
        Commands::Describe { input } => cmd_describe(&names, json_mode, &input)?,
        Commands::Tree { input, stats } => cmd_tree(&names, json_mode, &input, stats.as_deref())?,
        Commands::Check { input, stats } => cmd_check(&names, json_mode, &input, &stats)?,
        Commands::Format { input, postfix } => cmd_format(&names, json_mode, &input, postfix)?,
    };

    println!("{}", output);
    Ok(())
}
