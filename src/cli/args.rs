//! Defines the command-line arguments and subcommands for the unfurl CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "unfurl",
    version,
    about = "Reflow bracketed literal expressions between inline and outline forms."
)]
pub struct UnfurlArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collapse an expression onto a single line.
    Inline {
        /// The file to read; stdin when omitted.
        file: Option<PathBuf>,
        /// Reformat only the bracketed region enclosing this byte offset.
        #[arg(long, value_name = "OFFSET")]
        at: Option<usize>,
    },
    /// Expand an expression one element per line.
    Outline {
        /// The file to read; stdin when omitted.
        file: Option<PathBuf>,
        /// Reformat only the bracketed region enclosing this byte offset.
        #[arg(long, value_name = "OFFSET")]
        at: Option<usize>,
    },
    /// Show the parsed node tree as JSON.
    Ast {
        /// The file to read; stdin when omitted.
        file: Option<PathBuf>,
    },
}
