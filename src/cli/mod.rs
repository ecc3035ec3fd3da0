//! The unfurl Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use crate::cli::args::{Command, UnfurlArgs};
use crate::errors::{print_error, SourceContext};
use crate::region;
use crate::syntax::{parser, Node};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::{fs, io, process};

pub mod args;

/// The main entry point for the CLI.
pub fn run() {
    let args = UnfurlArgs::parse();

    let result = match args.command {
        Command::Inline { file, at } => handle_render(file.as_deref(), at, Mode::Inline),
        Command::Outline { file, at } => handle_render(file.as_deref(), at, Mode::Outline),
        Command::Ast { file } => handle_ast(file.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

enum Mode {
    Inline,
    Outline,
}

/// Handles the `inline` and `outline` subcommands.
fn handle_render(
    file: Option<&Path>,
    at: Option<usize>,
    mode: Mode,
) -> Result<(), Box<dyn std::error::Error>> {
    let (name, text) = read_source(file)?;

    let output = match at {
        None => render(&name, &text, &mode),
        Some(offset) => {
            let region = region::enclosing(&text, offset)
                .ok_or_else(|| format!("no bracketed region encloses byte offset {}", offset))?;
            let rendered = render(&name, region.slice(&text), &mode);
            region.splice(&text, &rendered)
        }
    };

    println!("{}", output);
    Ok(())
}

/// Handles the `ast` subcommand.
fn handle_ast(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (name, text) = read_source(file)?;
    let tree = parse_or_exit(&name, &text);
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn render(name: &str, text: &str, mode: &Mode) -> String {
    let tree = parse_or_exit(name, text);
    match mode {
        Mode::Inline => tree.inline(),
        Mode::Outline => tree.outline(),
    }
}

fn parse_or_exit(name: &str, text: &str) -> Node {
    match parser::parse(text, SourceContext::from_input(name, text)) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

fn read_source(file: Option<&Path>) -> Result<(String, String), Box<dyn std::error::Error>> {
    match file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(("stdin".to_string(), text))
        }
    }
}
