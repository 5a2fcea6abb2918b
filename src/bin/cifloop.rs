//! Command-line interface for cifloop
//!
//! This binary parses CIF-style files and prints their loops and blocks in different formats.
//!
//! Usage:
//!   cifloop parse `<path>` [--format `<format>`] [--config `<file>`]  - Parse a file and print it
//!   cifloop tokens `<path>`                                        - Print the token stream
//!   cifloop selftest                                             - Parse the built-in sample
//!   cifloop list-formats                                         - List output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cifloop::cif::ast::SourceLocation;
use cifloop::cif::config::{CifLoopConfig, Loader};
use cifloop::cif::processor::{read_source, Processor};
use cifloop::cif::Error;

fn main() {
    let matches = Command::new("cifloop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing loop blocks of CIF-style data files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log parser activity to stderr"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to parse")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'tag', 'json', 'yaml', 'mapping')"),
                )
                .arg(
                    Arg::new("allow-empty-loops")
                        .long("allow-empty-loops")
                        .action(ArgAction::SetTrue)
                        .help("Accept loops with data names but no values"),
                )
                .arg(
                    Arg::new("require-data-block")
                        .long("require-data-block")
                        .action(ArgAction::SetTrue)
                        .help("Reject content before the first data_ header"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to tokenize")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("selftest").about("Parse the built-in two-loop sample"))
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(config, parse_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(config, tokens_matches),
        Some(("selftest", _)) => handle_selftest_command(config),
        Some(("list-formats", _)) => handle_list_formats_command(config),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<CifLoopConfig, Error> {
    let mut loader = Loader::new();
    if let Ok(dir) = std::env::current_dir() {
        loader = loader.with_project_file(dir);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(("parse", parse_matches)) = matches.subcommand() {
        if parse_matches.get_flag("allow-empty-loops") {
            loader = loader.set_override("parse.allow_empty_loops", true)?;
        }
        if parse_matches.get_flag("require-data-block") {
            loader = loader.set_override("parse.require_data_block", true)?;
        }
    }
    Ok(loader.build()?)
}

/// Handle the parse command
fn handle_parse_command(config: CifLoopConfig, matches: &ArgMatches) {
    let path = required_path(matches);
    let format = matches.get_one::<String>("format").map(String::as_str);
    let processor = Processor::new(config);

    let source = read_source(Path::new(path)).unwrap_or_else(|e| fail(path, None, &e));
    match processor.process_str(&source, format) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => fail(path, Some(&source), &e),
    }
}

/// Handle the tokens command
fn handle_tokens_command(config: CifLoopConfig, matches: &ArgMatches) {
    let path = required_path(matches);
    let processor = Processor::new(config);

    let source = read_source(Path::new(path)).unwrap_or_else(|e| fail(path, None, &e));
    match processor.tokens(&source) {
        Ok(listing) => print!("{}", listing),
        Err(e) => fail(path, Some(&source), &e),
    }
}

/// Handle the selftest command
fn handle_selftest_command(config: CifLoopConfig) {
    match Processor::new(config).self_test() {
        Ok(output) => print!("{}", output),
        Err(e) => fail("<selftest>", None, &e),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: CifLoopConfig) {
    let processor = Processor::new(config);
    let registry = processor.registry();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|f| f.description())
            .unwrap_or_default();
        println!("  {:<10}{}", name, description);
    }
}

fn required_path(matches: &ArgMatches) -> &str {
    // clap enforces the argument
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

/// Print `path:line:column: message` (one-based) and exit
fn fail(path: &str, source: Option<&str>, error: &Error) -> ! {
    match (source, error.offset()) {
        (Some(source), Some(offset)) => {
            let position = SourceLocation::new(source).byte_to_position(offset);
            eprintln!(
                "{}:{}:{}: {}",
                path,
                position.line + 1,
                position.column + 1,
                error
            );
        }
        _ => eprintln!("{}: {}", path, error),
    }
    std::process::exit(1);
}
