// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod config;
mod crash;
mod error;
mod logger;

use std::{
    panic::{self, AssertUnwindSafe}, path::PathBuf, process::ExitCode, thread
};

use anyhow::{anyhow, Context};
use colored::Colorize;
use log::{debug, LevelFilter};
use pseudo::{ExecutionError, Interpreter, ParserConfig, StdConsole};

use self::{error::ErrorPrinter, logger::Logger};

/// Enough for [`pseudo::MAX_CALL_DEPTH`] nested calls in every build profile.
const INTERPRETER_STACK_SIZE: usize = 512 * 1024 * 1024;

/// Runs a pseudocode program.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The program to run
    file: PathBuf,

    /// Symbol between the bounds of a `dla` loop
    #[arg(long, value_name = "SYMBOL")]
    range_symbol: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

fn main() -> ExitCode {
    let args = Args::parse_args();
    Logger::initialize(if args.verbose { LevelFilter::Trace } else { LevelFilter::Warn });

    match run_on_interpreter_thread(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "błąd".red().bold(), format!("{e:#}").bold());
            ExitCode::FAILURE
        }
    }
}

fn run_on_interpreter_thread(args: Args) -> anyhow::Result<ExitCode> {
    let handle = thread::Builder::new()
        .name("interpreter".into())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || run(&args))
        .context("could not start the interpreter")?;

    match handle.join() {
        Ok(result) => result,
        Err(..) => Err(anyhow!("the interpreter stopped unexpectedly")),
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = config::load_for(&args.file)?;
    if config.log.debug {
        Logger::raise_to(LevelFilter::Trace);
    }

    let parser_config = ParserConfig {
        range_symbol: args.range_symbol.clone().unwrap_or(config.parser.range_symbol),
    };

    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("could not read `{}`", args.file.display()))?;

    let nodes = match pseudo::parse_with_config(&source, &parser_config) {
        Ok(nodes) => nodes,
        Err(e) => {
            debug!("Parsing failed with {}", e.name());
            ErrorPrinter::for_parse_error(&args.file, &source, &e).print();
            return Ok(ExitCode::FAILURE);
        }
    };

    debug!("Running {} with {} top-level nodes", args.file.display(), nodes.len());

    crash::install_panic_hook();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        Interpreter::new(StdConsole).run(&nodes)
    }));
    _ = panic::take_hook();

    match result {
        Ok(Ok(outcome)) => {
            debug!("Program ended: {outcome:?}");
            Ok(ExitCode::SUCCESS)
        }

        Ok(Err(ExecutionError::Runtime(e))) => {
            debug!("Runtime error {}", e.name());
            ErrorPrinter::for_runtime_error(&args.file, &source, &e).print();
            Ok(ExitCode::FAILURE)
        }

        Ok(Err(ExecutionError::Internal(fault))) => {
            crash::report(&format!("{}: {fault}", fault.name()), &args.file);
            Ok(ExitCode::FAILURE)
        }

        Err(..) => {
            crash::report(&crash::take_panic_report(), &args.file);
            Ok(ExitCode::FAILURE)
        }
    }
}
