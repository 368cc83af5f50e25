mod elements;
mod form;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use formguard_lib::ContainerScope;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::form::{Form, Report};

/// Validate a form description and report the invalid fields.
#[derive(Debug, Parser)]
#[command(name = "formguard", version)]
struct Args {
    /// Form file (JSON)
    form: PathBuf,

    /// Container to validate (defaults to the first top-level control)
    #[arg(short, long)]
    container: Option<String>,

    /// Which validators the container includes
    #[arg(short, long, value_enum, default_value_t = Scope::All)]
    scope: Scope,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scope {
    /// Only controls directly inside the container
    Direct,
    /// Every control below the container
    All,
}

impl From<Scope> for ContainerScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Direct => ContainerScope::DirectChildrenOnly,
            Scope::All => ContainerScope::AllDescendants,
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match &args.log_file {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), log_file)
                .context("failed to initialize logger")?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
                .context("failed to initialize logger")?;
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    if report.valid {
        println!("{}: valid", report.container);
        return;
    }
    println!(
        "{}: {} invalid field(s)",
        report.container,
        report.errors.len()
    );
    for error in &report.errors {
        println!("  {:<16} {}", error.control, error.message);
    }
    if let Some(focused) = &report.focused {
        println!("focus: {focused}");
    }
}

fn run(args: Args) -> Result<bool> {
    let form = Form::load(&args.form)?;
    let container = match args.container {
        Some(container) => container,
        None => form
            .default_container()
            .context("form file has no controls")?,
    };

    let report = form.validate(&container, args.scope.into())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report.valid)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
