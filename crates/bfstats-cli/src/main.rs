//! The `bfstats` binary: joins attack-benchmark run logs into per-strategy
//! CSV summaries.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bfstats_error::Result;
use bfstats_parser::{ParsedRun, parse_run_file};
use bfstats_report::{FileFindings, JoinReport, merge_runs, write_join_report, write_reports};
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Debug,
    Trace,
}

impl Verbosity {
    const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug)]
struct CliConfig {
    stem: String,
    aux: String,
    log_file: Option<PathBuf>,
    report_path: Option<PathBuf>,
    verbosity: Verbosity,
    inputs: Vec<PathBuf>,
}

fn print_help() {
    let help = "\
bfstats - joins attack-benchmark run logs into per-strategy CSV summaries

USAGE:
    bfstats [OPTIONS] --stem STEM FILE...

OPTIONS:
    -s, --stem STEM       Base stem for csv output, e.g. results/run1 (required)
    -a, --add-aux STRING  String prepended verbatim to every output row (default '')
    -l, --log FILE        Also append log entries to FILE
        --report FILE     Write a JSON join report to FILE
    -v, --verbose         Increase log detail (repeat for trace output)
    -q, --quiet           Only log errors
    -h, --help            Show this help
";
    println!("{help}");
}

fn parse_args(args: &[String]) -> std::result::Result<CliConfig, String> {
    let mut stem: Option<String> = None;
    let mut aux = String::new();
    let mut log_file: Option<PathBuf> = None;
    let mut report_path: Option<PathBuf> = None;
    let mut verbose: u8 = 0;
    let mut quiet = false;
    let mut inputs: Vec<PathBuf> = Vec::new();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "-s" | "--stem" => {
                index += 1;
                if index >= args.len() {
                    return Err("--stem requires a value".to_owned());
                }
                stem = Some(args[index].clone());
            }
            "-a" | "--add-aux" => {
                index += 1;
                if index >= args.len() {
                    return Err("--add-aux requires a value".to_owned());
                }
                aux = args[index].clone();
            }
            "-l" | "--log" => {
                index += 1;
                if index >= args.len() {
                    return Err("--log requires a value".to_owned());
                }
                log_file = Some(PathBuf::from(&args[index]));
            }
            "--report" => {
                index += 1;
                if index >= args.len() {
                    return Err("--report requires a value".to_owned());
                }
                report_path = Some(PathBuf::from(&args[index]));
            }
            "-v" | "--verbose" => verbose = verbose.saturating_add(1),
            "-q" | "--quiet" => quiet = true,
            "-h" | "--help" => {
                print_help();
                return Err(String::new());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option: {flag}"));
            }
            input => inputs.push(PathBuf::from(input)),
        }
        index += 1;
    }

    if inputs.is_empty() {
        return Err("at least one input file is required".to_owned());
    }

    let verbosity = if quiet {
        Verbosity::Quiet
    } else {
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    };

    Ok(CliConfig {
        stem: stem.ok_or_else(|| "--stem is required".to_owned())?,
        aux,
        log_file,
        report_path,
        verbosity,
        inputs,
    })
}

fn init_tracing(config: &CliConfig) -> std::result::Result<(), String> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|error| format!("cannot open log file {}: {error}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(config.verbosity.level_filter())
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

fn run(config: &CliConfig) -> Result<()> {
    let mut runs = Vec::new();
    let mut skipped = Vec::new();
    let mut findings = Vec::new();

    for path in &config.inputs {
        if !path.exists() {
            error!(path = %path.display(), "input file does not exist, skipping");
            skipped.push(path.display().to_string());
            continue;
        }
        let ParsedRun { run, diagnostics } = parse_run_file(path)?;
        for finding in diagnostics.findings() {
            warn!(path = %run.path, "{finding}");
        }
        if !diagnostics.is_empty() {
            findings.push(FileFindings {
                path: run.path.clone(),
                findings: diagnostics.into_findings(),
            });
        }
        runs.push(run);
    }
    info!(runs = runs.len(), skipped = skipped.len(), "read all input files");

    let merged = merge_runs(&runs)?;
    info!("data merged");

    write_reports(&merged, &config.stem, &config.aux)?;

    if let Some(path) = &config.report_path {
        let report = JoinReport::new(&merged, skipped, findings);
        write_join_report(&report, path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(error) if error.is_empty() => return ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}\n");
            print_help();
            return ExitCode::from(2);
        }
    };

    if let Err(error) = init_tracing(&config) {
        eprintln!("error: {error}");
        return ExitCode::from(1);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::from(1)
        }
    }
}
