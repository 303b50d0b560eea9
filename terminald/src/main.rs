//! # Terminal Batch Host
//!
//! Main entry point: reads datasets from a file or stdin and prints the
//! rendered buffers.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use terminal_logger::{LogLevel, StderrLog};
use terminald::{BatchRuntime, FailurePolicy, TerminalConfig};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    keep_going: bool,
    trace: bool,
    log_level: Option<String>,
    help: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("terminald");

    let cli = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    if cli.help {
        print_usage(program);
        process::exit(0);
    }

    let config = build_config(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if let Err(e) = run(&cli, config) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                let path = args.get(i).ok_or("Missing value for --input")?;
                cli.input = Some(PathBuf::from(path));
            }
            "--config" | "-c" => {
                i += 1;
                let path = args.get(i).ok_or("Missing value for --config")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--log-level" => {
                i += 1;
                let level = args.get(i).ok_or("Missing value for --log-level")?;
                if LogLevel::parse(level).is_none() {
                    return Err(format!("Invalid log level: {}", level));
                }
                cli.log_level = Some(level.clone());
            }
            "--keep-going" => {
                cli.keep_going = true;
            }
            "--trace" => {
                cli.trace = true;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Config file first, then command-line overrides
fn build_config(cli: &CliArgs) -> Result<TerminalConfig, String> {
    let mut config = match &cli.config {
        Some(path) => TerminalConfig::load(path).map_err(|e| e.to_string())?,
        None => TerminalConfig::default(),
    };

    if cli.keep_going {
        config.failure_policy = FailurePolicy::Continue;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if cli.trace {
        config.log_level = LogLevel::Debug.as_str().to_lowercase();
    }

    Ok(config)
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn run(cli: &CliArgs, config: TerminalConfig) -> Result<(), String> {
    let level = config.log_level().map_err(|e| e.to_string())?;
    let mut log = StderrLog::new(level);

    let runtime = BatchRuntime::new(config).map_err(|e| e.to_string())?;
    let input = open_input(cli.input.as_deref())
        .map_err(|e| format!("Failed to open input: {}", e))?;

    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let result = runtime.run(input, &mut output, &mut log);

    // Whatever was rendered before a failure still reaches stdout
    output
        .flush()
        .map_err(|e| format!("Failed to write output: {}", e))?;

    let report = result.map_err(|e| e.to_string())?;
    if !report.is_clean() {
        return Err(format!(
            "{} of {} datasets failed",
            report.failures.len(),
            report.declared
        ));
    }
    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --input <FILE>       Read datasets from FILE (default: stdin)");
    eprintln!("  -c, --config <FILE>      JSON configuration file");
    eprintln!("  --keep-going             Skip failing datasets instead of stopping");
    eprintln!("  --log-level <LEVEL>      debug, info, warn or error (default: warn)");
    eprintln!("  --trace                  Log every step with a cursor preview");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --input datasets.txt", program);
    eprintln!("  {} --keep-going --trace < datasets.txt", program);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("terminald")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_args(&args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_all_options() {
        let cli = parse_args(&args(&[
            "-i",
            "in.txt",
            "--config",
            "cfg.json",
            "--keep-going",
            "--log-level",
            "info",
            "--trace",
        ]))
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert!(cli.keep_going);
        assert!(cli.trace);
        assert_eq!(cli.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--input"])).is_err());
        assert!(parse_args(&args(&["--log-level", "loud"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let cli = CliArgs {
            keep_going: true,
            trace: true,
            ..CliArgs::default()
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert_eq!(config.log_level().unwrap(), LogLevel::Debug);
    }
}
