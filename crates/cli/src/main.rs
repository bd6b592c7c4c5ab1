//! CLI tool to check Growsoft Lua scripts.
//!
//! Usage: lua-check [OPTIONS] <PATH>...
//!
//! Directories are searched recursively for `*.lua` files and `-` reads one
//! script from stdin. An input that cannot be read is reported and skipped.
//! Exits 0 when every script is valid, 1 when any script has an error, and 2
//! when arguments or any input could not be used.

use anyhow::{bail, Context, Error, Result};
use clap::{ArgAction, Parser, ValueEnum};
use glob::glob;
use growsoft_lua_checker::{check_lua_syntax, CheckResult, ErrorReporter, ScriptStatus};
use serde::Serialize;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Scripts larger than this are refused unless `--max-bytes` says otherwise.
const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "lua-check", version)]
#[command(
    about = "Check Growsoft Lua scripts for unbalanced delimiters, unpaired function/end, and style issues"
)]
#[command(after_help = "Environment:\n  RUST_LOG   Log filter override (e.g. `debug`)")]
struct Cli {
    /// Script files or directories to check; `-` reads from stdin
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Refuse scripts larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: u64,

    /// Only print errors, not warnings (human format)
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }
}

/// One input in `--format json` output: a checked script, or the reason the
/// input could not be read.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ScriptStatus>,
    #[serde(flatten)]
    result: Option<CheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    io_error: Option<String>,
}

impl FileReport {
    fn checked(path: String, result: CheckResult) -> Self {
        Self {
            path,
            status: Some(ScriptStatus::from(&result)),
            result: Some(result),
            io_error: None,
        }
    }

    fn unreadable(path: String, err: &Error) -> Self {
        Self {
            path,
            status: None,
            result: None,
            io_error: Some(format!("{:#}", err)),
        }
    }

    fn is_valid(&self) -> bool {
        self.result.as_ref().is_some_and(CheckResult::is_valid)
    }
}

/// 2 if any input was unreadable, else 1 if any script has an error, else 0.
fn exit_status(reports: &[FileReport]) -> u8 {
    if reports.iter().any(|r| r.io_error.is_some()) {
        2
    } else if reports.iter().all(FileReport::is_valid) {
        0
    } else {
        1
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(reports) => ExitCode::from(exit_status(&reports)),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Check every input and print the reports.
fn run(cli: &Cli) -> Result<Vec<FileReport>> {
    let inputs = collect_inputs(&cli.paths)?;
    if inputs.is_empty() {
        bail!("no .lua scripts found in the given paths");
    }
    info!(count = inputs.len(), "checking scripts");

    let mut reports = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let source = match read_input(input, cli.max_bytes) {
            Ok(source) => source,
            Err(err) => {
                error!(path = %input.name(), "{:#}", err);
                if cli.format == Format::Human {
                    println!("{:<5}  {}", "skip", input.name());
                }
                reports.push(FileReport::unreadable(input.name(), &err));
                continue;
            }
        };
        let result = check_lua_syntax(&source);
        debug!(
            path = %input.name(),
            valid = result.is_valid(),
            warnings = result.warnings().len(),
            "checked script"
        );

        if cli.format == Format::Human {
            print_human(input, &source, &result, cli.quiet)?;
        }

        reports.push(FileReport::checked(input.name(), result));
    }

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        Format::Human => println!("\n{}", summary(&reports)),
    }

    Ok(reports)
}

/// Expand directories into their `*.lua` files, sorted per directory.
fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.as_os_str() == "-" {
            inputs.push(Input::Stdin);
        } else if path.is_dir() {
            let pattern = path.join("**").join("*.lua");
            let pattern = pattern
                .to_str()
                .with_context(|| format!("path is not valid UTF-8: {}", path.display()))?;

            let mut found = glob(pattern)
                .with_context(|| format!("invalid directory pattern: {}", pattern))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("failed to list {}", path.display()))?;
            found.sort();

            debug!(dir = %path.display(), count = found.len(), "expanded directory");
            inputs.extend(found.into_iter().map(Input::File));
        } else {
            inputs.push(Input::File(path.clone()));
        }
    }

    Ok(inputs)
}

/// Read one script, refusing anything over `max_bytes`.
fn read_input(input: &Input, max_bytes: u64) -> Result<String> {
    let bytes = match input {
        Input::Stdin => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .take(max_bytes.saturating_add(1))
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
        Input::File(path) => {
            let len = fs::metadata(path)
                .with_context(|| format!("failed to read {}", path.display()))?
                .len();
            if len > max_bytes {
                bail!(
                    "{} is {} bytes, over the {} byte limit",
                    path.display(),
                    len,
                    max_bytes
                );
            }
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
    };

    if bytes.len() as u64 > max_bytes {
        bail!("{} is over the {} byte limit", input.name(), max_bytes);
    }

    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", input.name()))
}

fn print_human(input: &Input, source: &str, result: &CheckResult, quiet: bool) -> Result<()> {
    println!("{:<5}  {}", ScriptStatus::from(result), input.name());

    let name = input.name();
    let reporter = ErrorReporter::new(name.as_str(), source);
    let color = io::stderr().is_terminal();
    let stderr = io::stderr();

    if let Some(error) = result.error() {
        reporter.write_error(error, color, stderr.lock())?;
    }
    if !quiet {
        for warning in result.warnings() {
            reporter.write_warning(warning, color, stderr.lock())?;
        }
    }
    Ok(())
}

fn summary(reports: &[FileReport]) -> String {
    let results: Vec<&CheckResult> = reports.iter().filter_map(|r| r.result.as_ref()).collect();
    let valid = results.iter().filter(|r| r.is_valid()).count();
    let warnings: usize = results.iter().map(|r| r.warnings().len()).sum();
    let mut line = format!(
        "{} script(s) checked: {} valid, {} with errors, {} warning(s)",
        results.len(),
        valid,
        results.len() - valid,
        warnings
    );
    let unreadable = reports.len() - results.len();
    if unreadable > 0 {
        line.push_str(&format!(", {} unreadable", unreadable));
    }
    line
}
