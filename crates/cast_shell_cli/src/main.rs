//! Bootstrap probe CLI.
//!
//! # Responsibility
//! - Run the process bootstrap outside the host for a chosen process kind and
//!   build type.
//! - Print the resulting report as `key=value` lines or JSON.

use cast_shell_core::{
    core_version, default_log_level, init_logging, BootstrapReport, BuildProvenance,
    FileCommandLineLoader, ProcessBootstrap, ProcessConfiguration, ProcessKind,
    ProcessParameters, ReadFailurePolicy,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Runs the cast shell process bootstrap and reports what it configured.
#[derive(Parser, Debug)]
#[command(name = "cast_shell_cli")]
#[command(version)]
struct Args {
    /// Process kind to bootstrap.
    #[arg(long, value_enum, default_value_t = ProcessArg::Primary)]
    process: ProcessArg,

    /// Build type of the running image (`user` is the trusted release type).
    #[arg(long, env = "CAST_SHELL_BUILD_TYPE", default_value = "user")]
    build_type: String,

    /// Fail instead of starting empty when the override file is unreadable.
    #[arg(long)]
    strict: bool,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level used with `--log-dir`.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProcessArg {
    Primary,
    Child,
}

impl From<ProcessArg> for ProcessKind {
    fn from(value: ProcessArg) -> Self {
        match value {
            ProcessArg::Primary => ProcessKind::Primary,
            ProcessArg::Child => ProcessKind::Child,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let policy = if args.strict {
        ReadFailurePolicy::Fail
    } else {
        ReadFailurePolicy::Empty
    };
    let bootstrap = ProcessBootstrap::new(
        BuildProvenance::new(args.build_type.as_str()),
        FileCommandLineLoader::new(policy),
    );
    let parameters = ProcessParameters::new();
    let configuration = ProcessConfiguration::new();

    let report = match bootstrap.run(args.process.into(), &parameters, &configuration) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("bootstrap failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("report encoding failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }
    ExitCode::SUCCESS
}

fn print_report(report: &BootstrapReport) {
    println!("cast_shell_core version={}", core_version());
    println!("process={}", report.process.as_str());
    println!("build_type={}", report.build_type);
    println!(
        "mandatory_resources={}",
        report.mandatory_resources.bundles().join(",")
    );
    println!("private_data_suffix={}", report.private_data_suffix.as_str());
    match &report.command_line {
        Some(command_line) => {
            println!("command_line_directive={}", command_line.directive.label());
            println!("command_line_args={}", command_line.args.join(" "));
        }
        None => println!("command_line_directive=skipped"),
    }
}
