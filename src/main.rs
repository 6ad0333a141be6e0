//! fwcheck CLI entry point
//!
//! Validates that the agent firewall can be manually disabled through the
//! environment and a settings file.

use clap::Parser;
use fwcheck::cli::args::{Args, Command, OutputFormat};
use fwcheck::cli::logging::init_logging;
use fwcheck::cli::output::get_formatter;
use fwcheck::engine::harness::create_all_checks;
use fwcheck::engine::reporter::{Echo, Reporter};
use fwcheck::platform::env::ProcessEnv;
use fwcheck::version::get_build_info;
use fwcheck::{run_harness, HarnessConfig};

use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // Usage errors exit with clap's code 2
    let args = Args::parse();
    init_logging(args.log_level.as_deref(), args.verbose);

    match args.selected_command() {
        Command::Version => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Command::List => {
            print_check_list();
            ExitCode::SUCCESS
        }
        Command::Check => run_checks(&args),
    }
}

fn print_check_list() {
    println!("Available checks:");
    println!();
    for check in create_all_checks() {
        println!("  {:<8} {:<28} {}", check.id, check.name, check.description);
    }
}

fn run_checks(args: &Args) -> ExitCode {
    let config = HarnessConfig::from_args(args);
    let settings_path = config.settings_path.clone();
    let text = args.format == OutputFormat::Text;
    let color = text && args.color_requested() && std::io::stdout().is_terminal();

    let reporter = if !text {
        Reporter::silent()
    } else if args.quiet {
        Reporter::new(Echo::Failures, color)
    } else {
        Reporter::new(Echo::All, color)
    };

    let run = run_harness(config, &ProcessEnv, reporter);

    let formatter = get_formatter(args.format, color, args.verbose);
    let rendered = match formatter.format(&run.report) {
        Ok(output) => {
            println!("{}", output);
            true
        }
        Err(e) => {
            error!(error = %e, "could not render report");
            eprintln!("Error rendering report: {}", e);
            false
        }
    };

    if let Some(message) = run.cleanup.message(&settings_path) {
        if text {
            println!("{}", message);
        } else {
            info!("{}", message);
        }
    }

    if rendered && run.report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
