//! linkeddoc CLI - scan, build, and inspect LinkedDoc metadata
//!
//! Usage: linkeddoc <command> [arguments]

mod build_cmd;
mod cli;
mod deps_cmd;
mod parse_cmd;
mod scan_cmd;

use std::env;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{parse_args, print_usage, Command};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINKEDDOC_LOG")
        .unwrap_or_else(|_| EnvFilter::new("linkeddoc=info,warn"));

    let format = env::var("LINKEDDOC_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries command output.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::from(1);
        }
    };

    init_tracing();

    let result = match command {
        Command::Version => {
            println!("{}", linkeddoc::version::version());
            return ExitCode::SUCCESS;
        }
        Command::Help => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Command::Scan {
            root,
            options,
            focus,
            sample,
            output_format,
        } => scan_cmd::run_scan(root, options, focus, sample, output_format),
        Command::Build {
            root,
            options,
            output_format,
        } => build_cmd::run_build(root, options, output_format),
        Command::Deps {
            root,
            file,
            reverse,
            transitive,
            options,
            output_format,
        } => deps_cmd::run_deps(root, file, reverse, transitive, options, output_format),
        Command::Parse {
            file,
            output_format,
        } => parse_cmd::run_parse(file, output_format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
