//! CLI argument parsing for linkeddoc
//!
//! Defines the Command enum and parse_args() for every subcommand.

use anyhow::{anyhow, Result};
use linkeddoc::{BuildOptions, GitScope, OutputFormat, SamplingStrategy, ScanOptions};
use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("linkeddoc - LinkedDoc metadata ingestion");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  linkeddoc <command> [arguments]");
    eprintln!("  linkeddoc --help");
    eprintln!("  linkeddoc --version");
    eprintln!();
    eprintln!("  linkeddoc scan --root <DIR> [SCAN FLAGS] [--focus <PAT>]... [--sample <N> [--strategy random|stratified|recent] [--seed <S>]] [--output <FORMAT>]");
    eprintln!("  linkeddoc build --root <DIR> [SCAN FLAGS] [--validate] [--progress] [--output <FORMAT>]");
    eprintln!("  linkeddoc deps --root <DIR> --file <PATH> [--reverse] [--transitive] [--output <FORMAT>]");
    eprintln!("  linkeddoc parse --file <PATH> [--output <FORMAT>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  scan     List source files and which of them carry a metadata block");
    eprintln!("  build    Build the module graph and print its statistics");
    eprintln!("  deps     Show dependencies (or dependents) of one file");
    eprintln!("  parse    Print the triples of one file's metadata block");
    eprintln!();
    eprintln!("Scan flags:");
    eprintln!("  --include <PAT>       Keep only files matching this glob (repeatable)");
    eprintln!("  --exclude <PAT>       Extra ignore pattern (repeatable)");
    eprintln!("  --max-size <BYTES>    Skip files larger than this (default: 10 MiB)");
    eprintln!("  --follow-symlinks     Follow symbolic links");
    eprintln!("  --no-default-ignores  Do not apply built-in ignore patterns");
    eprintln!("  --concurrent          Use the worker pool");
    eprintln!("  --workers <N>         Worker count (implies --concurrent; 0 = all cores)");
    eprintln!("  --strict              Abort on the first error");
    eprintln!("  --max-errors <N>      Abort once more than N errors were collected");
    eprintln!("  --since <REF>         Only files changed since a git ref");
    eprintln!("  --commit <SHA>        Only files changed in one commit");
    eprintln!("  --staged              Only files staged in the index");
    eprintln!("  --uncommitted         Only modified or untracked files");
    eprintln!();
    eprintln!("Global arguments:");
    eprintln!("  --output <FORMAT>     Output format: human (default) or json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LINKEDDOC_LOG         Log filter (default: linkeddoc=info,warn)");
    eprintln!("  LINKEDDOC_LOG_FORMAT  'json' for JSON log lines");
}

/// `--sample` settings of the scan command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleArgs {
    pub target: usize,
    pub strategy: SamplingStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan {
        root: PathBuf,
        options: ScanOptions,
        focus: Vec<String>,
        sample: Option<SampleArgs>,
        output_format: OutputFormat,
    },
    Build {
        root: PathBuf,
        options: BuildOptions,
        output_format: OutputFormat,
    },
    Deps {
        root: PathBuf,
        file: String,
        reverse: bool,
        transitive: bool,
        options: ScanOptions,
        output_format: OutputFormat,
    },
    Parse {
        file: PathBuf,
        output_format: OutputFormat,
    },
    Version,
    Help,
}

pub fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse a full argv (program name first).
pub fn parse_args_from(args: &[String]) -> Result<Command> {
    if args.len() < 2 {
        return Err(anyhow!("Missing command"));
    }

    let command = args[1].as_str();
    match command {
        "--version" | "-V" => return Ok(Command::Version),
        "--help" | "-h" => return Ok(Command::Help),
        _ => {}
    }

    let mut root: Option<PathBuf> = None;
    let mut file: Option<String> = None;
    let mut scan = ScanOptions::default();
    let mut output_format = OutputFormat::Human;
    let mut focus = Vec::new();
    let mut sample_target: Option<usize> = None;
    let mut strategy_name = "random".to_string();
    let mut seed: u64 = 0;
    let mut validate = false;
    let mut progress = false;
    let mut reverse = false;
    let mut transitive = false;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        if parse_scan_flag(args, &mut i, &mut scan)? {
            continue;
        }
        match (command, flag) {
            (_, "--output") => {
                let value = value_of(args, i, flag)?;
                output_format = OutputFormat::parse(value)
                    .ok_or_else(|| anyhow!("Unknown output format: {}", value))?;
                i += 2;
            }
            ("scan" | "build" | "deps", "--root") => {
                root = Some(PathBuf::from(value_of(args, i, flag)?));
                i += 2;
            }
            ("deps" | "parse", "--file") => {
                file = Some(value_of(args, i, flag)?.to_string());
                i += 2;
            }
            ("scan", "--focus") => {
                focus.push(value_of(args, i, flag)?.to_string());
                i += 2;
            }
            ("scan", "--sample") => {
                sample_target = Some(value_of(args, i, flag)?.parse()?);
                i += 2;
            }
            ("scan", "--strategy") => {
                strategy_name = value_of(args, i, flag)?.to_string();
                i += 2;
            }
            ("scan", "--seed") => {
                seed = value_of(args, i, flag)?.parse()?;
                i += 2;
            }
            ("build", "--validate") => {
                validate = true;
                i += 1;
            }
            ("build", "--progress") => {
                progress = true;
                i += 1;
            }
            ("deps", "--reverse") => {
                reverse = true;
                i += 1;
            }
            ("deps", "--transitive") => {
                transitive = true;
                i += 1;
            }
            _ => return Err(anyhow!("Unknown argument for {}: {}", command, flag)),
        }
    }

    let require_root = |root: Option<PathBuf>| root.ok_or_else(|| anyhow!("--root is required"));
    let require_file = |file: Option<String>| file.ok_or_else(|| anyhow!("--file is required"));

    match command {
        "scan" => {
            let sample = match sample_target {
                Some(target) => Some(SampleArgs {
                    target,
                    strategy: SamplingStrategy::from_name(&strategy_name, seed)
                        .ok_or_else(|| anyhow!("Unknown sampling strategy: {}", strategy_name))?,
                }),
                None => None,
            };
            Ok(Command::Scan {
                root: require_root(root)?,
                options: scan,
                focus,
                sample,
                output_format,
            })
        }
        "build" => Ok(Command::Build {
            root: require_root(root)?,
            options: BuildOptions::default()
                .with_scan(scan)
                .with_validate(validate)
                .with_progress(progress),
            output_format,
        }),
        "deps" => Ok(Command::Deps {
            root: require_root(root)?,
            file: require_file(file)?,
            reverse,
            transitive,
            options: scan,
            output_format,
        }),
        "parse" => Ok(Command::Parse {
            file: PathBuf::from(require_file(file)?),
            output_format,
        }),
        other => Err(anyhow!("Unknown command: {}", other)),
    }
}

/// Consume one scan flag at `args[*i]`; returns false if it is not one.
fn parse_scan_flag(args: &[String], i: &mut usize, scan: &mut ScanOptions) -> Result<bool> {
    let flag = args[*i].as_str();
    let mut step = 1;
    match flag {
        "--include" => {
            scan.include.push(value_of(args, *i, flag)?.to_string());
            step = 2;
        }
        "--exclude" => {
            scan.exclude.push(value_of(args, *i, flag)?.to_string());
            step = 2;
        }
        "--max-size" => {
            scan.max_file_size = Some(value_of(args, *i, flag)?.parse()?);
            step = 2;
        }
        "--workers" => {
            scan.concurrent = true;
            scan.workers = value_of(args, *i, flag)?.parse()?;
            step = 2;
        }
        "--max-errors" => {
            scan.max_errors = Some(value_of(args, *i, flag)?.parse()?);
            step = 2;
        }
        "--since" => {
            scan.git_scope = Some(GitScope::Since(value_of(args, *i, flag)?.to_string()));
            step = 2;
        }
        "--commit" => {
            scan.git_scope = Some(GitScope::Commit(value_of(args, *i, flag)?.to_string()));
            step = 2;
        }
        "--follow-symlinks" => scan.follow_symlinks = true,
        "--no-default-ignores" => scan.use_default_ignores = false,
        "--concurrent" => scan.concurrent = true,
        "--strict" => scan.strict = true,
        "--staged" => scan.git_scope = Some(GitScope::Staged),
        "--uncommitted" => scan.git_scope = Some(GitScope::Uncommitted),
        _ => return Ok(false),
    }
    *i += step;
    Ok(true)
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires an argument", flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        std::iter::once("linkeddoc")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_scan_with_flags() {
        let cmd = parse_args_from(&argv(
            "scan --root /src --exclude gen --workers 4 --strict --focus **/*.go --sample 10 --strategy stratified --output json",
        ))
        .unwrap();
        match cmd {
            Command::Scan {
                root,
                options,
                focus,
                sample,
                output_format,
            } => {
                assert_eq!(root, PathBuf::from("/src"));
                assert_eq!(options.exclude, vec!["gen"]);
                assert!(options.concurrent);
                assert_eq!(options.workers, 4);
                assert!(options.strict);
                assert_eq!(focus, vec!["**/*.go"]);
                assert_eq!(
                    sample,
                    Some(SampleArgs {
                        target: 10,
                        strategy: SamplingStrategy::Stratified
                    })
                );
                assert_eq!(output_format, OutputFormat::Json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_build_flags() {
        let cmd = parse_args_from(&argv("build --root . --validate --since main")).unwrap();
        match cmd {
            Command::Build { options, .. } => {
                assert!(options.validate);
                assert!(!options.progress);
                assert_eq!(options.scan.git_scope, Some(GitScope::Since("main".to_string())));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_deps_requires_file() {
        let err = parse_args_from(&argv("deps --root .")).unwrap_err();
        assert!(err.to_string().contains("--file"));
    }

    #[test]
    fn test_flag_scoped_to_command() {
        assert!(parse_args_from(&argv("parse --file a.go --validate")).is_err());
        assert!(parse_args_from(&argv("scan --root")).is_err());
        assert!(parse_args_from(&argv("bogus")).is_err());
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(parse_args_from(&argv("--version")).unwrap(), Command::Version);
        assert_eq!(parse_args_from(&argv("-h")).unwrap(), Command::Help);
    }
}
