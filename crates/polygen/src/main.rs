//! `polygen` command line.

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use config::PolygenConfig;
use polygen_emit::ir::visit::node_count;
use polygen_emit::{EmitOptions, GenerateOptions, Target, emitters, generate_with, read_json_file};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polygen", version, about = "Generate C#, Go and Python programs from IR")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Emit a program for one or more targets.
    Generate {
        /// IR file (JSON).
        input: PathBuf,

        /// Target language; repeatable. Defaults to the configured targets.
        #[arg(short, long = "target")]
        targets: Vec<Target>,

        /// Write `<stem>.<ext>` files here instead of printing.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Emit targets one after another.
        #[arg(long)]
        sequential: bool,
    },

    /// List compiled-in targets.
    Targets,

    /// Read and validate an IR file.
    Check {
        /// IR file (JSON).
        input: PathBuf,
    },
}

/// Reset SIGPIPE so piping into `head` ends quietly.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of a single signal.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("POLYGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    reset_sigpipe();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Generate {
            input,
            targets,
            out_dir,
            sequential,
        } => cmd_generate(&input, targets, out_dir.as_deref(), sequential),
        Command::Targets => {
            for emitter in emitters() {
                println!("{}\t.{}", emitter.target(), emitter.extension());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { input } => {
            let program = read_json_file(&input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            println!(
                "{}: {} nodes, {} comment blocks ({} lines)",
                input.display(),
                node_count(&program),
                program.comments.block_count(),
                program.comments.line_count()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_generate(
    input: &Path,
    targets: Vec<Target>,
    out_dir: Option<&Path>,
    sequential: bool,
) -> Result<ExitCode> {
    let root = std::env::current_dir().context("failed to read working directory")?;
    let config = PolygenConfig::load(&root);
    let program = read_json_file(input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    let targets = if targets.is_empty() {
        config.targets()
    } else {
        targets
    };
    let options = GenerateOptions {
        parallel: !sequential && config.parallel(),
        emit: EmitOptions {
            go: config.go_options(),
        },
    };
    let results = generate_with(&program, targets, &options);

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "main".to_string());
    let banner = results.len() > 1;
    let mut failed = false;

    for (target, result) in &results {
        let source = match result {
            Ok(source) => source,
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
                continue;
            }
        };
        match out_dir {
            Some(dir) => {
                let path = dir.join(format!("{stem}.{}", target.extension()));
                std::fs::write(&path, source)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(%target, path = %path.display(), "wrote");
            }
            None => {
                if banner {
                    println!("==> {target} <==");
                }
                print!("{source}");
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
