// prockit-cli/src/main.rs
//
// This file defines the command-line interface (CLI) for the Prockit
// process orchestration toolkit. It uses the `clap` crate to parse
// command-line arguments for the 'run', 'capture' and 'divide-memory'
// operations.
//
// Responsibilities include:
// - Defining CLI argument structures (`Cli`, `Commands`, `RunArgs`, ...).
// - Parsing user-provided arguments.
// - Applying temporary environment overrides around child commands.
// - Invoking the core logic (`prockit_core`).
// - Managing process exit codes based on success or failure. The library
//   only returns errors; this entry point owns the decision to abort, so
//   a failure observed by one worker of a multi-worker caller stops the
//   entire process with status 1.

use clap::{Parser, Subcommand};
use prockit_core::{command_stdout, divide_memory, log_message, run_command, CoreResult, ScopedEnv};
use std::io::Write;
use std::path::PathBuf;
use std::process;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Prockit: process orchestration helpers",
    long_about = "Runs shell commands with per-invocation log files and divides \
                  memory-size strings across parallel workers, via the prockit-core library."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a shell command, logging its stderr to a file
    Run(RunArgs),
    /// Runs a shell command, printing its captured stdout
    Capture(RunArgs),
    /// Divides a memory-size string evenly across N partitions
    DivideMemory(DivideMemoryArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Shell command to execute (quote it; pipes and globs are interpreted)
    #[arg(required = true, value_name = "COMMAND")]
    command: String,

    /// Log file receiving the command's stderr plus header and trailer lines
    #[arg(short, long, value_name = "LOG_FILE")]
    log: PathBuf,

    /// Trace the invocation on stderr before running it
    #[arg(short, long)]
    verbose: bool,

    /// Temporary KEY=VALUE environment overrides, restored after the command
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,
}

#[derive(Parser, Debug)]
struct DivideMemoryArgs {
    /// Total memory-size string, e.g. 10G, 500M, 50% or a bare byte count
    #[arg(required = true, value_name = "TOTAL")]
    total: String,

    /// Number of partitions to divide the total across
    #[arg(required = true, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    partitions: u64,
}

/// Parses a KEY=VALUE pair for --env. The key must be non-empty; the value
/// may be empty ("KEY=" sets an empty string).
fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

// --- Command Implementations ---

fn run_run(args: RunArgs) -> CoreResult<()> {
    let _env = ScopedEnv::new(args.env);
    run_command(&args.command, &args.log, args.verbose)
}

fn run_capture(args: RunArgs) -> CoreResult<()> {
    let _env = ScopedEnv::new(args.env);
    let output = command_stdout(&args.command, &args.log, args.verbose)?;
    print!("{}", output);
    std::io::stdout().flush()?;
    Ok(())
}

fn run_divide_memory(args: DivideMemoryArgs) -> CoreResult<()> {
    println!("{}", divide_memory(&args.total, args.partitions)?);
    Ok(())
}

/// Prints a program-prefixed message to stderr and terminates the whole
/// process with status 1, without unwinding any other thread's stack.
fn exit_program(message: &str) -> ! {
    log_message(message);
    process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("parsed command: {:?}", cli.command);

    let result = match cli.command {
        Commands::Run(args) => run_run(args),
        Commands::Capture(args) => run_capture(args),
        Commands::DivideMemory(args) => run_divide_memory(args),
    };

    if let Err(e) = result {
        exit_program(&e.to_string());
    }
}
