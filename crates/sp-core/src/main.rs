//! Sysprober - point-in-time host fact probes.
//!
//! The main entry point, handling:
//! - Probing memory statistics from the kernel meminfo source
//! - Probing package-manager executable presence
//! - Rendering snapshots as JSON, text, or a one-line summary

use clap::{Args, Parser, Subcommand};
use sp_common::{error::format_error_human, Error, OutputFormat};
use sp_core::logging::init_logging;
use sp_core::probe::{Memory, MeminfoProber, PkgManager, ToolAvailability};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Sysprober - read-only host inventory probes
#[derive(Parser)]
#[command(name = "sysprober")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the meminfo source file
    #[arg(long, global = true, env = "SYSPROBER_MEMINFO")]
    meminfo: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe kernel memory statistics
    Memory,

    /// Probe package-manager executable presence
    Pkg,

    /// Probe all fact domains
    All,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(&cli) {
        let use_color = std::io::stderr().is_terminal();
        eprintln!("{}", format_error_human(&err, use_color));
        std::process::exit(err.code() as i32);
    }
}

fn run(cli: &Cli) -> sp_common::Result<()> {
    let format = cli.global.format;

    match cli.command {
        Commands::Memory => {
            let memory = probe_memory(cli)?;
            print_memory(&memory, format)?;
        }
        Commands::Pkg => {
            let pkg = PkgManager::new()?;
            print_pkg(&pkg, format)?;
        }
        Commands::All => {
            let memory = probe_memory(cli)?;
            let pkg = PkgManager::new()?;
            print_all(&memory, &pkg, format)?;
        }
    }

    Ok(())
}

fn probe_memory(cli: &Cli) -> sp_common::Result<Memory> {
    let prober = match &cli.global.meminfo {
        Some(path) => MeminfoProber::with_path(path),
        None => MeminfoProber::new(),
    };
    Memory::with_prober(prober)
}

fn print_memory(memory: &Memory, format: OutputFormat) -> Result<(), Error> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "unit": Memory::UNIT,
                "memory": memory.snapshot(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            for (name, value) in memory.snapshot() {
                println!("{name:<24} {value:>16} {}", Memory::UNIT);
            }
        }
        OutputFormat::Summary => {
            println!(
                "mem: total={} free={} available={} swap_total={} ({})",
                fmt_opt(memory.mem_total()),
                fmt_opt(memory.mem_free()),
                fmt_opt(memory.mem_available()),
                fmt_opt(memory.swap_total()),
                Memory::UNIT,
            );
        }
    }
    Ok(())
}

fn print_pkg(pkg: &PkgManager, format: OutputFormat) -> Result<(), Error> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(pkg.raw())?);
        }
        OutputFormat::Text => {
            for (group, tools) in pkg.raw() {
                println!("{group}:");
                for (tool, present) in tools {
                    println!("  {tool:<12} {}", if *present { "present" } else { "absent" });
                }
            }
        }
        OutputFormat::Summary => {
            let parts: Vec<String> = pkg
                .raw()
                .iter()
                .map(|(group, tools)| format!("{group}: {}", summarize_group(tools)))
                .collect();
            println!("pkg: {}", parts.join("; "));
        }
    }
    Ok(())
}

fn print_all(memory: &Memory, pkg: &PkgManager, format: OutputFormat) -> Result<(), Error> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "unit": Memory::UNIT,
                "memory": memory.snapshot(),
                "pkg": pkg.raw(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text | OutputFormat::Summary => {
            print_memory(memory, format)?;
            print_pkg(pkg, format)?;
        }
    }
    Ok(())
}

fn summarize_group(tools: &ToolAvailability) -> String {
    let present = tools.values().filter(|p| **p).count();
    format!("{present}/{} present", tools.len())
}

fn fmt_opt(value: Option<u64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
