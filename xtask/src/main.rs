use anyhow::Result;
use clap::{Parser, Subcommand};
use imagefilter::dithering::threshold::ThresholdMap;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for imagefilter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the threshold maps used by ordered dithering
    GenerateMatrices {
        /// Only print the map of this size
        #[arg(short, long)]
        size: Option<usize>,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateMatrices { size } => generate_matrices(size),
        Commands::Ci => ci(),
    }
}

/// Dump threshold maps in a copy-pasteable form, sizes 2 to 8 by default.
fn generate_matrices(size: Option<usize>) -> Result<()> {
    let sizes = match size {
        Some(size) => size..=size,
        None => 2..=8,
    };
    for size in sizes {
        let map = ThresholdMap::generate(size)?;
        println!("// {0}x{0}", size);
        print!("{}", map);
        println!();
    }
    Ok(())
}

/// can run benches, tests, bundle reports and so on...
fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
            "-A",
            "clippy::needless_range_loop",
        ],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
