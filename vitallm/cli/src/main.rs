mod cmd;

use anyhow::Result;
use clap::Parser;

/// VitalLM command-line tooling for tokenizers, prompts and sampling config.
#[derive(Parser)]
#[command(name = "vitallm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: cmd::Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cmd::run(cli.command)
}
