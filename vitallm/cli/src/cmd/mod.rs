pub mod backend;
pub mod config;
pub mod prompt;
pub mod tokenizer;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Encode, decode, and inspect tokenizer vocabularies.
    Tokenizer(tokenizer::TokenizerArgs),

    /// Compose the model prompt for a single chat turn.
    Prompt(prompt::PromptArgs),

    /// Validate and print sampling or model configuration.
    Config(config::ConfigArgs),
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tokenizer(args) => tokenizer::run(args),
        Command::Prompt(args) => prompt::run(args),
        Command::Config(args) => config::run(args),
    }
}
