use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use super::backend::{Backend, EosArgs};

#[derive(Args)]
pub struct TokenizerArgs {
    #[command(flatten)]
    backend: Backend,

    #[command(flatten)]
    eos: EosArgs,

    #[command(subcommand)]
    command: TokenizerCommand,
}

#[derive(Subcommand)]
enum TokenizerCommand {
    /// Encode text into token IDs.
    Encode {
        /// Text to encode (reads from stdin if omitted and --file not given).
        text: Option<String>,

        /// Read input text from a file.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Output token IDs as a JSON array instead of space-separated.
        #[arg(long)]
        json: bool,
    },

    /// Decode token IDs back into text.
    Decode {
        /// Token IDs to decode (reads from stdin if omitted and --file not given).
        ids: Vec<u32>,

        /// Read token IDs from a file (whitespace-separated).
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Display tokenizer info (vocab size, eos, token lookups).
    Info {
        /// Look up specific tokens and print their IDs.
        #[arg(long, value_name = "TOKEN")]
        lookup: Vec<String>,
    },
}

fn read_text(text: Option<&str>, file: Option<&PathBuf>) -> Result<String> {
    if let Some(t) = text {
        Ok(t.to_string())
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    } else {
        eprintln!("Reading from stdin...");
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    }
}

fn read_ids(ids: &[u32], file: Option<&PathBuf>) -> Result<Vec<u32>> {
    if !ids.is_empty() {
        return Ok(ids.to_vec());
    }

    let raw = if let Some(path) = file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?
    } else {
        eprintln!("Reading IDs from stdin...");
        let mut buf = String::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            buf.push_str(&line);
            buf.push(' ');
        }
        buf
    };

    raw.split_whitespace()
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("Invalid token ID: {s}"))
        })
        .collect()
}

pub(crate) fn format_ids(ids: &[u32], json: bool) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(if json { ", " } else { " " });
    if json { format!("[{joined}]") } else { joined }
}

pub fn run(args: TokenizerArgs) -> Result<()> {
    let Some(tokenizer) = args.backend.load(&args.eos)? else {
        bail!("No tokenizer backend specified (use --byte, --hf or --bpe)");
    };

    match &args.command {
        TokenizerCommand::Encode { text, file, json } => {
            let input = read_text(text.as_deref(), file.as_ref())?;
            let ids = tokenizer.encode(&input)?;
            println!("{}", format_ids(&ids, *json));
        }

        TokenizerCommand::Decode { ids, file } => {
            let token_ids = read_ids(ids, file.as_ref())?;
            let text = tokenizer.decode(&token_ids)?;
            print!("{text}");
        }

        TokenizerCommand::Info { lookup } => {
            println!("Vocab size: {}", tokenizer.vocab_size());
            match tokenizer.eos_token_id() {
                Some(id) => println!("EOS id: {id}"),
                None => println!("EOS id: (none)"),
            }

            for token in lookup {
                match tokenizer.token_to_id(token) {
                    Some(id) => println!("  {token} -> {id}"),
                    None => println!("  {token} -> (not found)"),
                }
            }
        }
    }

    Ok(())
}
