use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use vitallm_tokenizer::{ByteTokenizer, DEFAULT_EOS_TOKEN, HFTokenizer, Tokenizer};

/// Tokenizer backend selection (at most one).
#[derive(Args)]
#[group(required = false, multiple = false)]
pub struct Backend {
    /// Load tokenizer from a HuggingFace tokenizer.json file.
    #[arg(long, value_name = "PATH")]
    hf: Option<PathBuf>,

    /// Load byte-level BPE tokenizer from vocab.json and merges.txt files.
    #[arg(long, value_names = ["VOCAB", "MERGES"], num_args = 2)]
    bpe: Option<Vec<PathBuf>>,

    /// Use the trivial byte-level tokenizer (maps each byte to its value).
    #[arg(long)]
    byte: bool,
}

/// End-of-sequence handling shared by every backend.
#[derive(Args)]
pub struct EosArgs {
    /// End-of-sequence token for --hf/--bpe backends.
    #[arg(long, value_name = "TOKEN", default_value = DEFAULT_EOS_TOKEN)]
    eos: String,

    /// Do not register an end-of-sequence token.
    #[arg(long, conflicts_with = "eos")]
    no_eos: bool,
}

impl Backend {
    pub fn is_selected(&self) -> bool {
        self.hf.is_some() || self.bpe.is_some() || self.byte
    }

    /// Load the selected backend, or `None` when no backend flag was given.
    pub fn load(&self, eos: &EosArgs) -> Result<Option<Box<dyn Tokenizer>>> {
        let tokenizer: Box<dyn Tokenizer> = if let Some(path) = &self.hf {
            eprintln!("Loading HuggingFace tokenizer from {}", path.display());
            let tok = HFTokenizer::from_file(path)
                .with_context(|| format!("Failed to load HF tokenizer: {}", path.display()))?;
            Box::new(with_eos(tok, eos)?)
        } else if let Some(paths) = &self.bpe {
            let vocab = &paths[0];
            let merges = &paths[1];
            eprintln!(
                "Loading BPE tokenizer from {} and {}",
                vocab.display(),
                merges.display()
            );
            let tok = HFTokenizer::from_bpe_files(vocab, merges)
                .with_context(|| "Failed to load BPE tokenizer")?;
            Box::new(with_eos(tok, eos)?)
        } else if self.byte {
            eprintln!("Using byte-level tokenizer");
            Box::new(ByteTokenizer::new())
        } else {
            return Ok(None);
        };
        Ok(Some(tokenizer))
    }
}

fn with_eos(tok: HFTokenizer, eos: &EosArgs) -> Result<HFTokenizer> {
    if eos.no_eos {
        return Ok(tok);
    }
    tok.with_eos_token(&eos.eos)
        .with_context(|| format!("Failed to register eos token {:?}", eos.eos))
}
