use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use vitallm_generate::{GenerationConfig, SlmConfig};

#[derive(Args)]
pub struct ConfigArgs {
    /// Load the config from a JSON file (missing fields take defaults).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the model architecture config instead of the sampling config.
    #[arg(long)]
    model: bool,

    /// Override the maximum number of new tokens.
    #[arg(long, value_name = "N", conflicts_with = "model")]
    max_new_tokens: Option<usize>,

    /// Override the sampling temperature.
    #[arg(long, value_name = "T", conflicts_with = "model")]
    temperature: Option<f32>,

    /// Override the top-k cutoff.
    #[arg(long, value_name = "K", conflicts_with = "model")]
    top_k: Option<usize>,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let json = if args.model {
        let config = match &args.file {
            Some(path) => SlmConfig::from_json_file(path)
                .with_context(|| format!("Invalid model config: {}", path.display()))?,
            None => SlmConfig::vital_lm_50m(),
        };
        serde_json::to_string_pretty(&config)?
    } else {
        let mut config = match &args.file {
            Some(path) => GenerationConfig::from_json_file(path)
                .with_context(|| format!("Invalid generation config: {}", path.display()))?,
            None => GenerationConfig::default(),
        };
        if let Some(n) = args.max_new_tokens {
            config.max_new_tokens = n;
        }
        if let Some(t) = args.temperature {
            config.temperature = t;
        }
        if let Some(k) = args.top_k {
            config.top_k = k;
        }
        config.validate().context("Invalid generation config")?;
        serde_json::to_string_pretty(&config)?
    };
    println!("{json}");
    Ok(())
}
