//! Public configuration and result types

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::error::{GenerateError, GenerateResult};

/// Per-call sampling parameters. Immutable for the duration of a call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum number of new tokens to generate (> 0)
    pub max_new_tokens: usize,
    /// Temperature for sampling (> 0). Lower is more focused, higher is more random.
    pub temperature: f32,
    /// Top-k sampling: keep only the k highest-scored tokens (ties at the cutoff included).
    /// Values above the vocabulary size behave like the vocabulary size.
    pub top_k: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            temperature: 0.4,
            top_k: 40,
        }
    }
}

impl GenerationConfig {
    pub fn new(max_new_tokens: usize, temperature: f32, top_k: usize) -> Self {
        Self {
            max_new_tokens,
            temperature,
            top_k,
        }
    }

    /// Load a config from a JSON file. Missing fields take their default value.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> GenerateResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters the decode loop cannot run with.
    pub fn validate(&self) -> GenerateResult<()> {
        if self.max_new_tokens == 0 {
            return Err(GenerateError::Config("max_new_tokens must be > 0".into()));
        }
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(GenerateError::Config(format!(
                "temperature must be a finite value > 0.0, got {}",
                self.temperature
            )));
        }
        if self.top_k == 0 {
            return Err(GenerateError::Config("top_k must be > 0".into()));
        }
        Ok(())
    }
}

/// Architecture hyper-parameters of a small decoder-only language model.
///
/// The decode loop only reads `block_size` and `vocab_size`; the rest is
/// carried for model builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlmConfig {
    /// Vocabulary size
    pub vocab_size: usize,
    /// Number of transformer layers
    pub n_layer: usize,
    /// Number of attention heads
    pub n_head: usize,
    /// Embedding dimension
    pub n_embd: usize,
    /// Maximum sequence length (context window)
    pub block_size: usize,
    #[serde(default)]
    pub dropout: f32,
}

impl SlmConfig {
    /// VitalLM 50M: 10 layers, 8 heads, 512 embed, 16384 vocab, 256 context.
    pub fn vital_lm_50m() -> Self {
        Self {
            vocab_size: 16384,
            n_layer: 10,
            n_head: 8,
            n_embd: 512,
            block_size: 256,
            dropout: 0.0,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> GenerateResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GenerateResult<()> {
        if self.vocab_size == 0 {
            return Err(GenerateError::Config("vocab_size must be > 0".into()));
        }
        if self.block_size == 0 {
            return Err(GenerateError::Config("block_size must be > 0".into()));
        }
        if self.n_layer == 0 {
            return Err(GenerateError::Config("n_layer must be > 0".into()));
        }
        if self.n_head == 0 {
            return Err(GenerateError::Config("n_head must be > 0".into()));
        }
        if self.n_embd % self.n_head != 0 {
            return Err(GenerateError::Config(format!(
                "n_embd ({}) must be divisible by n_head ({})",
                self.n_embd, self.n_head
            )));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(GenerateError::Config(format!(
                "dropout must be in [0.0, 1.0), got {}",
                self.dropout
            )));
        }
        Ok(())
    }
}

impl Default for SlmConfig {
    fn default() -> Self {
        Self::vital_lm_50m()
    }
}

/// Lifecycle of one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Running,
    /// The model produced the end-of-sequence token.
    DoneEos,
    /// `max_new_tokens` tokens were produced.
    DoneMaxTokens,
    /// The caller cancelled (or its deadline passed) at a checkpoint.
    DoneCancelled,
    /// The model or tokenizer returned an error.
    Failed,
}

impl GenerationStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GenerationStatus::Running)
    }
}

/// Fully drained result of a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// Decoded text of every produced token except eos.
    pub text: String,
    /// Produced token IDs, including a final eos when generation stopped on it.
    pub tokens: Vec<u32>,
    pub status: GenerationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of an in-memory chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
