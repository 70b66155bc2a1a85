//! # VitalLM Generate
//!
//! Autoregressive token generation for small decoder-only language models.
//!
//! This crate provides:
//! - Prompt composition for single-turn chat (`PromptTemplate`)
//! - A sliding context window bounded by the model's block size (`ContextWindow`)
//! - Temperature + tie-inclusive top-k sampling with an injectable RNG (`sample`)
//! - A lazy, cancellable decode loop yielding cumulative text (`Generator`, `Generation`)
//! - Channel streaming from a producer thread (`spawn_stream`) and an
//!   in-memory chat transcript (`ChatSession`)
//!
//! The model and tokenizer are external collaborators behind the
//! `SequenceModel` and `Tokenizer` traits.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vitallm_generate::{GenerationConfig, Generator, compose_prompt, DEFAULT_SYSTEM_PROMPT};
//! use vitallm_tokenizer::HFTokenizer;
//!
//! let tokenizer = HFTokenizer::from_bpe_files("vocab_50m.json", "merges_50m.txt")?
//!     .with_eos_token("<|endoftext|>")?;
//! let model = load_model()?; // any SequenceModel
//!
//! let generator = Generator::new(&model, &tokenizer);
//! let prompt = compose_prompt(DEFAULT_SYSTEM_PROMPT, "I have a persistent cough.");
//! for text in generator.generate(&prompt, &GenerationConfig::default(), StdRng::seed_from_u64(0))? {
//!     println!("{}", text?);
//! }
//! ```

pub mod api;
pub(crate) mod core;
mod saf;

pub use saf::*;
