//! # VitalLM Tokenizer
//!
//! Tokenizer contract used by the generation engine, plus two implementations:
//! - [`ByteTokenizer`]: one token per byte, for tests and debugging
//! - [`HFTokenizer`]: HuggingFace `tokenizers` wrapper, loadable from a
//!   `tokenizer.json` or from a byte-level BPE `vocab.json` + `merges.txt` pair
//!
//! ```rust,ignore
//! use vitallm_tokenizer::{HFTokenizer, Tokenizer};
//!
//! let tokenizer = HFTokenizer::from_bpe_files("vocab_50m.json", "merges_50m.txt")?
//!     .with_eos_token("<|endoftext|>")?;
//! let ids = tokenizer.encode("Patient: I have a cough")?;
//! assert_eq!(tokenizer.decode(&ids)?, "Patient: I have a cough");
//! ```

pub mod api;
pub(crate) mod core;
mod saf;
pub mod spi;

pub use saf::*;
