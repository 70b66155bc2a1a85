//! Naive byte-level tokenizer for testing

use crate::api::error::{TokenizerError, TokenizerResult};
use crate::spi::contract::Tokenizer;

/// Naive byte-level tokenizer. Maps each byte to its value as a token ID.
///
/// There is no end-of-sequence token unless one is set with
/// [`ByteTokenizer::with_eos`]; a byte value used as eos still encodes and
/// decodes as that byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteTokenizer {
    eos: Option<u32>,
}

impl ByteTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eos(mut self, eos: u32) -> Self {
        self.eos = Some(eos);
        self
    }
}

impl Tokenizer for ByteTokenizer {
    fn encode(&self, text: &str) -> TokenizerResult<Vec<u32>> {
        Ok(text.bytes().map(|b| b as u32).collect())
    }

    fn decode(&self, tokens: &[u32]) -> TokenizerResult<String> {
        let bytes = tokens
            .iter()
            .map(|&t| {
                u8::try_from(t).map_err(|_| {
                    TokenizerError::TokenizerError(format!(
                        "token id {} out of range for byte vocabulary",
                        t
                    ))
                })
            })
            .collect::<TokenizerResult<Vec<u8>>>()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn vocab_size(&self) -> usize {
        256
    }

    fn token_to_id(&self, _token: &str) -> Option<u32> {
        None
    }

    fn eos_token_id(&self) -> Option<u32> {
        self.eos
    }
}
