//! Sliding token window fed to the model.

use crate::api::error::{GenerateError, GenerateResult};

/// Ordered token sequence truncated to the model's block size.
///
/// Only the trailing `block_size` tokens are reachable. The backing buffer is
/// compacted once it holds twice that many, so appends stay O(1) amortized
/// and memory stays bounded.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    tokens: Vec<u32>,
    block_size: usize,
    total: usize,
}

impl ContextWindow {
    pub fn new(block_size: usize) -> GenerateResult<Self> {
        if block_size == 0 {
            return Err(GenerateError::Config("block_size must be > 0".into()));
        }
        Ok(Self {
            tokens: Vec::with_capacity(2 * block_size),
            block_size,
            total: 0,
        })
    }

    /// Window seeded with `tokens` (typically the encoded prompt).
    pub fn from_tokens(block_size: usize, tokens: &[u32]) -> GenerateResult<Self> {
        let mut window = Self::new(block_size)?;
        let keep = tokens.len().min(block_size);
        window.tokens.extend_from_slice(&tokens[tokens.len() - keep..]);
        window.total = tokens.len();
        Ok(window)
    }

    /// Append one token.
    pub fn advance(&mut self, token: u32) {
        if self.tokens.len() >= 2 * self.block_size {
            let drop = self.tokens.len() - self.block_size;
            self.tokens.drain(..drop);
        }
        self.tokens.push(token);
        self.total += 1;
    }

    /// The last `min(len, block_size)` tokens, oldest first.
    pub fn conditioning_slice(&self) -> &[u32] {
        let start = self.tokens.len().saturating_sub(self.block_size);
        &self.tokens[start..]
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of tokens appended over the window's lifetime.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
