//! HuggingFace Tokenizer wrapper

use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};
use tokenizers::AddedToken;

use crate::api::error::{TokenizerError, TokenizerResult};
use crate::spi::contract::Tokenizer;

/// End-of-sequence marker used by GPT-2 style byte-level BPE vocabularies.
pub const DEFAULT_EOS_TOKEN: &str = "<|endoftext|>";

/// HuggingFace Tokenizer wrapper (uses the `tokenizers` crate).
///
/// Supports all tokenizer formats loadable by HuggingFace: BPE, SentencePiece,
/// WordPiece, etc. Load from a `tokenizer.json` file, or assemble a byte-level
/// BPE tokenizer from a `vocab.json` + `merges.txt` pair.
pub struct HFTokenizer {
    inner: tokenizers::Tokenizer,
    eos_token_id: Option<u32>,
}

impl HFTokenizer {
    /// Load from a `tokenizer.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TokenizerResult<Self> {
        let p = path.as_ref();
        let tokenizer = tokenizers::Tokenizer::from_file(p).map_err(|e| {
            TokenizerError::TokenizerError(format!(
                "Failed to load tokenizer file: {}: {}",
                p.display(),
                e
            ))
        })?;
        log::debug!(
            "loaded tokenizer {} (vocab={})",
            p.display(),
            tokenizer.get_vocab_size(true)
        );
        Ok(Self {
            inner: tokenizer,
            eos_token_id: None,
        })
    }

    /// Build a byte-level BPE tokenizer from a `vocab.json` (token -> id map)
    /// and a `merges.txt` (one space-separated pair per line).
    pub fn from_bpe_files<V: AsRef<Path>, M: AsRef<Path>>(
        vocab_path: V,
        merges_path: M,
    ) -> TokenizerResult<Self> {
        let vocab_path = vocab_path.as_ref();
        let merges_path = merges_path.as_ref();

        let vocab: Map<String, Value> = serde_json::from_str(&fs::read_to_string(vocab_path)?)?;
        let merges = parse_merges(&fs::read_to_string(merges_path)?);
        log::debug!(
            "assembling byte-level BPE from {} ({} entries) and {} ({} merges)",
            vocab_path.display(),
            vocab.len(),
            merges_path.display(),
            merges.len()
        );

        let definition = byte_level_bpe_definition(vocab, merges);
        let tokenizer = tokenizers::Tokenizer::from_bytes(definition.to_string()).map_err(|e| {
            TokenizerError::TokenizerError(format!(
                "Failed to build BPE tokenizer from {} and {}: {}",
                vocab_path.display(),
                merges_path.display(),
                e
            ))
        })?;
        Ok(Self {
            inner: tokenizer,
            eos_token_id: None,
        })
    }

    /// Mark `token` as the end-of-sequence token. The token must already be
    /// in the vocabulary; it is registered as special so it is never split.
    pub fn with_eos_token(mut self, token: &str) -> TokenizerResult<Self> {
        let id = self.inner.token_to_id(token).ok_or_else(|| {
            TokenizerError::TokenizerError(format!("eos token {:?} not in vocabulary", token))
        })?;
        self.inner
            .add_special_tokens(&[AddedToken::from(token.to_string(), true)]);
        self.eos_token_id = Some(id);
        Ok(self)
    }
}

fn parse_merges(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty() && !l.starts_with("#version"))
        .map(String::from)
        .collect()
}

/// `tokenizer.json` equivalent of a byte-level BPE tokenizer without a
/// post-processor.
fn byte_level_bpe_definition(vocab: Map<String, Value>, merges: Vec<String>) -> Value {
    let byte_level = json!({
        "type": "ByteLevel",
        "add_prefix_space": false,
        "trim_offsets": true,
        "use_regex": true
    });
    json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": byte_level.clone(),
        "post_processor": null,
        "decoder": byte_level,
        "model": {
            "type": "BPE",
            "dropout": null,
            "unk_token": null,
            "continuing_subword_prefix": null,
            "end_of_word_suffix": null,
            "fuse_unk": false,
            "byte_fallback": false,
            "vocab": vocab,
            "merges": merges
        }
    })
}

impl Tokenizer for HFTokenizer {
    fn encode(&self, text: &str) -> TokenizerResult<Vec<u32>> {
        let encoding = self.inner.encode(text, false).map_err(|e| {
            TokenizerError::TokenizerError(format!("Tokenizer encode failed: {}", e))
        })?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, tokens: &[u32]) -> TokenizerResult<String> {
        self.inner.decode(tokens, true).map_err(|e| {
            TokenizerError::TokenizerError(format!("Tokenizer decode failed: {}", e))
        })
    }

    fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }

    fn eos_token_id(&self) -> Option<u32> {
        self.eos_token_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merges_skips_header_and_blanks() {
        let merges = parse_merges("#version: 0.2\nĠ t\n\nh e\n");
        assert_eq!(merges, vec!["Ġ t".to_string(), "h e".to_string()]);
    }

    #[test]
    fn test_definition_is_byte_level_bpe() {
        let mut vocab = Map::new();
        vocab.insert("a".into(), json!(0));
        let def = byte_level_bpe_definition(vocab, vec![]);
        assert_eq!(def["model"]["type"], "BPE");
        assert_eq!(def["pre_tokenizer"]["type"], "ByteLevel");
        assert_eq!(def["decoder"]["type"], "ByteLevel");
        assert_eq!(def["model"]["vocab"]["a"], 0);
    }
}
