pub use crate::spi::contract::Tokenizer;
pub use crate::api::error::{TokenizerError, TokenizerResult};
pub use crate::core::hf::{HFTokenizer, DEFAULT_EOS_TOKEN};
pub use crate::core::byte::ByteTokenizer;
