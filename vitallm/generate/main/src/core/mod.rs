pub mod cancel;
pub mod chat;
pub mod context;
pub mod generator;
pub mod prompt;
pub mod sampling;
pub mod stream;
