pub mod byte;
pub mod hf;
