//! headfix-core: token stream primitives for header synchronization
//!
//! This crate provides the mutable token sequence that the header fixer
//! operates on. The host formatting engine owns one [`TokenStream`] per file;
//! the fixer only uses the search/insert/clear primitives exposed here and
//! never touches anything past the file's prefix region.

mod stream;
mod token;

pub use stream::TokenStream;
pub use token::{Token, TokenKind};
