//! Lightweight source scanning.
//!
//! No syntax tree is built: a logos lexer produces a flat token stream and
//! [`declared_symbol`] walks it looking for the first type declaration.

mod declaration;
mod lexer;

pub use declaration::{declared_symbol, extract_declared_symbol};
pub use lexer::{SyntaxKind, Token, tokenize};
