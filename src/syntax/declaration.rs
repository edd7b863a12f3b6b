//! Declared-symbol extraction.
//!
//! Finds the first type declared by a source file without parsing it: the
//! token stream is scanned for a `namespace` declaration and the first
//! `class`, `interface`, `trait` or `enum` declaration that follows.

use std::fs;
use std::path::Path;

use super::lexer::{SyntaxKind, Token, tokenize};
use crate::base::{NAMESPACE_SEPARATOR, SymbolName};

/// Extract the first declared symbol of a file.
///
/// Returns `None` when the file does not exist or cannot be read, when it
/// declares no type, or when it returns a value before declaring one.
pub fn extract_declared_symbol(path: &Path) -> Option<SymbolName> {
    if !path.is_file() {
        return None;
    }
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::trace!(path = %path.display(), %error, "unreadable source file");
            return None;
        }
    };
    declared_symbol(&String::from_utf8_lossy(&bytes))
}

/// Extract the first declared symbol from source text.
pub fn declared_symbol(source: &str) -> Option<SymbolName> {
    let tokens = tokenize(source);
    let mut namespace = String::new();
    let mut idx = 0;

    while idx < tokens.len() {
        let token = tokens[idx];
        match token.kind {
            SyntaxKind::Namespace => {
                namespace.clear();
                idx += 1;
                while let Some(next) = tokens.get(idx) {
                    match next.kind {
                        SyntaxKind::Name => {
                            namespace.push(NAMESPACE_SEPARATOR);
                            namespace.push_str(next.text);
                        }
                        SyntaxKind::LBrace | SyntaxKind::Semicolon => break,
                        _ => {}
                    }
                    idx += 1;
                }
            }
            SyntaxKind::Return => return None,
            kind if kind.is_type_keyword() => {
                if let Some(local) = declaration_name(&tokens, idx) {
                    return Some(SymbolName::qualified(&namespace, local));
                }
            }
            _ => {}
        }
        idx += 1;
    }

    None
}

/// The declared name for the type keyword at `idx`, if it opens a real
/// declaration: not `new class`, followed by a plain name and later by a
/// block.
fn declaration_name<'a>(tokens: &[Token<'a>], idx: usize) -> Option<&'a str> {
    if idx > 0 && tokens[idx - 1].kind == SyntaxKind::New {
        return None;
    }
    let name = tokens.get(idx + 1)?;
    if name.kind != SyntaxKind::Name || name.text.contains(NAMESPACE_SEPARATOR) {
        return None;
    }
    tokens[idx + 1..]
        .iter()
        .any(|t| t.kind == SyntaxKind::LBrace)
        .then_some(name.text)
}
