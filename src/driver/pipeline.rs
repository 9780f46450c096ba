//! File-to-token-stream pipeline
//!
//! Reads a whole source file into memory, tokenizes it, and renders
//! listings. Any failure is fatal to the compilation; the binary
//! reports it and exits.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::lexer::{LexError, Lexer, Token};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Read and tokenize a source file.
pub fn tokenize_file(path: &Path) -> Result<Vec<Token>, PipelineError> {
    let source = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Lexer::tokenize(&source)?)
}

/// Render tokens one per line for listings and debugging.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{token}");
    }
    out
}
