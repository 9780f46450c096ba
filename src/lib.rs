//! Slate compiler: front end for an indentation-sensitive, statically
//! typed source language
//!
//! # Architecture
//! - `types`: Cross-cutting type system used across all compilation phases
//! - `lexer`: Tokenization (state machine with indentation tracking)
//! - `ast`: Abstract syntax tree node model
//! - `ir`: Typed intermediate representation and AST lowering
//! - `driver`: Compilation orchestration and I/O

// Core compiler modules
pub mod types;
pub mod ast;
pub mod lexer;
pub mod ir;
pub mod driver;
