//! Cross-cutting type system for the Slate compiler
//!
//! Type definitions and utilities used across all compilation phases.
//! The lexer's keyword tables, the AST node payloads, and IR lowering
//! all share these types.

mod abstract_type;
mod builtins;

// Re-export all public types
pub use abstract_type::{AbstractType, Parameter, TypeKind, VariableType};
pub use builtins::map_builtin_type;
