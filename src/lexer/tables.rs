//! Keyword and operator tables
//!
//! Each entry maps a textual form to the token it pushes and the state
//! the lexer transitions to. A `TokenType::None` entry pushes nothing.
//! Multi-character operators are built from characters that are
//! operators on their own, so the maximal-munch scan in the operator
//! state can extend greedily and fall back to the single character.

use crate::types::{map_builtin_type, VariableType};

use super::token::TokenType;
use super::LexerState;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableEntry {
    pub token: TokenType,
    pub next: LexerState,
}

const fn entry(token: TokenType, next: LexerState) -> TableEntry {
    TableEntry { token, next }
}

pub(crate) fn keyword_entry(word: &str) -> Option<TableEntry> {
    let e = match word {
        "function" => entry(TokenType::None, LexerState::FunctionName),
        "struct" => entry(TokenType::None, LexerState::StructName),
        "return" => entry(TokenType::ReturnKeyword, LexerState::RValue),
        // Type keywords come from the shared builtin name table; each
        // opens a declaration.
        _ => entry(data_type_token(map_builtin_type(word)?), LexerState::VariableName),
    };
    Some(e)
}

fn data_type_token(ty: VariableType) -> TokenType {
    match ty {
        VariableType::Int8 => TokenType::Int8Type,
        VariableType::Int16 => TokenType::Int16Type,
        VariableType::Int32 => TokenType::Int32Type,
        VariableType::Int64 => TokenType::Int64Type,
        VariableType::Uint8 => TokenType::Uint8Type,
        VariableType::Uint16 => TokenType::Uint16Type,
        VariableType::Uint32 => TokenType::Uint32Type,
        VariableType::Uint64 => TokenType::Uint64Type,
        VariableType::Float32 => TokenType::Float32Type,
        VariableType::Float64 => TokenType::Float64Type,
        VariableType::Bool => TokenType::BoolType,
        VariableType::String => TokenType::StringType,
        VariableType::None => TokenType::VoidType,
        // The builtin name table never yields a user-defined tag.
        VariableType::UserDefinedType => TokenType::None,
    }
}

pub(crate) fn operator_entry(text: &str) -> Option<TableEntry> {
    let e = match text {
        "=" => entry(TokenType::Assign, LexerState::RValue),
        "+" => entry(TokenType::AddOp, LexerState::RValue),
        "-" => entry(TokenType::SubOp, LexerState::RValue),
        "*" => entry(TokenType::None, LexerState::AsterisksOperator),
        "/" => entry(TokenType::DivOp, LexerState::RValue),
        "%" => entry(TokenType::ModOp, LexerState::RValue),
        "==" => entry(TokenType::EqOp, LexerState::RValue),
        "<" => entry(TokenType::LessOp, LexerState::RValue),
        "<=" => entry(TokenType::LessEqOp, LexerState::RValue),
        ">" => entry(TokenType::GreaterOp, LexerState::RValue),
        ">=" => entry(TokenType::GreaterEqOp, LexerState::RValue),
        "->" => entry(TokenType::Arrow, LexerState::ArrowState),
        "//" => entry(TokenType::None, LexerState::Comment),
        "/*" => entry(TokenType::None, LexerState::MultilineComment),
        _ => return None,
    };
    Some(e)
}

pub(crate) fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '+' | '-' | '*' | '/' | '%' | '<' | '>')
}

/// Characters that may appear in an identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Horizontal whitespace. Newlines are line terminators, never spaces.
pub(crate) fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}
