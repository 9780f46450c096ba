//! Token model
//!
//! A token is a kind plus the verbatim source lexeme. Structural tokens
//! (indentation markers, line ends, parameter bookends) carry an empty
//! data field. Numeric literals written in binary or hex carry their
//! decimal-normalised text.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    None,
    VariableName,
    VariableReference,
    FunctionName,
    FunctionCall,
    FunctionType,
    StructName,
    Lambda,
    RValueNumber,
    RValueString,
    RValueChar,
    OpenBracket,
    CloseBracket,
    StartIndentation,
    EndIndentation,
    StartFunctionParameters,
    EndFunctionParameters,
    Comma,
    EndLine,
    IndexOperator,
    PointerDef,
    StaticArrayDef,
    DynamicArrayDef,
    DereferenceOp,
    MulOp,
    SubOp,
    AddOp,
    DivOp,
    ModOp,
    EqOp,
    LessOp,
    LessEqOp,
    GreaterOp,
    GreaterEqOp,
    Assign,
    Arrow,
    ReturnKeyword,
    Int8Type,
    Int16Type,
    Int32Type,
    Int64Type,
    Uint8Type,
    Uint16Type,
    Uint32Type,
    Uint64Type,
    Float32Type,
    Float64Type,
    BoolType,
    StringType,
    VoidType,
}

impl TokenType {
    /// Primitive type keywords introduce declarations; the variable-name
    /// state uses this to tell declarators apart from operators.
    pub fn is_data_type(self) -> bool {
        matches!(
            self,
            TokenType::Int8Type
                | TokenType::Int16Type
                | TokenType::Int32Type
                | TokenType::Int64Type
                | TokenType::Uint8Type
                | TokenType::Uint16Type
                | TokenType::Uint32Type
                | TokenType::Uint64Type
                | TokenType::Float32Type
                | TokenType::Float64Type
                | TokenType::BoolType
                | TokenType::StringType
                | TokenType::VoidType
        )
    }

    /// Tokens after which a `*` reads as multiplication rather than a
    /// dereference.
    pub fn closes_value(self) -> bool {
        matches!(
            self,
            TokenType::VariableReference
                | TokenType::RValueChar
                | TokenType::RValueNumber
                | TokenType::RValueString
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub data: String,
}

impl Token {
    pub fn new(token_type: TokenType, data: impl Into<String>) -> Self {
        Self {
            token_type,
            data: data.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            write!(f, "{:?}", self.token_type)
        } else {
            write!(f, "{:?}({:?})", self.token_type, self.data)
        }
    }
}
