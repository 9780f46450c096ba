//! Built-in primitive type names
//!
//! Maps the textual type keywords of the source language to their
//! `VariableType` tags. The lexer's keyword table resolves type
//! keywords through this, so the name set lives in one place.

use super::abstract_type::VariableType;

pub fn map_builtin_type(name: &str) -> Option<VariableType> {
    match name {
        "int8" => Some(VariableType::Int8),
        "int16" => Some(VariableType::Int16),
        "int32" => Some(VariableType::Int32),
        "int64" => Some(VariableType::Int64),
        "uint8" => Some(VariableType::Uint8),
        "uint16" => Some(VariableType::Uint16),
        "uint32" => Some(VariableType::Uint32),
        "uint64" => Some(VariableType::Uint64),
        "float32" => Some(VariableType::Float32),
        "float64" => Some(VariableType::Float64),
        "bool" => Some(VariableType::Bool),
        "string" => Some(VariableType::String),
        "void" => Some(VariableType::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_their_tags() {
        assert_eq!(map_builtin_type("int32"), Some(VariableType::Int32));
        assert_eq!(map_builtin_type("uint8"), Some(VariableType::Uint8));
        assert_eq!(map_builtin_type("float64"), Some(VariableType::Float64));
        assert_eq!(map_builtin_type("void"), Some(VariableType::None));
    }

    #[test]
    fn unknown_and_differently_cased_names_are_rejected() {
        assert_eq!(map_builtin_type("Int32"), None);
        assert_eq!(map_builtin_type("i32"), None);
        assert_eq!(map_builtin_type(""), None);
    }
}
