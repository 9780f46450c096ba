use pretty_assertions::assert_eq;
use slate_compiler::lexer::{Lexer, Token, TokenType};

fn lex_str(s: &str) -> Vec<Token> {
    Lexer::tokenize(s).expect("tokenize failed")
}

fn tok(token_type: TokenType, data: &str) -> Token {
    Token::new(token_type, data)
}

#[test]
fn declaration_and_assignment_tokens() {
    let tokens = lex_str("int32 x\nx = 3 + 4\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::VariableName, "x"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "3"),
        tok(TokenType::AddOp, "+"),
        tok(TokenType::RValueNumber, "4"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn pointer_declaration_tokens() {
    let tokens = lex_str("int32* p\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::PointerDef, "*"),
        tok(TokenType::VariableName, "p"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn asterisk_after_value_is_multiplication() {
    let tokens = lex_str("x * y\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::MulOp, "*"),
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn asterisk_at_statement_start_is_dereference() {
    let tokens = lex_str("*p\n");
    let expected = vec![
        tok(TokenType::DereferenceOp, ""),
        tok(TokenType::VariableReference, "p"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn unspaced_multiplication() {
    let tokens = lex_str("x*y\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::MulOp, "*"),
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn hex_and_binary_literals_normalise_to_decimal() {
    let tokens = lex_str("y = 0xFF\ny = 0b1010\n");
    let expected = vec![
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "255"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "10"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn indentation_rise_and_fall() {
    let tokens = lex_str("x = 1\n    y = 2\n        z = 3\nw = 4\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::StartIndentation, ""),
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::StartIndentation, ""),
        tok(TokenType::VariableReference, "z"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "3"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::EndIndentation, ""),
        tok(TokenType::EndIndentation, ""),
        tok(TokenType::VariableReference, "w"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "4"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn function_definition_and_call() {
    let tokens = lex_str("function f(int32 a) -> int32:\n    return a + 1\nf(2)\n");
    let expected = vec![
        tok(TokenType::FunctionName, "f"),
        tok(TokenType::StartFunctionParameters, ""),
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::VariableName, "a"),
        tok(TokenType::EndFunctionParameters, ""),
        tok(TokenType::Arrow, "->"),
        tok(TokenType::FunctionType, "int32"),
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::StartIndentation, ""),
        tok(TokenType::ReturnKeyword, "return"),
        tok(TokenType::VariableReference, "a"),
        tok(TokenType::AddOp, "+"),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::EndIndentation, ""),
        tok(TokenType::FunctionCall, "f"),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn call_with_multiple_arguments() {
    let tokens = lex_str("f(1, 2)\n");
    let expected = vec![
        tok(TokenType::FunctionCall, "f"),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::Comma, ""),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn nested_call_arguments_do_not_split() {
    let tokens = lex_str("f(g(1), 2)\n");
    let expected = vec![
        tok(TokenType::FunctionCall, "f"),
        tok(TokenType::FunctionCall, "g"),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::Comma, ""),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn comparison_operators() {
    let tokens = lex_str("x = a <= b\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::VariableReference, "a"),
        tok(TokenType::LessEqOp, "<="),
        tok(TokenType::VariableReference, "b"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn equality_prefers_maximal_munch_over_assign() {
    let tokens = lex_str("x = a == b\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::VariableReference, "a"),
        tok(TokenType::EqOp, "=="),
        tok(TokenType::VariableReference, "b"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn negative_number_after_assign() {
    let tokens = lex_str("x = -5\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "-5"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn lone_minus_falls_back_to_sub_op() {
    let tokens = lex_str("x = - 5\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::SubOp, "-"),
        tok(TokenType::RValueNumber, "5"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn subtraction_between_values() {
    let tokens = lex_str("x = a - 4\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::VariableReference, "a"),
        tok(TokenType::SubOp, "-"),
        tok(TokenType::RValueNumber, "4"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn struct_declaration_tokens() {
    let tokens = lex_str("struct Vec2:\n    float32 x, y\n");
    let expected = vec![
        tok(TokenType::StructName, "Vec2"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::StartIndentation, ""),
        tok(TokenType::Float32Type, "float32"),
        tok(TokenType::VariableName, "x"),
        tok(TokenType::Comma, ""),
        tok(TokenType::VariableName, "y"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::EndIndentation, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn lambda_header_tokens() {
    let tokens = lex_str("function (int32 a) -> int32:\n    return a\n");
    let expected = vec![
        tok(TokenType::Lambda, ""),
        tok(TokenType::StartFunctionParameters, ""),
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::VariableName, "a"),
        tok(TokenType::EndFunctionParameters, ""),
        tok(TokenType::Arrow, "->"),
        tok(TokenType::FunctionType, "int32"),
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::StartIndentation, ""),
        tok(TokenType::ReturnKeyword, "return"),
        tok(TokenType::VariableReference, "a"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::EndIndentation, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn index_operator_tokens() {
    let tokens = lex_str("x[1]\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::IndexOperator, ""),
        tok(TokenType::OpenBracket, "["),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::CloseBracket, "]"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn variable_name_list_tokens() {
    let tokens = lex_str("int32 x, y\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::VariableName, "x"),
        tok(TokenType::Comma, ""),
        tok(TokenType::VariableName, "y"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}
