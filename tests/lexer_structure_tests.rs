use pretty_assertions::assert_eq;
use slate_compiler::lexer::{LexError, Lexer, Token, TokenType};

fn lex_str(s: &str) -> Vec<Token> {
    Lexer::tokenize(s).expect("tokenize failed")
}

fn lex_err(s: &str) -> LexError {
    Lexer::tokenize(s).expect_err("expected a lexer error")
}

fn tok(token_type: TokenType, data: &str) -> Token {
    Token::new(token_type, data)
}

fn count(tokens: &[Token], token_type: TokenType) -> usize {
    tokens.iter().filter(|t| t.token_type == token_type).count()
}

// ----------------------------------------------------------------------
// Boundary behaviors

#[test]
fn empty_file_yields_no_tokens() {
    assert_eq!(lex_str(""), vec![]);
}

#[test]
fn whitespace_only_file_yields_end_lines_only() {
    let tokens = lex_str("\n\n  \n");
    assert_eq!(
        tokens,
        vec![tok(TokenType::EndLine, ""), tok(TokenType::EndLine, "")]
    );
    assert_eq!(count(&tokens, TokenType::StartIndentation), 0);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 0);
}

#[test]
fn bare_bracket_expression_is_not_a_call() {
    let tokens = lex_str("(3)\n");
    let expected = vec![
        tok(TokenType::OpenBracket, "("),
        tok(TokenType::RValueNumber, "3"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn open_bracket_after_closed_expression_is_a_call() {
    let tokens = lex_str("(f)(2)\n");
    let expected = vec![
        tok(TokenType::OpenBracket, "("),
        tok(TokenType::VariableReference, "f"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::FunctionCall, ""),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn missing_trailing_newline_is_tolerated() {
    assert_eq!(lex_str("x = 1"), lex_str("x = 1\n"));
}

#[test]
fn tokenizing_is_deterministic() {
    let source = "function f(int32 a) -> int32:\n    return a + 1\nf(2)\n";
    assert_eq!(lex_str(source), lex_str(source));
}

// ----------------------------------------------------------------------
// Stream invariants

#[test]
fn grouping_brackets_balance() {
    let tokens = lex_str("x = ((1 + 2) * 3)\n");
    assert_eq!(
        count(&tokens, TokenType::OpenBracket),
        count(&tokens, TokenType::CloseBracket)
    );
    let mut depth = 0i32;
    for t in &tokens {
        match t.token_type {
            TokenType::OpenBracket => depth += 1,
            TokenType::CloseBracket => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0, "prefix has more closes than opens");
    }
}

#[test]
fn indentation_markers_balance_for_unit_steps() {
    let source = "a = 1\n    b = 2\n        c = 3\n    d = 4\ne = 5\n";
    let tokens = lex_str(source);
    assert_eq!(
        count(&tokens, TokenType::StartIndentation),
        count(&tokens, TokenType::EndIndentation)
    );
}

#[test]
fn function_name_is_followed_by_parameter_bookends() {
    let tokens = lex_str("function f(int32 a) -> int32:\n    return a\n");
    let name_at = tokens
        .iter()
        .position(|t| t.token_type == TokenType::FunctionName)
        .expect("function name");
    let start_at = tokens
        .iter()
        .position(|t| t.token_type == TokenType::StartFunctionParameters)
        .expect("parameter start");
    let end_line_at = tokens
        .iter()
        .position(|t| t.token_type == TokenType::EndLine)
        .expect("line end");
    assert!(name_at < start_at && start_at < end_line_at);
}

#[test]
fn no_end_line_inside_brackets() {
    let tokens = lex_str("x = (1 +\n2)\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::OpenBracket, "("),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::AddOp, "+"),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::CloseBracket, ")"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

// ----------------------------------------------------------------------
// Indentation details

#[test]
fn multi_unit_jump_emits_single_opener_but_two_closers() {
    let tokens = lex_str("a = 1\n        b = 2\nc = 3\n");
    assert_eq!(count(&tokens, TokenType::StartIndentation), 1);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 2);
}

#[test]
fn dedent_at_end_of_file_is_unwound() {
    let tokens = lex_str("a = 1\n    b = 2\n");
    assert_eq!(
        tokens.last(),
        Some(&tok(TokenType::EndIndentation, ""))
    );
    assert_eq!(count(&tokens, TokenType::StartIndentation), 1);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 1);
}

#[test]
fn tabs_count_as_indent_units() {
    let tokens = lex_str("a = 1\n\tb = 2\nc = 3\n");
    assert_eq!(count(&tokens, TokenType::StartIndentation), 1);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 1);
}

#[test]
fn short_space_runs_do_not_indent() {
    let tokens = lex_str("a = 1\n  b = 2\n");
    assert_eq!(count(&tokens, TokenType::StartIndentation), 0);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 0);
}

#[test]
fn seven_spaces_count_as_one_unit() {
    let tokens = lex_str("a = 1\n       b = 2\nc = 3\n");
    assert_eq!(count(&tokens, TokenType::StartIndentation), 1);
    assert_eq!(count(&tokens, TokenType::EndIndentation), 1);
}

// ----------------------------------------------------------------------
// Comments

#[test]
fn line_comment_is_skipped() {
    let tokens = lex_str("x = 1 // trailing note\ny = 2\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::EndLine, ""),
        tok(TokenType::VariableReference, "y"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "2"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn multiline_comment_is_skipped() {
    let tokens = lex_str("/* first\nsecond *\\ x = 1\n");
    let expected = vec![
        tok(TokenType::VariableReference, "x"),
        tok(TokenType::Assign, "="),
        tok(TokenType::RValueNumber, "1"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn unclosed_multiline_comment_is_an_error() {
    assert_eq!(lex_err("/* never closed\n"), LexError::UnclosedMultilineComment);
}

// ----------------------------------------------------------------------
// Strings and chars

#[test]
fn string_escapes_are_interpreted() {
    let tokens = lex_str("s = \"a\\n\\t\\\"b\\\\\"\n");
    assert_eq!(tokens[2], tok(TokenType::RValueString, "a\n\t\"b\\"));
}

#[test]
fn unknown_string_escape_keeps_backslash() {
    let tokens = lex_str("s = \"a\\qb\"\n");
    assert_eq!(tokens[2], tok(TokenType::RValueString, "a\\qb"));
}

#[test]
fn unclosed_string_is_an_error() {
    assert_eq!(lex_err("s = \"abc\n"), LexError::UnclosedString);
}

#[test]
fn char_literal_tokens() {
    let tokens = lex_str("c = 'a'\n");
    assert_eq!(tokens[2], tok(TokenType::RValueChar, "a"));
}

#[test]
fn char_escape_tokens() {
    let tokens = lex_str("c = '\\n'\n");
    assert_eq!(tokens[2], tok(TokenType::RValueChar, "\n"));
}

#[test]
fn empty_char_literal_is_an_error() {
    assert_eq!(lex_err("c = ''\n"), LexError::EmptyCharLiteral);
}

#[test]
fn unclosed_char_literal_is_an_error() {
    assert_eq!(lex_err("c = 'ab'\n"), LexError::UnclosedChar);
}

#[test]
fn unknown_char_escape_is_an_error() {
    assert_eq!(lex_err("c = '\\q'\n"), LexError::IllegalEscape('q'));
}

// ----------------------------------------------------------------------
// Numbers

#[test]
fn float_literal_keeps_decimal_point() {
    let tokens = lex_str("x = 3.25\n");
    assert_eq!(tokens[2], tok(TokenType::RValueNumber, "3.25"));
}

#[test]
fn two_decimal_points_are_an_error() {
    assert!(matches!(lex_err("x = 1.2.3\n"), LexError::MalformedNumber(_)));
}

#[test]
fn letters_in_a_number_are_an_error() {
    assert!(matches!(lex_err("x = 12ab\n"), LexError::MalformedNumber(_)));
}

#[test]
fn bad_binary_digit_is_an_error() {
    assert_eq!(lex_err("x = 0b102\n"), LexError::BinaryDigitExpected('2'));
}

#[test]
fn bad_hex_digit_is_an_error() {
    assert_eq!(lex_err("x = 0xG1\n"), LexError::HexDigitExpected('G'));
}

#[test]
fn large_hex_literal_normalises() {
    let tokens = lex_str("x = 0xDEAD\n");
    assert_eq!(tokens[2], tok(TokenType::RValueNumber, "57005"));
}

// ----------------------------------------------------------------------
// Declarators

#[test]
fn static_array_declarator() {
    let tokens = lex_str("int32[...8] grid\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::StaticArrayDef, "8"),
        tok(TokenType::VariableName, "grid"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn bare_size_static_array_declarator() {
    let tokens = lex_str("int32[8] grid\n");
    assert_eq!(tokens[1], tok(TokenType::StaticArrayDef, "8"));
}

#[test]
fn dynamic_array_declarator() {
    let tokens = lex_str("int32[] buf\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::DynamicArrayDef, ""),
        tok(TokenType::VariableName, "buf"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn nested_array_declarators() {
    let tokens = lex_str("int32[][] m\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::DynamicArrayDef, ""),
        tok(TokenType::DynamicArrayDef, ""),
        tok(TokenType::VariableName, "m"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn stray_character_in_array_size_is_an_error() {
    assert!(matches!(lex_err("int32[x] v\n"), LexError::ArrayDeclarator(_)));
}

#[test]
fn dots_without_a_size_are_an_error() {
    assert!(matches!(lex_err("int32[...] v\n"), LexError::ArrayDeclarator(_)));
}

#[test]
fn double_pointer_declarator() {
    let tokens = lex_str("int32** pp\n");
    let expected = vec![
        tok(TokenType::Int32Type, "int32"),
        tok(TokenType::PointerDef, "*"),
        tok(TokenType::PointerDef, "*"),
        tok(TokenType::VariableName, "pp"),
        tok(TokenType::EndLine, ""),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn spaced_pointer_declarators_are_an_error() {
    assert_eq!(lex_err("int32* * p\n"), LexError::SpacedPointerDeclarator);
}

#[test]
fn trailing_comma_in_name_list_is_an_error() {
    assert_eq!(lex_err("int32 x,\n"), LexError::TrailingComma);
}

#[test]
fn double_comma_in_name_list_is_an_error() {
    assert_eq!(lex_err("int32 x,,y\n"), LexError::ExpectedVariableName);
}

// ----------------------------------------------------------------------
// Functions and calls

#[test]
fn newline_after_function_header_is_an_error() {
    assert_eq!(lex_err("function f\n"), LexError::FunctionHeaderNewline);
}

#[test]
fn missing_struct_name_is_an_error() {
    assert_eq!(lex_err("struct :\n"), LexError::ExpectedStructName);
}

#[test]
fn unmatched_closing_bracket_is_an_error() {
    assert_eq!(lex_err(")\n"), LexError::UnmatchedClosingBracket);
}

#[test]
fn empty_argument_between_commas_is_an_error() {
    assert_eq!(lex_err("f(1,,2)\n"), LexError::EmptyCallArgument);
}

#[test]
fn unclosed_call_arguments_are_an_error() {
    assert_eq!(lex_err("f(1\n"), LexError::UnclosedCallArguments);
}

#[test]
fn empty_parameter_list_has_bookends() {
    let tokens = lex_str("function f() -> int32:\n    return 1\n");
    let start = tokens
        .iter()
        .position(|t| t.token_type == TokenType::StartFunctionParameters)
        .expect("start");
    assert_eq!(tokens[start + 1].token_type, TokenType::EndFunctionParameters);
}

// ----------------------------------------------------------------------
// Sub-lexer round trips

#[test]
fn function_type_sub_tokens_match_fragment_tokenization() {
    let tokens = lex_str("function f() -> int32*:\n    return 1\n");
    let type_at = tokens
        .iter()
        .position(|t| t.token_type == TokenType::FunctionType)
        .expect("function type token");
    assert_eq!(tokens[type_at].data, "int32*");

    let fragment = Lexer::tokenize_fragment(&tokens[type_at].data).expect("fragment");
    let end_line_at = tokens
        .iter()
        .skip(type_at)
        .position(|t| t.token_type == TokenType::EndLine)
        .expect("line end")
        + type_at;
    assert_eq!(&tokens[type_at + 1..end_line_at], fragment.as_slice());
}

#[test]
fn fragment_tokenization_of_call_argument_matches_spliced_tokens() {
    let tokens = lex_str("f(a + 1)\n");
    let expected_inner = Lexer::tokenize_fragment("a + 1").expect("fragment");
    assert_eq!(&tokens[1..tokens.len() - 2], expected_inner.as_slice());
}
