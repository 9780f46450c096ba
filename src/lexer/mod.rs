//! Tokenization
//!
//! A state-machine lexer for the indentation-sensitive Slate source
//! language. Each state owns one scanning concern (declarations,
//! operators, indentation, literals, parameter lists) and hands off by
//! setting the next state, usually after backtracking so the following
//! state re-reads the character that ended the current one.
//!
//! Compound constructs (declaration parameters, call arguments, return
//! types, index bodies) are tokenized by fresh sub-lexers over the
//! extracted text; the resulting tokens are spliced into the parent
//! stream once the sub-lexer finishes.

mod reader;
mod tables;
mod token;

pub use token::{Token, TokenType};

use reader::{Reader, NUL};
use tables::{is_ident_char, is_operator_char, is_space, keyword_entry, operator_entry};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexerState {
    Default,
    VariableName,
    RValue,
    Operator,
    Indentation,
    FunctionName,
    FunctionParameters,
    ArrowState,
    FunctionTypeState,
    StructName,
    FunctionArguments,
    Comment,
    MultilineComment,
    IndexOperator,
    AsterisksOperator,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("closing bracket has no matching opening bracket")]
    UnmatchedClosingBracket,
    #[error("string literal is never closed")]
    UnclosedString,
    #[error("expected `'` to close char literal")]
    UnclosedChar,
    #[error("char literal has no data")]
    EmptyCharLiteral,
    #[error("unknown escape sequence \\{0} in char literal")]
    IllegalEscape(char),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unexpected {0:?} in hexadecimal literal")]
    HexDigitExpected(char),
    #[error("unexpected {0:?} in binary literal, only 0 and 1 are allowed")]
    BinaryDigitExpected(char),
    #[error("invalid array declarator: {0}")]
    ArrayDeclarator(String),
    #[error("spaces are not allowed between pointer declarators")]
    SpacedPointerDeclarator,
    #[error("expected a name before the comma in a declaration list")]
    LeadingComma,
    #[error("expected a name after the comma in a declaration list")]
    TrailingComma,
    #[error("expected a variable name after the comma")]
    ExpectedVariableName,
    #[error("expected an argument between commas in call")]
    EmptyCallArgument,
    #[error("expected `(` after function call")]
    ExpectedCallArguments,
    #[error("expected `)` after call arguments")]
    UnclosedCallArguments,
    #[error("expected `(` to open the parameter list")]
    ExpectedParameterList,
    #[error("expected `)` after parameter list")]
    UnclosedParameterList,
    #[error("cannot call a number ({0})")]
    CallOnNumber(String),
    #[error("literal quote {0:?} in the middle of a word")]
    QuoteInWord(char),
    #[error("unexpected newline after function definition header")]
    FunctionHeaderNewline,
    #[error("expected a struct name")]
    ExpectedStructName,
    #[error("multi-line comment is never closed")]
    UnclosedMultilineComment,
    #[error("expected `]` after index expression")]
    UnclosedIndexOperator,
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer {
    reader: Reader,
    tokens: Vec<Token>,
    lexeme: String,
    bracket_stack: Vec<char>,
    indents: usize,
    state: LexerState,
}

impl Lexer {
    /// Tokenize a whole source buffer. A trailing newline is appended
    /// when the source is non-empty and lacks one, so open line states
    /// always terminate.
    pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
        let mut buffer = source.to_string();
        if !buffer.is_empty() && !buffer.ends_with('\n') {
            buffer.push('\n');
        }
        Lexer::new(&buffer).run()
    }

    /// Tokenize an extracted fragment (a call argument, a parameter
    /// declaration, a type expression, an index body). Fragments get a
    /// trailing space instead of a newline so they never emit line or
    /// indentation tokens of their own.
    pub fn tokenize_fragment(text: &str) -> LexResult<Vec<Token>> {
        let mut buffer = text.to_string();
        buffer.push(' ');
        Lexer::new(&buffer).run()
    }

    fn new(buffer: &str) -> Self {
        Self {
            reader: Reader::new(buffer),
            tokens: Vec::new(),
            lexeme: String::new(),
            bracket_stack: Vec::new(),
            indents: 0,
            state: LexerState::Default,
        }
    }

    fn run(&mut self) -> LexResult<Vec<Token>> {
        while !self.reader.eof() {
            match self.state {
                LexerState::Default => self.default_state()?,
                LexerState::VariableName => self.variable_name_state()?,
                LexerState::RValue => self.rvalue_state()?,
                LexerState::Operator => self.operator_state()?,
                LexerState::Indentation => self.indentation_state(),
                LexerState::FunctionName => self.function_name_state()?,
                LexerState::FunctionParameters => self.function_parameters_state()?,
                LexerState::ArrowState => self.arrow_state(),
                LexerState::FunctionTypeState => self.function_type_state()?,
                LexerState::StructName => self.struct_name_state()?,
                LexerState::FunctionArguments => self.function_arguments_state()?,
                LexerState::Comment => self.comment_state(),
                LexerState::MultilineComment => self.multiline_comment_state()?,
                LexerState::IndexOperator => self.index_operator_state()?,
                LexerState::AsterisksOperator => self.asterisks_state(),
            }
        }
        while self.indents > 0 {
            self.push_token(TokenType::EndIndentation, "");
            self.indents -= 1;
        }
        Ok(std::mem::take(&mut self.tokens))
    }

    fn push_token(&mut self, token_type: TokenType, data: impl Into<String>) {
        self.tokens.push(Token::new(token_type, data));
    }

    /// Kind of the most recently emitted token. An empty stream counts
    /// as a line end.
    fn last_token_type(&self) -> TokenType {
        self.tokens
            .last()
            .map(|t| t.token_type)
            .unwrap_or(TokenType::EndLine)
    }

    /// Backtrack, then consume horizontal whitespace. Returns the first
    /// non-space character.
    fn skip_spaces(&mut self) -> char {
        self.reader.backtrack();
        let mut current = self.reader.next();
        while is_space(current) {
            current = self.reader.next();
        }
        current
    }

    // ------------------------------------------------------------------
    // Default: the dispatcher

    fn default_state(&mut self) -> LexResult<()> {
        let current = self.reader.next();

        if current == '(' {
            // A pending word, or a just-closed bracket expression,
            // makes this a call; otherwise it groups.
            if !self.lexeme.is_empty() || self.last_token_type() == TokenType::CloseBracket {
                if !self.lexeme.is_empty() && is_valid_number(&self.lexeme) {
                    return Err(LexError::CallOnNumber(std::mem::take(&mut self.lexeme)));
                }
                let name = std::mem::take(&mut self.lexeme);
                self.push_token(TokenType::FunctionCall, name);
                self.state = LexerState::FunctionArguments;
                self.reader.backtrack();
            } else {
                self.bracket_stack.push('(');
                self.push_token(TokenType::OpenBracket, "(");
            }
            return Ok(());
        }

        if current == '"' || current == '\'' {
            if !self.lexeme.is_empty() {
                return Err(LexError::QuoteInWord(current));
            }
            return if current == '"' {
                self.parse_string()
            } else {
                self.parse_char()
            };
        }

        if current.is_ascii_digit() && self.lexeme.is_empty() {
            self.lexeme.push(current);
            return self.parse_number();
        }

        if is_ident_char(current) {
            self.lexeme.push(current);
            return Ok(());
        }

        if !self.lexeme.is_empty() {
            // The word just ended; keywords win over identifiers.
            if let Some(entry) = keyword_entry(&self.lexeme) {
                if entry.token != TokenType::None {
                    let word = self.lexeme.clone();
                    self.push_token(entry.token, word);
                }
                self.state = entry.next;
            } else {
                let word = self.lexeme.clone();
                self.push_token(TokenType::VariableReference, word);
                self.state = LexerState::VariableName;
            }
            self.lexeme.clear();
            if !is_space(current) {
                self.reader.backtrack();
            }
            return Ok(());
        }

        if current == ':' || current == '\n' {
            self.state = LexerState::Indentation;
            if self.bracket_stack.is_empty() {
                self.push_token(TokenType::EndLine, "");
            }
            return Ok(());
        }

        if is_operator_char(current) {
            self.state = LexerState::Operator;
            return Ok(());
        }

        if current == '[' {
            self.push_token(TokenType::IndexOperator, "");
            self.push_token(TokenType::OpenBracket, "[");
            self.state = LexerState::IndexOperator;
            self.reader.backtrack();
            return Ok(());
        }

        if current == ')' {
            if self.bracket_stack.pop() != Some('(') {
                return Err(LexError::UnmatchedClosingBracket);
            }
            self.push_token(TokenType::CloseBracket, ")");
            return Ok(());
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // VariableName: declarators and declaration name lists

    fn variable_name_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();

        // Declarators only follow a primitive type keyword; after a
        // plain identifier `*` and `[` re-enter the dispatcher and read
        // as multiply/dereference and indexing.
        let declarator_context = self.last_token_type().is_data_type();

        if (current == ':' || is_operator_char(current)) && current != '*' {
            self.reader.backtrack();
            self.state = LexerState::Default;
            return Ok(());
        }
        if current == '(' {
            self.reader.backtrack();
            self.state = LexerState::Default;
            return Ok(());
        }
        if current == '*' {
            if !declarator_context {
                self.reader.backtrack();
                self.state = LexerState::Default;
                return Ok(());
            }
            self.reader.backtrack();
            self.parse_pointer_declarator()?;
            current = self.reader.next();
        }
        self.lexeme.clear();
        if current == '[' {
            if !declarator_context {
                self.reader.backtrack();
                self.state = LexerState::Default;
                return Ok(());
            }
            self.parse_array_declarator()?;
            current = self.reader.next();
        }
        self.lexeme.clear();
        if current == '\n' || current == NUL {
            self.reader.backtrack();
            self.state = LexerState::Default;
            return Ok(());
        }
        if current == ',' {
            return Err(LexError::LeadingComma);
        }
        if !is_ident_char(current) {
            self.reader.backtrack();
            self.state = LexerState::Default;
            return Ok(());
        }

        let mut commas = 0usize;
        let mut vars = 0usize;
        while is_ident_char(current) || is_space(current) {
            if !is_space(current) {
                self.lexeme.push(current);
            }
            current = self.reader.next();
            if current == ',' {
                if self.lexeme.is_empty() {
                    return Err(LexError::ExpectedVariableName);
                }
                let name = std::mem::take(&mut self.lexeme);
                self.push_token(TokenType::VariableName, name);
                self.push_token(TokenType::Comma, "");
                current = self.reader.next();
                commas += 1;
                if current == ',' {
                    return Err(LexError::ExpectedVariableName);
                }
                vars += 1;
            }
        }
        if !self.lexeme.is_empty() {
            let name = std::mem::take(&mut self.lexeme);
            self.push_token(TokenType::VariableName, name);
            vars += 1;
        }
        if commas >= vars {
            return Err(LexError::TrailingComma);
        }
        if !is_space(current) {
            self.reader.backtrack();
        }
        self.lexeme.clear();
        self.state = LexerState::Default;
        Ok(())
    }

    fn parse_pointer_declarator(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        while current == '*' {
            current = self.reader.next();
            self.push_token(TokenType::PointerDef, "*");
        }
        let current = self.skip_spaces();
        if current == '*' {
            return Err(LexError::SpacedPointerDeclarator);
        }
        if !is_space(current) && current != NUL {
            self.reader.backtrack();
        }
        Ok(())
    }

    /// Scans `[...]` declarators: empty brackets declare a dynamic
    /// array, `...N` (or a bare `N`) a static one of N elements. Called
    /// with the opening `[` already consumed; recurses on nesting.
    fn parse_array_declarator(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        let mut seen_dots = false;
        while current != ']' && current != '\n' && current != NUL {
            if current.is_ascii_digit() {
                self.lexeme.push(current);
            } else if current == '.' && self.lexeme.is_empty() && !seen_dots {
                let second = self.reader.next();
                let third = self.reader.next();
                if second != '.' || third != '.' {
                    return Err(LexError::ArrayDeclarator(
                        "expected three dots before the size".into(),
                    ));
                }
                seen_dots = true;
            } else {
                return Err(LexError::ArrayDeclarator(format!(
                    "unexpected {current:?} in array size"
                )));
            }
            current = self.reader.next();
        }
        if current != ']' {
            return Err(LexError::ArrayDeclarator("declarator is never closed".into()));
        }
        if self.lexeme.is_empty() {
            if seen_dots {
                return Err(LexError::ArrayDeclarator("expected a size after the dots".into()));
            }
            self.push_token(TokenType::DynamicArrayDef, "");
        } else {
            let size = std::mem::take(&mut self.lexeme);
            self.push_token(TokenType::StaticArrayDef, size);
        }
        self.lexeme.clear();

        let mut current = self.reader.next();
        while is_space(current) {
            current = self.reader.next();
        }
        if current == ']' {
            return Err(LexError::ArrayDeclarator(
                "closing an unopened declarator".into(),
            ));
        }
        if current == '[' {
            return self.parse_array_declarator();
        }
        if current != NUL {
            self.reader.backtrack();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // RValue: the right-hand side of `=`, `return`, and operators

    fn rvalue_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let current = self.skip_spaces();
        self.lexeme.clear();

        if current == '(' {
            self.bracket_stack.push('(');
            self.push_token(TokenType::OpenBracket, "(");
            return Ok(());
        }
        if current == ')' {
            if self.bracket_stack.pop() != Some('(') {
                return Err(LexError::UnmatchedClosingBracket);
            }
            self.push_token(TokenType::CloseBracket, ")");
            return Ok(());
        }
        if current == '"' {
            self.parse_string()?;
            self.state = LexerState::Default;
            return Ok(());
        }
        if current.is_ascii_digit() || current == '-' {
            self.lexeme.push(current);
            self.parse_number()?;
            self.state = LexerState::Default;
            return Ok(());
        }
        if current == '\'' {
            self.parse_char()?;
            self.state = LexerState::Default;
            return Ok(());
        }
        if is_operator_char(current) {
            self.state = LexerState::Operator;
            return Ok(());
        }

        // A variable reference or keyword word.
        self.reader.backtrack();
        self.parse_other()?;
        self.state = LexerState::Default;
        Ok(())
    }

    fn parse_other(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        self.lexeme.clear();
        while is_ident_char(current) {
            self.lexeme.push(current);
            current = self.reader.next();
            if current == '\n' || current == NUL || is_space(current) {
                break;
            }
        }
        if current == '(' {
            // Leave the word pending; the dispatcher turns it into a
            // call.
            if !self.lexeme.is_empty() {
                self.reader.backtrack();
            }
            return Ok(());
        }
        if let Some(entry) = keyword_entry(&self.lexeme) {
            if entry.token != TokenType::None {
                let word = std::mem::take(&mut self.lexeme);
                self.push_token(entry.token, word);
            }
        } else if !self.lexeme.is_empty() {
            let word = std::mem::take(&mut self.lexeme);
            self.push_token(TokenType::VariableReference, word);
        }
        self.lexeme.clear();
        self.reader.backtrack();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Operator: maximal munch with single-character fallback

    fn operator_state(&mut self) -> LexResult<()> {
        self.reader.backtrack();
        let first = self.reader.next();
        let mut text = String::new();
        text.push(first);
        loop {
            let current = self.reader.next();
            if !is_operator_char(current) {
                break;
            }
            text.push(current);
        }
        self.reader.backtrack();

        let (entry, data) = match operator_entry(&text) {
            Some(entry) => (entry, text),
            None => {
                // Fall back to the single character and rewind so the
                // rest is re-read.
                self.reader.rewind(text.len() - 1);
                let single = first.to_string();
                let entry =
                    operator_entry(&single).ok_or_else(|| LexError::UnknownOperator(single.clone()))?;
                (entry, single)
            }
        };
        if entry.token != TokenType::None {
            self.push_token(entry.token, data);
        }
        self.state = entry.next;
        Ok(())
    }

    fn asterisks_state(&mut self) {
        if self.last_token_type().closes_value() {
            self.push_token(TokenType::MulOp, "*");
        } else {
            self.push_token(TokenType::DereferenceOp, "");
        }
        self.state = LexerState::Default;
    }

    // ------------------------------------------------------------------
    // Indentation

    fn indentation_state(&mut self) {
        let mut next = self.reader.next();
        if next == '\n' {
            next = self.reader.next();
        }

        let mut local = 0usize;
        loop {
            if next == '\t' {
                local += 1;
                next = self.reader.next();
                continue;
            }
            if next == ' ' {
                let mut run = 1usize;
                while run < 4 {
                    next = self.reader.next();
                    if next != ' ' {
                        break;
                    }
                    run += 1;
                }
                if run == 4 {
                    local += 1;
                    next = self.reader.next();
                    continue;
                }
            }
            break;
        }

        // A rise emits a single opener regardless of how many units were
        // added; dedents unwind one level per token.
        if local > self.indents {
            self.push_token(TokenType::StartIndentation, "");
            self.indents = local;
        }
        while self.indents > local {
            self.push_token(TokenType::EndIndentation, "");
            self.indents -= 1;
        }

        self.state = LexerState::Default;
        self.reader.backtrack();
    }

    // ------------------------------------------------------------------
    // Function declarations

    fn function_name_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();
        self.lexeme.clear();

        if current == '(' {
            self.reader.backtrack();
            self.push_token(TokenType::Lambda, "");
            self.state = LexerState::FunctionParameters;
            return Ok(());
        }

        while is_ident_char(current) {
            self.lexeme.push(current);
            current = self.reader.next();
        }
        if current == '(' {
            self.reader.backtrack();
        }
        let name = std::mem::take(&mut self.lexeme);
        self.push_token(TokenType::FunctionName, name);
        if current == '\n' {
            return Err(LexError::FunctionHeaderNewline);
        }
        self.state = LexerState::FunctionParameters;
        Ok(())
    }

    fn function_parameters_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();
        self.lexeme.clear();
        if current != '(' {
            return Err(LexError::ExpectedParameterList);
        }

        let mut params: Vec<String> = Vec::new();
        let mut detected_end = false;
        while current != ')' && current != NUL {
            current = self.reader.next();
            if current == ',' || current == ')' || current == NUL {
                if current == ')' {
                    detected_end = true;
                }
                if !self.lexeme.is_empty() {
                    params.push(std::mem::take(&mut self.lexeme));
                }
                self.lexeme.clear();
            } else if !(is_space(current) && self.lexeme.is_empty()) {
                self.lexeme.push(current);
            }
        }
        if !detected_end {
            return Err(LexError::UnclosedParameterList);
        }

        self.push_token(TokenType::StartFunctionParameters, "");
        for param in &params {
            let sub_tokens = Lexer::tokenize_fragment(param)?;
            self.tokens.extend(sub_tokens);
        }
        self.push_token(TokenType::EndFunctionParameters, "");
        self.state = LexerState::Default;
        Ok(())
    }

    fn arrow_state(&mut self) {
        let n = self.tokens.len();
        if n > 1 && self.tokens[n - 2].token_type == TokenType::EndFunctionParameters {
            self.state = LexerState::FunctionTypeState;
        } else {
            self.state = LexerState::Default;
        }
    }

    fn function_type_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();
        self.lexeme.clear();

        while current != '\n' && current != NUL && current != ':' {
            self.lexeme.push(current);
            current = self.reader.next();
        }
        let text = std::mem::take(&mut self.lexeme);
        self.push_token(TokenType::FunctionType, text.clone());
        // Re-tokenize the type expression so compound types (pointers,
        // arrays of a type) appear as structured tokens.
        let sub_tokens = Lexer::tokenize_fragment(&text)?;
        self.tokens.extend(sub_tokens);

        self.reader.backtrack();
        self.state = LexerState::Default;
        Ok(())
    }

    fn struct_name_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();
        if current == ':' {
            return Err(LexError::ExpectedStructName);
        }
        self.lexeme.clear();
        while is_ident_char(current) {
            self.lexeme.push(current);
            current = self.reader.next();
        }
        let name = std::mem::take(&mut self.lexeme);
        self.push_token(TokenType::StructName, name);
        self.reader.backtrack();
        self.state = LexerState::Default;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Call arguments

    fn function_arguments_state(&mut self) -> LexResult<()> {
        let _ = self.reader.next();
        let mut current = self.skip_spaces();
        self.lexeme.clear();
        if current != '(' {
            return Err(LexError::ExpectedCallArguments);
        }

        // Track parenthesis depth so commas inside nested calls don't
        // split the argument.
        let mut args: Vec<String> = Vec::new();
        let mut detected_end = false;
        let mut opens = 1i32;
        while opens != 0 && current != NUL {
            current = self.reader.next();
            if current == '(' {
                opens += 1;
            }
            if current == ')' {
                opens -= 1;
            }
            if (current == ')' && opens == 0) || (current == ',' && opens == 1) || current == NUL {
                if current == ')' {
                    detected_end = true;
                }
                if !self.lexeme.is_empty() {
                    args.push(std::mem::take(&mut self.lexeme));
                } else if current == ',' {
                    return Err(LexError::EmptyCallArgument);
                }
                self.lexeme.clear();
            } else if !(current.is_whitespace() && self.lexeme.is_empty()) {
                self.lexeme.push(current);
            }
        }
        if !detected_end {
            return Err(LexError::UnclosedCallArguments);
        }

        self.state = LexerState::Default;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.push_token(TokenType::Comma, "");
            }
            let sub_tokens = Lexer::tokenize_fragment(arg)?;
            self.tokens.extend(sub_tokens);
        }
        self.push_token(TokenType::CloseBracket, ")");

        let _ = self.reader.next();
        let _ = self.skip_spaces();
        self.reader.backtrack();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Index operator

    fn index_operator_state(&mut self) -> LexResult<()> {
        let current = self.reader.next();
        if current != '[' {
            return Err(LexError::UnclosedIndexOperator);
        }
        let mut opens = 1i32;
        let mut detected_end = false;
        loop {
            let current = self.reader.next();
            if current == NUL {
                break;
            }
            if current == '[' {
                opens += 1;
            }
            if current == ']' {
                opens -= 1;
                if opens == 0 {
                    detected_end = true;
                    break;
                }
            }
            if !(is_space(current) && self.lexeme.is_empty()) && current != '\n' {
                self.lexeme.push(current);
            }
        }
        if !detected_end {
            return Err(LexError::UnclosedIndexOperator);
        }

        let body = std::mem::take(&mut self.lexeme);
        let sub_tokens = Lexer::tokenize_fragment(&body)?;
        self.tokens.extend(sub_tokens);
        self.push_token(TokenType::CloseBracket, "]");
        self.state = LexerState::Default;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Comments

    fn comment_state(&mut self) {
        let mut current = self.reader.next();
        while current != '\n' && current != NUL {
            current = self.reader.next();
        }
        self.state = LexerState::Default;
        if current == '\n' {
            self.reader.backtrack();
        }
    }

    fn multiline_comment_state(&mut self) -> LexResult<()> {
        loop {
            let current = self.reader.next();
            if current == NUL {
                return Err(LexError::UnclosedMultilineComment);
            }
            if current == '*' {
                let next = self.reader.next();
                if next == '\\' {
                    self.state = LexerState::Default;
                    return Ok(());
                }
                self.reader.backtrack();
            }
        }
    }

    // ------------------------------------------------------------------
    // Literals

    fn parse_number(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        if current == 'b' || current == 'x' {
            if self.lexeme != "0" {
                self.lexeme.push(current);
                return Err(LexError::MalformedNumber(std::mem::take(&mut self.lexeme)));
            }
            self.lexeme.clear();
            return if current == 'b' {
                self.parse_binary_literal()
            } else {
                self.parse_hex_literal()
            };
        }

        let mut used_decimal = false;
        while current.is_ascii_alphanumeric() || current == '.' {
            if current == '.' {
                if used_decimal {
                    self.lexeme.push(current);
                    return Err(LexError::MalformedNumber(std::mem::take(&mut self.lexeme)));
                }
                used_decimal = true;
            }
            self.lexeme.push(current);
            current = self.reader.next();
        }

        let text = std::mem::take(&mut self.lexeme);
        if text == "-" {
            self.push_token(TokenType::SubOp, "-");
        } else {
            if !is_valid_number(&text) {
                return Err(LexError::MalformedNumber(text));
            }
            self.push_token(TokenType::RValueNumber, text);
        }
        if !is_space(current) {
            self.reader.backtrack();
        }
        Ok(())
    }

    fn parse_hex_literal(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        while !current.is_whitespace() && !is_operator_char(current) && current != NUL {
            if !current.is_ascii_hexdigit() {
                return Err(LexError::HexDigitExpected(current));
            }
            self.lexeme.push(current);
            current = self.reader.next();
        }
        if !is_space(current) {
            self.reader.backtrack();
        }
        let text = std::mem::take(&mut self.lexeme);
        let value = u64::from_str_radix(&text, 16)
            .map_err(|_| LexError::MalformedNumber(format!("0x{text}")))?;
        self.push_token(TokenType::RValueNumber, value.to_string());
        Ok(())
    }

    fn parse_binary_literal(&mut self) -> LexResult<()> {
        let mut current = self.reader.next();
        while !current.is_whitespace() && !is_operator_char(current) && current != NUL {
            if current != '0' && current != '1' {
                return Err(LexError::BinaryDigitExpected(current));
            }
            self.lexeme.push(current);
            current = self.reader.next();
        }
        if !is_space(current) {
            self.reader.backtrack();
        }
        let text = std::mem::take(&mut self.lexeme);
        let value = u64::from_str_radix(&text, 2)
            .map_err(|_| LexError::MalformedNumber(format!("0b{text}")))?;
        self.push_token(TokenType::RValueNumber, value.to_string());
        Ok(())
    }

    fn parse_string(&mut self) -> LexResult<()> {
        loop {
            let current = self.reader.next();
            if current == '"' {
                break;
            }
            if current == '\n' || current == NUL {
                return Err(LexError::UnclosedString);
            }
            if current == '\\' {
                let escaped = self.reader.next();
                match escaped {
                    '"' => self.lexeme.push('"'),
                    'n' => self.lexeme.push('\n'),
                    '\\' => self.lexeme.push('\\'),
                    't' => self.lexeme.push('\t'),
                    'r' => self.lexeme.push('\r'),
                    'b' => self.lexeme.push('\u{8}'),
                    other => {
                        // Unknown escapes keep their backslash.
                        self.lexeme.push('\\');
                        self.lexeme.push(other);
                    }
                }
            } else {
                self.lexeme.push(current);
            }
        }
        let text = std::mem::take(&mut self.lexeme);
        self.push_token(TokenType::RValueString, text);
        Ok(())
    }

    fn parse_char(&mut self) -> LexResult<()> {
        let current = self.reader.next();
        let data = if current == '\\' {
            let escaped = self.reader.next();
            match escaped {
                '\'' => '\'',
                'n' => '\n',
                '\\' => '\\',
                't' => '\t',
                'r' => '\r',
                'b' => '\u{8}',
                other => return Err(LexError::IllegalEscape(other)),
            }
        } else {
            if current == '\'' {
                return Err(LexError::EmptyCharLiteral);
            }
            if current == '\n' || current == NUL {
                return Err(LexError::UnclosedChar);
            }
            current
        };
        let closing = self.reader.next();
        if closing != '\'' {
            return Err(LexError::UnclosedChar);
        }
        self.push_token(TokenType::RValueChar, data.to_string());
        Ok(())
    }
}

/// A decimal number: optional leading `-`, digits, at most one dot.
fn is_valid_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return false;
    }
    let mut dots = 0;
    let mut has_digit = false;
    for c in digits.chars() {
        if c == '.' {
            dots += 1;
            if dots > 1 {
                return false;
            }
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else {
            return false;
        }
    }
    has_digit
}
