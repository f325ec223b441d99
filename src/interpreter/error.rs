use crate::interpreter::ast::{InfixOperator, PrefixOperator};
use crate::interpreter::lexer::{TokenPos, TokenType};

/// A syntax error. Parsing keeps going after one of these, so a single
/// parse can report several.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenType,
        got: TokenType,
        pos: TokenPos,
    },
    #[error("no prefix parse function for {token_type} found")]
    NoPrefixParseFn {
        token_type: TokenType,
        pos: TokenPos,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger {
        literal: String,
        pos: TokenPos,
    },
}

impl ParseError {
    pub fn pos(&self) -> TokenPos {
        match self {
            ParseError::UnexpectedToken { pos, .. } => *pos,
            ParseError::NoPrefixParseFn { pos, .. } => *pos,
            ParseError::InvalidInteger { pos, .. } => *pos,
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(&'static str),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("`++` requires an INTEGER, got {0}")]
    IncrementNotSupported(&'static str),
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount {
        got: usize,
        want: usize,
    },
    #[error("argument to `{builtin}` not supported, got {got}")]
    UnsupportedArgument {
        builtin: &'static str,
        got: &'static str,
    },
    #[error("argument to `{builtin}` must be {expected}, got {got}")]
    UnexpectedArgument {
        builtin: &'static str,
        expected: &'static str,
        got: &'static str,
    },
}
