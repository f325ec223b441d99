pub mod ast;
pub mod lexer;
pub mod parser;
pub mod error;
pub mod object;
pub mod environment;
pub mod builtins;
pub mod evaluator;
