// ABOUTME: Error types for scanning, parsing and evaluation failures

use crate::value::Value;
use thiserror::Error;

/// Which diagnostic template an unexpected token selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    AtomOrLeftParen,
    RightParen,
}

impl Expected {
    pub fn phrase(&self) -> &'static str {
        match self {
            Expected::AtomOrLeftParen => "atom or '('",
            Expected::RightParen => "')'",
        }
    }
}

/// Parser outcomes that are not a finished S-expression. `NotFinish` and
/// `EmptyInput` are internal signals to the REPL, never printed; the other
/// two render verbatim as diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer ran out mid-expression; the REPL should read another line.
    #[error("S expression not complete")]
    NotFinish,

    /// Nothing but whitespace and comments; the REPL silently reads on.
    #[error("empty input")]
    EmptyInput,

    #[error("ERROR (no closing quote) : END-OF-LINE encountered at Line {line} Column {column}")]
    NoClosingQuote { line: usize, column: usize },

    #[error(
        "ERROR (unexpected token) : {} expected when token at Line {line} Column {column} is >>{lexeme}<<",
        .expect.phrase()
    )]
    UnexpectedToken {
        expect: Expected,
        line: usize,
        column: usize,
        lexeme: String,
    },
}

/// Everything that can abort the evaluation of one top-level form, plus the
/// `Exit` unwind. Line/column positions do not apply here; diagnostics quote
/// printed forms instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("ERROR (unbound symbol) : {0}")]
    UnboundSymbol(String),

    #[error("ERROR (DEFINE format)")]
    DefineFormat,

    #[error("ERROR (COND format)")]
    CondFormat,

    #[error("ERROR (LET format)")]
    LetFormat,

    #[error("ERROR (lambda format)")]
    LambdaFormat,

    #[error("ERROR ({op} with incorrect argument type) : {arg}")]
    IncorrectArgumentType { op: String, arg: Value },

    #[error("ERROR (attempt to apply non-function) : {0}")]
    NotCallable(Value),

    #[error("ERROR (non-list) : {0}")]
    NonList(Value),

    #[error("ERROR (division by zero) : /")]
    DivisionByZero,

    #[error("ERROR (incorrect number of arguments) : {0}")]
    IncorrectArgumentCount(String),

    #[error("ERROR (no return value)")]
    NoReturnValue,

    #[error("ERROR (level of DEFINE)")]
    LevelOfDefine,

    #[error("ERROR (level of CLEAN-ENVIRONMENT)")]
    LevelOfCleanEnvironment,

    #[error("ERROR (level of EXIT)")]
    LevelOfExit,

    #[error("ERROR (unbound parameter) : {0}")]
    UnboundParameter(Value),

    /// Not a failure: the normal `(exit)` unwind back to the REPL.
    #[error("interpreter exited")]
    Exit,
}

impl EvalError {
    /// Diagnostics whose template ends with the printed top-level input form,
    /// appended by the REPL rather than carried in the error itself.
    pub fn quotes_input(&self) -> bool {
        matches!(
            self,
            EvalError::DefineFormat
                | EvalError::CondFormat
                | EvalError::LetFormat
                | EvalError::LambdaFormat
                | EvalError::NoReturnValue
        )
    }
}
