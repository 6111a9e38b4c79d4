// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::AsRefStr;
use thiserror::Error;

use crate::{Keyword, Operator, Position, SourceLine};

/// A fatal problem found while reading the program. Parsing stops at the
/// first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub source_line: SourceLine,
}

impl ParseError {
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error, AsRefStr)]
pub enum ParseErrorKind {
    #[error("Cannot do `{operator}` on nil")]
    CannotOperateOnNil { operator: Operator },

    #[error("Expected indented code, but the block is empty")]
    EmptyBlock,

    #[error("Expected {expected}, instead got {found}")]
    Expected { expected: &'static str, found: String },

    #[error("Expected an expression, instead got {found}")]
    ExpectedExpression { found: String },

    #[error("Expected keyword `{expected}`, instead got {found}")]
    ExpectedKeyword { expected: Keyword, found: String },

    #[error("Expected a name after `{after}`, instead got {found}")]
    ExpectedName { after: &'static str, found: String },

    #[error("Unexpected end of file")]
    EndOfFile,

    #[error("Inconsistent indentation size")]
    InconsistentIndentation,

    #[error("Invalid indentation, should be at least 2 spaces, not {width}")]
    IndentationTooNarrow { width: usize },

    #[error("Invalid character: `{0}`")]
    InvalidCharacter(char),

    #[error("Number `{0}` is too large")]
    NumberTooLarge(String),

    #[error("`zwróć` can only be used inside a function or procedure")]
    ReturnOutsideFunction,

    #[error("Undefined operation")]
    UndefinedOperation,

    #[error("Unexpected indentation")]
    UnexpectedIndentation,

    #[error("Unexpected keyword `{0}`")]
    UnexpectedKeyword(Keyword),

    #[error("Unexpected {found}")]
    UnexpectedToken { found: String },

    #[error("Could not parse string, missing closing {quote}")]
    UnterminatedString { quote: char },
}

/// Returned by [`crate::Stream::next_line`] once every line has been consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("end of file")]
pub struct EndOfFile;
