// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::io;

use strum::AsRefStr;
use thiserror::Error;

use crate::{Operator, SourceLine};

/// A mistake in the program that only shows while running it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: SourceLine,
}

impl RuntimeError {
    #[must_use]
    pub fn new(kind: RuntimeErrorKind, line: &SourceLine) -> Self {
        Self {
            kind,
            line: line.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error, AsRefStr)]
pub enum RuntimeErrorKind {
    #[error("Function `{name}` takes {expected} argument(s), but {found} were given")]
    ArgumentCount { name: String, expected: usize, found: usize },

    #[error("Variable `{name}` is not settable")]
    AssignToIterator { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result of `{operator}` does not fit in a number")]
    Overflow { operator: Operator },

    #[error("Procedure `{name}` cannot return a value")]
    ProcedureReturnsValue { name: String },

    #[error("`czytaj` needs a variable to read into")]
    ReadTargetNotVariable,

    #[error("Calling `{name}` goes deeper than {limit} nested calls")]
    RecursionLimit { name: String, limit: usize },

    #[error("Cannot do `{operator}` on {left} and {right}")]
    TypeMismatch { operator: Operator, left: &'static str, right: &'static str },

    #[error("Function `{name}` is not defined")]
    UndefinedFunction { name: String },
}

/// A failure of the interpreter itself rather than of the program.
#[derive(Debug, Error, AsRefStr)]
pub enum InternalFault {
    #[error("return signal escaped the top level")]
    ReturnEscaped,

    #[error("console failed: {0}")]
    Console(#[from] io::Error),

    #[error("{0} node evaluated as an expression")]
    NotAnExpression(&'static str),
}

impl InternalFault {
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Internal(#[from] InternalFault),
}
