// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::rc::Rc;

use strum::IntoStaticStr;

use crate::SourceLine;

use super::{Assignment, Call, Condition, FunctionDef, Loop, Operation, Return, Statement, Variable};

/// Everything the parser produces and the interpreter consumes. Blocks are
/// plain `Vec<Node>`s owned by their parent node.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Node {
    Int(i64),
    Str(String),
    Bool(bool),
    Variable(Variable),
    Operation(Operation),
    Call(Call),

    Assignment(Assignment),
    Statement(Statement),
    Condition(Condition),
    Loop(Loop),
    FunctionDef(Rc<FunctionDef>),
    Return(Return),

    /// The implicit `i := i + 1` at the end of a `dla` body, which is the only
    /// write an iterator accepts.
    Increment {
        name: String,
        line: SourceLine,
    },

    /// A consumed line with nothing to execute.
    EndOfLine,
}

impl Node {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn is_end_of_line(&self) -> bool {
        matches!(self, Self::EndOfLine)
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}
