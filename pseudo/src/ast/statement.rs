// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Keyword, SourceLine};

use super::{Node, Variable};

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Variable,
    pub value: Box<Node>,

    /// Set for the hidden assignment that starts a `dla` loop. The variable
    /// it creates rejects every later assignment.
    pub is_iterator: bool,
    pub line: SourceLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKeyword {
    Print,
    Read,
    Exit,
}

impl StatementKeyword {
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Print => Keyword::Pisz,
            Self::Read => Keyword::Czytaj,
            Self::Exit => Keyword::Koniec,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub keyword: StatementKeyword,
    pub argument: Option<Box<Node>>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub test: Box<Node>,
    pub then_block: Vec<Node>,
    pub else_block: Option<Vec<Node>>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub test: Box<Node>,
    pub body: Vec<Node>,

    /// The `dla` variable, removed once the loop is done.
    pub iterator: Option<String>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Node>,
    pub is_procedure: bool,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Box<Node>>,
    pub line: SourceLine,
}
