// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Operator, SourceLine};

use super::Node;

/// A plain variable (`a`) or an array element (`T[i][j + 1]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub indices: Vec<Node>,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_indices(name: impl Into<String>, indices: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            indices,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operator: Operator,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Node>,
    pub line: SourceLine,
}
