// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt::Display, rc::Rc};

/// The literal text of a source line, kept by the nodes that can fail at
/// runtime so the error can show what the user wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    number: usize,
    text: Rc<str>,
}

impl SourceLine {
    #[must_use]
    pub fn new(number: usize, text: impl Into<Rc<str>>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// One-based line number
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text.trim())
    }
}
