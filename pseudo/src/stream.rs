// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::rc::Rc;

use crate::{error::EndOfFile, ParseError, ParseErrorKind, Position, SourceLine};

/// Character cursor over the program, line by line.
///
/// Lines and columns are stored zero-based and reported one-based.
#[derive(Debug, Clone)]
pub struct Stream {
    lines: Vec<Vec<char>>,
    texts: Vec<Rc<str>>,
    line: usize,
    column: usize,
}

impl Stream {
    #[must_use]
    pub fn new(input: &str) -> Self {
        let texts: Vec<Rc<str>> = input.split('\n')
            .map(|line| Rc::from(line.strip_suffix('\r').unwrap_or(line)))
            .collect();

        let lines = texts.iter()
            .map(|line| line.chars().collect())
            .collect();

        Self {
            lines,
            texts,
            line: 0,
            column: 0,
        }
    }

    /// The character `offset` places after the cursor, or `None` past the
    /// end of the line.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.lines.get(self.line)?
            .get(self.column + offset)
            .copied()
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.column += 1;
        Some(c)
    }

    pub fn next_line(&mut self) -> Result<(), EndOfFile> {
        if self.line + 1 >= self.lines.len() {
            self.column = self.lines.get(self.line).map_or(0, Vec::len);
            return Err(EndOfFile);
        }

        self.line += 1;
        self.column = 0;
        Ok(())
    }

    #[must_use]
    pub fn at_end_of_line(&self) -> bool {
        self.peek(0).is_none()
    }

    #[must_use]
    pub fn at_end_of_input(&self) -> bool {
        self.at_end_of_line() && self.line + 1 >= self.lines.len()
    }

    /// Whether the rest of the line holds nothing but whitespace or a comment.
    #[must_use]
    pub fn rest_is_blank(&self) -> bool {
        self.rest()
            .iter()
            .find(|c| !matches!(c, ' ' | '\t'))
            .map_or(true, |c| *c == '#')
    }

    #[must_use]
    pub fn starts_with(&self, pattern: &str) -> bool {
        let rest = self.rest();
        let mut count = 0;

        for (expected, actual) in pattern.chars().zip(rest.iter()) {
            if expected != *actual {
                return false;
            }
            count += 1;
        }

        count == pattern.chars().count()
    }

    pub fn skip(&mut self, count: usize) {
        for _ in 0..count {
            if self.next().is_none() {
                break;
            }
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line + 1, self.column + 1)
    }

    pub fn restore(&mut self, position: Position) {
        self.line = position.line() - 1;
        self.column = position.column() - 1;
    }

    /// Moves the cursor back to the first column of the current line.
    pub fn rewind_line(&mut self) {
        self.column = 0;
    }

    #[must_use]
    pub fn current_line(&self) -> SourceLine {
        self.source_line(self.line)
    }

    #[must_use]
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(self.position(), kind)
    }

    #[must_use]
    pub fn error_at(&self, position: Position, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position,
            source_line: self.source_line(position.line() - 1),
        }
    }

    fn rest(&self) -> &[char] {
        self.lines.get(self.line)
            .and_then(|line| line.get(self.column..))
            .unwrap_or_default()
    }

    fn source_line(&self, index: usize) -> SourceLine {
        let text = self.texts.get(index)
            .cloned()
            .unwrap_or_else(|| Rc::from(""));

        SourceLine::new(index + 1, text)
    }
}
