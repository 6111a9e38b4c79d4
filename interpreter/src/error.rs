// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt::Display, path::{Path, PathBuf}};

use colored::{ColoredString, Colorize};
use pseudo::{ParseError, ParseErrorKind, RuntimeError};

/// Columns a tab takes up when a source line is echoed.
const TAB_WIDTH: usize = 4;

/// Prints a message with the offending line and its neighbours, and a caret
/// under the place where things went wrong.
pub struct ErrorPrinter {
    path: PathBuf,
    lines: Vec<String>,

    /// One-based
    line: usize,

    /// One-based
    column: usize,
    width: usize,
    message: String,
    hint: Option<String>,

    line_number: ColoredString,
}

impl ErrorPrinter {
    #[must_use = "Use the `print` method to actually print"]
    pub fn new(path: &Path, source: &str, line: usize, message: impl Display) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: source.lines().map(str::to_string).collect(),
            line,
            column: 1,
            width: 1,
            message: message.to_string(),
            hint: None,

            line_number: line.to_string().blue().bold(),
        }
    }

    #[must_use]
    pub fn for_parse_error(path: &Path, source: &str, error: &ParseError) -> Self {
        Self::new(path, source, error.position.line(), error)
            .span(error.position.column(), 1)
            .hint(hint_for(&error.kind))
    }

    /// Runtime errors only know their line, so the whole statement is
    /// underlined.
    #[must_use]
    pub fn for_runtime_error(path: &Path, source: &str, error: &RuntimeError) -> Self {
        let text = error.line.text();
        let indent = text.chars().take_while(|c| c.is_whitespace()).count();
        let width = text.trim().chars().count();

        Self::new(path, source, error.line.number(), error)
            .span(indent + 1, width)
    }

    #[must_use]
    pub fn span(self, column: usize, width: usize) -> Self {
        Self {
            column: column.max(1),
            width: width.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn hint(self, hint: impl Into<Option<String>>) -> Self {
        Self {
            hint: hint.into(),
            ..self
        }
    }

    pub fn print(self) {
        self.print_prelude();

        self.print_lines();

        self.print_postlude();
    }

    fn print_prelude(&self) {
        eprintln!("{}: {}", "błąd".red().bold(), self.message.bold());
        eprintln!();
    }

    fn print_lines(&self) {
        let index = self.line.saturating_sub(1);

        if let Some(previous) = index.checked_sub(1).and_then(|index| self.lines.get(index)) {
            if !previous.trim().is_empty() {
                self.print_line(false, previous);
            }
        }

        self.print_line(true, self.lines.get(index).map_or("", String::as_str));
        self.print_error_indicator();

        if let Some(next) = self.lines.get(index + 1) {
            if !next.trim().is_empty() {
                self.print_line(false, next);
            }
        }
    }

    fn print_line(&self, is_primary: bool, line: &str) {
        self.print_line_prefix(is_primary);
        eprintln!("{}", expand_tabs(line));
    }

    fn print_error_indicator(&self) {
        let line = self.lines.get(self.line.saturating_sub(1)).map_or("", String::as_str);
        let (offset, width) = display_span(line, self.column, self.width);

        let spaces = " ".repeat(offset);
        let caret = "^".red().bold();
        let tildes = "~".repeat(width - 1).red();

        let hint = match &self.hint {
            Some(hint) => format!("hint: {hint}").red().bold(),
            None => "".bold(),
        };

        self.print_line_prefix(false);
        eprintln!("{spaces}{caret}{tildes} {hint}");
    }

    fn print_line_prefix(&self, is_primary: bool) {
        let separator = " | ".blue().bold();

        if is_primary {
            eprint!("{} {separator}", self.line_number);
        } else {
            eprint!("{} {separator}", " ".repeat(self.line_number.len()));
        }
    }

    fn print_postlude(&self) {
        eprintln!();
        eprintln!("In {}:{}:{}\n", self.path.display(), self.line, self.column);
    }
}

fn expand_tabs(line: &str) -> String {
    line.replace('\t', &" ".repeat(TAB_WIDTH))
}

fn display_width(text: impl Iterator<Item = char>) -> usize {
    text.map(|c| if c == '\t' { TAB_WIDTH } else { 1 }).sum()
}

/// Where the caret of a one-based `column` lands on the echoed line, and how
/// many columns `width` characters from there take up.
fn display_span(line: &str, column: usize, width: usize) -> (usize, usize) {
    let before = column.saturating_sub(1);
    let past_end = before.saturating_sub(line.chars().count());

    let offset = display_width(line.chars().take(before)) + past_end;
    let width = display_width(line.chars().skip(before).take(width));

    (offset, width.max(1))
}

fn hint_for(kind: &ParseErrorKind) -> Option<String> {
    match kind {
        ParseErrorKind::InconsistentIndentation => Some("every block must be indented by the same unit".into()),
        ParseErrorKind::IndentationTooNarrow { .. } => Some("indent with at least 2 spaces or a tab".into()),
        ParseErrorKind::ExpectedKeyword { expected, .. } => Some(format!("the line should end with `{expected}`")),
        ParseErrorKind::EmptyBlock => Some("indent the statements that belong to this block".into()),
        _ => None,
    }
}
