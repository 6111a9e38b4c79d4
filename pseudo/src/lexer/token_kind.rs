// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use super::{Keyword, Operator, Punctuator};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),

    Identifier(String),
    Integer(i64),
    Boolean(bool),
    StringLiteral(String),

    Operator(Operator),
    Punctuator(Punctuator),

    /// The symbol between the bounds of a `dla` loop, as configured.
    Range(String),

    /// Line content is exhausted (this includes a trailing `#` comment).
    EndOfLine,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(..) => "keyword",

            Self::Identifier(..) => "identifier",
            Self::Integer(..) => "number",
            Self::Boolean(..) => "boolean",
            Self::StringLiteral(..) => "string",

            Self::Operator(..) => "operator",
            Self::Punctuator(punctuator) => punctuator.name(),
            Self::Range(..) => "range symbol",

            Self::EndOfLine => "end of line",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "`{keyword}`"),
            Self::Identifier(ident) => write!(f, "`{ident}`"),
            Self::Integer(int) => write!(f, "`{int}`"),
            Self::Boolean(true) => f.write_str("`prawda`"),
            Self::Boolean(false) => f.write_str("`fałsz`"),
            Self::StringLiteral(str) => write!(f, "\"{str}\""),
            Self::Operator(operator) => write!(f, "`{operator}`"),
            Self::Punctuator(punctuator) => write!(f, "`{punctuator}`"),
            Self::Range(symbol) => write!(f, "`{symbol}`"),
            Self::EndOfLine => f.write_str("end of line"),
        }
    }
}
