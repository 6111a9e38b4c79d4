// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Punctuator {
    #[strum(serialize = "assignment")]
    Assignment,
    #[strum(serialize = "comma")]
    Comma,
    #[strum(serialize = "opening parenthesis")]
    LeftParenthesis,
    #[strum(serialize = "closing parenthesis")]
    RightParenthesis,
    #[strum(serialize = "opening square bracket")]
    LeftSquareBracket,
    #[strum(serialize = "closing square bracket")]
    RightSquareBracket,
}

impl Punctuator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => ":=",
            Self::Comma => ",",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::LeftSquareBracket => "[",
            Self::RightSquareBracket => "]",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Display for Punctuator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
