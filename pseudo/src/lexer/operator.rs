// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::Display)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "div")]
    Divide,
    #[strum(serialize = "mod")]
    Modulo,

    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<=")]
    LessOrEqual,
    #[strum(serialize = ">=")]
    GreaterOrEqual,
}

/// Binding strength of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Comparison,
    Additive,
    Multiplicative,
}

impl Precedence {
    #[must_use]
    pub const fn tighter(self) -> Option<Self> {
        match self {
            Self::Comparison => Some(Self::Additive),
            Self::Additive => Some(Self::Multiplicative),
            Self::Multiplicative => None,
        }
    }
}

impl Operator {
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::Multiply | Self::Divide | Self::Modulo => Precedence::Multiplicative,
            Self::Add | Self::Subtract => Precedence::Additive,
            _ => Precedence::Comparison,
        }
    }

    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(self.precedence(), Precedence::Comparison)
    }

    /// `+` and `-` may start an expression, where they act on an implicit zero.
    #[must_use]
    pub const fn is_sign(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Operators spelled as words are read by the keyword reader instead of
    /// the operator reader.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "div" => Some(Self::Divide),
            "mod" => Some(Self::Modulo),
            _ => None,
        }
    }
}
