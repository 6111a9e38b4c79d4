// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::EnumIter, strum::Display)]
pub enum Keyword {
    #[strum(serialize = "czytaj")]
    Czytaj,
    #[strum(serialize = "dla")]
    Dla,
    #[strum(serialize = "dopóki")]
    Dopoki,
    #[strum(serialize = "funkcja")]
    Funkcja,
    #[strum(serialize = "jeżeli")]
    Jezeli,
    #[strum(serialize = "koniec")]
    Koniec,
    #[strum(serialize = "pisz")]
    Pisz,
    #[strum(serialize = "procedura")]
    Procedura,
    #[strum(serialize = "to")]
    To,
    #[strum(serialize = "wpp")]
    Wpp,
    #[strum(serialize = "wykonuj")]
    Wykonuj,
    #[strum(serialize = "zwróć")]
    Zwroc,
}

impl Keyword {
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref() == input)
    }

    /// Keywords that end the expression in front of them, e.g. the `to` of
    /// `jeżeli a = 1 to`.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self, Self::To | Self::Wykonuj)
    }
}
