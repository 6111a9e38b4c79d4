// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod keyword;
mod lexer;
mod operator;
mod punctuator;
mod token;
mod token_kind;

pub use self::{
    keyword::Keyword,
    lexer::{Lexer, DEFAULT_RANGE_SYMBOL},
    operator::{Operator, Precedence},
    punctuator::Punctuator,
    token::Token,
    token_kind::TokenKind,
};
