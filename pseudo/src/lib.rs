// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod ast;
mod config;
mod error;
mod expression;
mod lexer;
mod parser;
mod runtime;
mod stream;
mod util;

pub use self::{
    ast::*,
    config::{ConfigRoot, ConfigSectionLog, ParserConfig},
    error::{EndOfFile, ParseError, ParseErrorKind},
    expression::{ExpressionBuilder, ExpressionError, ExpressionItem},
    lexer::{Keyword, Lexer, Operator, Precedence, Punctuator, Token, TokenKind, DEFAULT_RANGE_SYMBOL},
    parser::{parse, parse_with_config, ParseResult, Parser},
    runtime::*,
    stream::Stream,
    util::{Position, SourceLine},
};
