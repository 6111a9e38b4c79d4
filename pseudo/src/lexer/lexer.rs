// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{ParseError, ParseErrorKind, Position, Stream};

use super::{Keyword, Operator, Punctuator, Token, TokenKind};

pub const DEFAULT_RANGE_SYMBOL: &str = "...";

/// Reads tokens from the line under the cursor. Moving to the next line is
/// left to the parser, which owns the indentation rules.
pub struct Lexer {
    stream: Stream,
    range_symbol: String,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_range_symbol(input, DEFAULT_RANGE_SYMBOL)
    }

    #[must_use]
    pub fn with_range_symbol(input: &str, range_symbol: &str) -> Self {
        Self {
            stream: Stream::new(input),
            range_symbol: range_symbol.to_string(),
        }
    }

    #[must_use]
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut Stream {
        &mut self.stream
    }

    /// Reads the next token of the current line. `EndOfLine` is returned for
    /// every exhausted line except the last one, which yields `None`.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();

        let position = self.stream.position();
        let Some(c) = self.stream.peek(0) else {
            if self.stream.at_end_of_input() {
                return Ok(None);
            }

            return Ok(Some(Token { kind: TokenKind::EndOfLine, position }));
        };

        if self.at_range_symbol() {
            self.stream.skip(self.range_symbol.chars().count());
            let kind = TokenKind::Range(self.range_symbol.clone());
            return Ok(Some(Token { kind, position }));
        }

        let kind = match c {
            '#' => {
                while self.stream.next().is_some() {}
                TokenKind::EndOfLine
            }

            '(' => self.consume_punctuator(Punctuator::LeftParenthesis),
            ')' => self.consume_punctuator(Punctuator::RightParenthesis),
            '[' => self.consume_punctuator(Punctuator::LeftSquareBracket),
            ']' => self.consume_punctuator(Punctuator::RightSquareBracket),
            ',' => self.consume_punctuator(Punctuator::Comma),

            '"' | '\'' => self.read_string()?,
            '0'..='9' => self.read_number()?,

            c if is_operator_char(c) => self.read_operator()?,
            c if c.is_alphabetic() || c == '_' => self.read_keyword(),

            c => return Err(self.stream.error(ParseErrorKind::InvalidCharacter(c))),
        };

        Ok(Some(Token { kind, position }))
    }

    /// Reads a token without consuming it.
    pub fn peek_token(&mut self) -> Result<Option<Token>, ParseError> {
        let snapshot = self.stream.position();
        let token = self.next_token();
        self.stream.restore(snapshot);
        token
    }

    /// Accumulates characters while `predicate` holds, stopping at the end of
    /// the line.
    pub fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut result = String::new();

        while let Some(c) = self.stream.peek(0) {
            if !predicate(c) {
                break;
            }

            result.push(c);
            self.stream.next();
        }

        result
    }

    pub fn skip_whitespace(&mut self) {
        _ = self.read_while(|c| c == ' ' || c == '\t');
    }

    pub fn read_keyword(&mut self) -> TokenKind {
        let mut word = String::new();

        while let Some(c) = self.stream.peek(0) {
            if is_keyword_end(c) || self.at_range_symbol() {
                break;
            }

            word.push(c);
            self.stream.next();
        }

        if let Some(keyword) = Keyword::parse(&word) {
            return TokenKind::Keyword(keyword);
        }

        if let Some(operator) = Operator::from_word(&word) {
            return TokenKind::Operator(operator);
        }

        match word.as_str() {
            "prawda" => TokenKind::Boolean(true),
            "fałsz" => TokenKind::Boolean(false),
            _ if word == self.range_symbol => TokenKind::Range(word),
            _ => TokenKind::Identifier(word),
        }
    }

    pub fn read_number(&mut self) -> Result<TokenKind, ParseError> {
        let position = self.stream.position();
        let digits = self.read_while(|c| c.is_ascii_digit());

        match digits.parse() {
            Ok(number) => Ok(TokenKind::Integer(number)),
            Err(..) => Err(self.stream.error_at(position, ParseErrorKind::NumberTooLarge(digits))),
        }
    }

    pub fn read_string(&mut self) -> Result<TokenKind, ParseError> {
        let position = self.stream.position();
        let Some(quote) = self.stream.next() else {
            return Err(self.stream.error(ParseErrorKind::EndOfFile));
        };

        let contents = self.read_while(|c| c != quote);

        if self.stream.next() != Some(quote) {
            return Err(self.stream.error_at(position, ParseErrorKind::UnterminatedString { quote }));
        }

        Ok(TokenKind::StringLiteral(contents))
    }

    /// Reads an operator, looking one character ahead for the two-character
    /// ones.
    pub fn read_operator(&mut self) -> Result<TokenKind, ParseError> {
        let position = self.stream.position();
        let Some(c) = self.stream.next() else {
            return Err(self.stream.error(ParseErrorKind::EndOfFile));
        };

        let next = self.stream.peek(0);

        let kind = match (c, next) {
            (':', Some('=')) | ('<', Some('-')) => {
                self.stream.next();
                TokenKind::Punctuator(Punctuator::Assignment)
            }

            ('!', Some('=')) => {
                self.stream.next();
                TokenKind::Operator(Operator::NotEqual)
            }

            ('<', Some('=')) => {
                self.stream.next();
                TokenKind::Operator(Operator::LessOrEqual)
            }

            ('>', Some('=')) => {
                self.stream.next();
                TokenKind::Operator(Operator::GreaterOrEqual)
            }

            ('+', _) => TokenKind::Operator(Operator::Add),
            ('-', _) => TokenKind::Operator(Operator::Subtract),
            ('*', _) => TokenKind::Operator(Operator::Multiply),
            ('=', _) => TokenKind::Operator(Operator::Equal),
            ('<', _) => TokenKind::Operator(Operator::Less),
            ('>', _) => TokenKind::Operator(Operator::Greater),

            (c, _) => return Err(self.stream.error_at(position, ParseErrorKind::InvalidCharacter(c))),
        };

        Ok(kind)
    }

    #[must_use]
    pub fn current_position(&self) -> Position {
        self.stream.position()
    }

    fn consume_punctuator(&mut self, punctuator: Punctuator) -> TokenKind {
        self.stream.next();
        TokenKind::Punctuator(punctuator)
    }

    fn at_range_symbol(&self) -> bool {
        let symbolic = self.range_symbol.chars().next().is_some_and(|c| !c.is_alphanumeric());
        symbolic && self.stream.starts_with(&self.range_symbol)
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | ':' | '<' | '>' | '=' | '!')
}

/// Characters that end a word, so `asd1+asd2` reads as two words.
fn is_keyword_end(c: char) -> bool {
    is_operator_char(c) || matches!(c, ' ' | '\t' | '(' | ')' | '[' | ']' | '{' | '}' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token().unwrap() {
            if token.is_end_of_line() {
                if lexer.stream_mut().next_line().is_err() {
                    break;
                }
            }
            tokens.push(token.kind);
        }

        tokens
    }

    #[rstest]
    #[case("123", TokenKind::Integer(123))]
    #[case("\"abc\"", TokenKind::StringLiteral("abc".into()))]
    #[case("'abc'", TokenKind::StringLiteral("abc".into()))]
    #[case("pisz", TokenKind::Keyword(Keyword::Pisz))]
    #[case("prawda", TokenKind::Boolean(true))]
    #[case("fałsz", TokenKind::Boolean(false))]
    #[case("div", TokenKind::Operator(Operator::Divide))]
    #[case("mod", TokenKind::Operator(Operator::Modulo))]
    #[case("zmienna_1", TokenKind::Identifier("zmienna_1".into()))]
    #[case(":=", TokenKind::Punctuator(Punctuator::Assignment))]
    #[case("<-", TokenKind::Punctuator(Punctuator::Assignment))]
    #[case("!=", TokenKind::Operator(Operator::NotEqual))]
    #[case("<=", TokenKind::Operator(Operator::LessOrEqual))]
    #[case(">=", TokenKind::Operator(Operator::GreaterOrEqual))]
    #[case("<", TokenKind::Operator(Operator::Less))]
    #[case("...", TokenKind::Range("...".into()))]
    fn single_token(#[case] input: &str, #[case] expected: TokenKind) {
        assert_eq!(tokens(input), vec![expected]);
    }

    #[test]
    fn words_end_at_operators() {
        assert_eq!(tokens("asd1+asd2"), vec![
            TokenKind::Identifier("asd1".into()),
            TokenKind::Operator(Operator::Add),
            TokenKind::Identifier("asd2".into()),
        ]);
    }

    #[test]
    fn range_between_commas() {
        assert_eq!(tokens("i:=1,...,n"), vec![
            TokenKind::Identifier("i".into()),
            TokenKind::Punctuator(Punctuator::Assignment),
            TokenKind::Integer(1),
            TokenKind::Punctuator(Punctuator::Comma),
            TokenKind::Range("...".into()),
            TokenKind::Punctuator(Punctuator::Comma),
            TokenKind::Identifier("n".into()),
        ]);
    }

    #[test]
    fn word_range_symbol() {
        let mut lexer = Lexer::with_range_symbol("1 do 5", "do");
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| lexer.next_token().unwrap())
            .map(|token| token.kind)
            .collect();

        assert_eq!(kinds, vec![
            TokenKind::Integer(1),
            TokenKind::Range("do".into()),
            TokenKind::Integer(5),
        ]);
    }

    #[test]
    fn comment_ends_the_line() {
        assert_eq!(tokens("pisz 1 # uwaga\npisz 2"), vec![
            TokenKind::Keyword(Keyword::Pisz),
            TokenKind::Integer(1),
            TokenKind::EndOfLine,
            TokenKind::Keyword(Keyword::Pisz),
            TokenKind::Integer(2),
        ]);
    }

    #[test]
    fn peeking_does_not_consume() {
        let mut lexer = Lexer::new("wpp");
        let peeked = lexer.peek_token().unwrap().unwrap();
        assert_eq!(peeked.kind, TokenKind::Keyword(Keyword::Wpp));
        assert_eq!(lexer.current_position(), Position::new(1, 1));
    }

    #[test]
    fn positions_are_one_based() {
        let mut lexer = Lexer::new("a := 12");
        let positions: Vec<Position> = std::iter::from_fn(|| lexer.next_token().unwrap())
            .map(|token| token.position)
            .collect();

        assert_eq!(positions, vec![Position::new(1, 1), Position::new(1, 3), Position::new(1, 6)]);
    }

    #[rstest]
    #[case("\"abc", ParseErrorKind::UnterminatedString { quote: '"' })]
    #[case("'abc\"", ParseErrorKind::UnterminatedString { quote: '\'' })]
    #[case("a ! b", ParseErrorKind::InvalidCharacter('!'))]
    #[case("a : b", ParseErrorKind::InvalidCharacter(':'))]
    #[case("$", ParseErrorKind::InvalidCharacter('$'))]
    #[case("99999999999999999999", ParseErrorKind::NumberTooLarge("99999999999999999999".into()))]
    fn invalid(#[case] input: &str, #[case] expected: ParseErrorKind) {
        let mut lexer = Lexer::new(input);
        let error = loop {
            match lexer.next_token() {
                Ok(Some(..)) => continue,
                Ok(None) => panic!("expected an error for {input:?}"),
                Err(error) => break error,
            }
        };

        assert_eq!(error.kind, expected);
    }
}
