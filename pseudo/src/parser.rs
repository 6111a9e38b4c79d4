// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use log::{debug, trace};

use crate::{
    Assignment, Call, Condition, ExpressionBuilder, FunctionDef, Keyword, Lexer, Loop, Node, Operation, Operator, ParseError, ParseErrorKind, ParserConfig, Punctuator, Return, SourceLine, Statement, StatementKeyword, Token, TokenKind, Variable
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program with the default configuration.
pub fn parse(input: &str) -> ParseResult<Vec<Node>> {
    parse_with_config(input, &ParserConfig::default())
}

pub fn parse_with_config(input: &str, config: &ParserConfig) -> ParseResult<Vec<Node>> {
    Parser::new(input, config).parse_program()
}

/// The character and width of one level of indentation, fixed by the first
/// indented block of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IndentUnit {
    character: char,
    width: usize,
}

/// Outcome of checking the indentation of a line against a block level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indentation {
    /// The line belongs to the block; the cursor is past the indentation.
    Level,

    /// The line belongs to an enclosing block; the cursor is rewound to the
    /// start of the line.
    Dedent,
}

pub struct Parser {
    lexer: Lexer,
    indent: Option<IndentUnit>,
    function_depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(input: &str, config: &ParserConfig) -> Self {
        Self {
            lexer: Lexer::with_range_symbol(input, &config.range_symbol),
            indent: None,
            function_depth: 0,
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Vec<Node>> {
        let nodes = self.parse_block_body(0)?;
        debug!("Parsed {} top-level nodes", nodes.len());
        Ok(nodes)
    }

    /// Parses an indented block, which must hold at least one statement.
    fn parse_block(&mut self, level: usize) -> ParseResult<Vec<Node>> {
        let start = self.lexer.current_position();
        let nodes = self.parse_block_body(level)?;

        if nodes.iter().all(Node::is_end_of_line) {
            return Err(self.lexer.stream().error_at(start, ParseErrorKind::EmptyBlock));
        }

        trace!("Block at level {level} ended with {} nodes", nodes.len());
        Ok(nodes)
    }

    fn parse_block_body(&mut self, level: usize) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            if self.lexer.stream().at_end_of_input() {
                break;
            }

            if self.lexer.stream().rest_is_blank() {
                nodes.push(Node::EndOfLine);
                if self.lexer.stream_mut().next_line().is_err() {
                    break;
                }
                continue;
            }

            if self.measure_indentation(level)? == Indentation::Dedent {
                break;
            }

            self.parse_statement(level, &mut nodes)?;
        }

        Ok(nodes)
    }

    /// Checks the indentation of the line under the cursor, which must be at
    /// the start of a non-blank line.
    fn measure_indentation(&mut self, level: usize) -> ParseResult<Indentation> {
        let stream = self.lexer.stream();

        if level == 0 {
            if matches!(stream.peek(0), Some(' ' | '\t')) {
                return Err(stream.error(ParseErrorKind::UnexpectedIndentation));
            }

            return Ok(Indentation::Level);
        }

        let unit = match self.indent {
            Some(unit) => unit,
            None => {
                let Some(character @ (' ' | '\t')) = stream.peek(0) else {
                    return Ok(Indentation::Dedent);
                };

                let run = self.leading_run(character);
                if character == ' ' && run < 2 {
                    return Err(stream.error(ParseErrorKind::IndentationTooNarrow { width: run }));
                }

                if run % level != 0 {
                    return Err(stream.error(ParseErrorKind::InconsistentIndentation));
                }

                let unit = IndentUnit { character, width: run / level };
                debug!("Indentation unit is {} x {:?}", unit.width, unit.character);
                self.indent = Some(unit);
                unit
            }
        };

        let stream = self.lexer.stream();
        let run = self.leading_run(unit.character);
        let expected = unit.width * level;
        let mixed = matches!(stream.peek(run), Some(' ' | '\t'));

        if run > expected || mixed || run % unit.width != 0 {
            let mut stream = stream.clone();
            stream.skip(run.min(expected));
            return Err(stream.error(ParseErrorKind::InconsistentIndentation));
        }

        if run < expected {
            self.lexer.stream_mut().rewind_line();
            return Ok(Indentation::Dedent);
        }

        self.lexer.stream_mut().skip(run);
        Ok(Indentation::Level)
    }

    fn leading_run(&self, character: char) -> usize {
        let stream = self.lexer.stream();
        (0..).take_while(|offset| stream.peek(*offset) == Some(character)).count()
    }

    fn parse_statement(&mut self, level: usize, nodes: &mut Vec<Node>) -> ParseResult<()> {
        let line = self.lexer.stream().current_line();
        let Some(token) = self.lexer.next_token()? else {
            return Ok(());
        };

        trace!("Statement at {} starts with {} {}", token.position, token.kind.name(), token.kind);

        match token.kind {
            TokenKind::Keyword(keyword) => match keyword {
                Keyword::Pisz | Keyword::Czytaj => {
                    let keyword = if keyword == Keyword::Pisz { StatementKeyword::Print } else { StatementKeyword::Read };
                    let argument = self.parse_expression_until_end_of_line(&line)?;
                    nodes.push(Node::Statement(Statement {
                        keyword,
                        argument: Some(Box::new(argument)),
                        line,
                    }));
                    nodes.push(Node::EndOfLine);
                }

                Keyword::Koniec => {
                    self.finish_line()?;
                    nodes.push(Node::Statement(Statement {
                        keyword: StatementKeyword::Exit,
                        argument: None,
                        line,
                    }));
                    nodes.push(Node::EndOfLine);
                }

                Keyword::Jezeli => nodes.push(self.parse_condition(level, line)?),
                Keyword::Dopoki => nodes.push(self.parse_while(level, line)?),
                Keyword::Dla => nodes.extend(self.parse_for(level, line)?),
                Keyword::Funkcja => nodes.push(self.parse_function(level, line, false)?),
                Keyword::Procedura => nodes.push(self.parse_function(level, line, true)?),

                Keyword::Zwroc => {
                    if self.function_depth == 0 {
                        return Err(self.lexer.stream().error_at(token.position, ParseErrorKind::ReturnOutsideFunction));
                    }

                    nodes.push(self.parse_return(line)?);
                    nodes.push(Node::EndOfLine);
                }

                Keyword::Wpp | Keyword::To | Keyword::Wykonuj => {
                    return Err(self.lexer.stream().error_at(token.position, ParseErrorKind::UnexpectedKeyword(keyword)));
                }
            },

            TokenKind::Identifier(name) => {
                let target = self.parse_assignment_target(name, &line)?;

                match target {
                    Some(target) => {
                        let value = self.parse_expression_until_end_of_line(&line)?;
                        nodes.push(Node::Assignment(Assignment {
                            target,
                            value: Box::new(value),
                            is_iterator: false,
                            line,
                        }));
                    }

                    None => {
                        self.lexer.stream_mut().restore(token.position);
                        nodes.push(self.parse_expression_until_end_of_line(&line)?);
                    }
                }

                nodes.push(Node::EndOfLine);
            }

            _ => {
                self.lexer.stream_mut().restore(token.position);
                nodes.push(self.parse_expression_until_end_of_line(&line)?);
                nodes.push(Node::EndOfLine);
            }
        }

        Ok(())
    }

    /// Reads `name[...]...` and consumes the assignment operator after it.
    /// Returns `None` when no assignment operator follows, so the caller can
    /// re-read the line as an expression.
    fn parse_assignment_target(&mut self, name: String, line: &SourceLine) -> ParseResult<Option<Variable>> {
        if self.lexer.stream().peek(0) == Some('(') {
            return Ok(None);
        }

        let indices = self.parse_indices(line)?;

        match self.lexer.peek_token()? {
            Some(token) if token.is_punctuator(Punctuator::Assignment) => {
                _ = self.lexer.next_token()?;
                Ok(Some(Variable::with_indices(name, indices)))
            }

            _ => Ok(None),
        }
    }

    fn parse_condition(&mut self, level: usize, line: SourceLine) -> ParseResult<Node> {
        let test = self.parse_header_expression(Keyword::To, &line)?;
        let then_block = self.parse_block(level + 1)?;
        let else_block = self.parse_else(level)?;

        Ok(Node::Condition(Condition {
            test: Box::new(test),
            then_block,
            else_block,
            line,
        }))
    }

    /// Looks for a `wpp` at the level of the `jeżeli`, restoring the cursor
    /// when there is none.
    fn parse_else(&mut self, level: usize) -> ParseResult<Option<Vec<Node>>> {
        if self.lexer.stream().at_end_of_input() {
            return Ok(None);
        }

        let snapshot = self.lexer.current_position();

        if self.measure_indentation(level)? == Indentation::Level {
            if let Some(token) = self.lexer.peek_token()? {
                if token.is_keyword(Keyword::Wpp) {
                    _ = self.lexer.next_token()?;
                    self.finish_line()?;
                    return self.parse_block(level + 1).map(Some);
                }
            }
        }

        self.lexer.stream_mut().restore(snapshot);
        Ok(None)
    }

    fn parse_while(&mut self, level: usize, line: SourceLine) -> ParseResult<Node> {
        let test = self.parse_header_expression(Keyword::Wykonuj, &line)?;
        let body = self.parse_block(level + 1)?;

        Ok(Node::Loop(Loop {
            test: Box::new(test),
            body,
            iterator: None,
            line,
        }))
    }

    /// `dla i := start ... end wykonuj` becomes an iterator assignment plus a
    /// `dopóki i <= end` loop that increments `i` after its body.
    fn parse_for(&mut self, level: usize, line: SourceLine) -> ParseResult<Vec<Node>> {
        let name = self.expect_name("dla")?;
        self.expect_punctuator(Punctuator::Assignment, "`:=`")?;

        let (start, terminator) = self.parse_expression(&line)?;
        match &terminator {
            Some(token) if token.is_range() => (),
            Some(token) if token.is_punctuator(Punctuator::Comma) => {
                let token = self.lexer.next_token()?;
                if !token.as_ref().is_some_and(Token::is_range) {
                    return Err(self.unexpected_terminator(token.as_ref(), "range symbol"));
                }
            }
            _ => return Err(self.unexpected_terminator(terminator.as_ref(), "range symbol")),
        }

        if let Some(token) = self.lexer.peek_token()? {
            if token.is_punctuator(Punctuator::Comma) {
                _ = self.lexer.next_token()?;
            }
        }

        let end = self.parse_header_expression(Keyword::Wykonuj, &line)?;
        let mut body = self.parse_block(level + 1)?;
        body.push(Node::Increment {
            name: name.clone(),
            line: line.clone(),
        });

        let initializer = Node::Assignment(Assignment {
            target: Variable::new(name.clone()),
            value: Box::new(start),
            is_iterator: true,
            line: line.clone(),
        });

        let test = Node::Operation(Operation {
            operator: Operator::LessOrEqual,
            left: Box::new(Node::Variable(Variable::new(name.clone()))),
            right: Box::new(end),
            line: line.clone(),
        });

        let lowered = Node::Loop(Loop {
            test: Box::new(test),
            body,
            iterator: Some(name),
            line,
        });

        Ok(vec![initializer, lowered])
    }

    fn parse_function(&mut self, level: usize, line: SourceLine, is_procedure: bool) -> ParseResult<Node> {
        let keyword = if is_procedure { "procedura" } else { "funkcja" };
        let name = self.expect_name(keyword)?;
        self.expect_punctuator(Punctuator::LeftParenthesis, "`(`")?;

        let mut parameters = Vec::new();
        if self.peek_is_punctuator(Punctuator::RightParenthesis)? {
            _ = self.lexer.next_token()?;
        } else {
            loop {
                parameters.push(self.expect_name("(")?);

                let token = self.lexer.next_token()?;
                match &token {
                    Some(token) if token.is_punctuator(Punctuator::Comma) => continue,
                    Some(token) if token.is_punctuator(Punctuator::RightParenthesis) => break,
                    _ => return Err(self.unexpected_terminator(token.as_ref(), "`,` or `)`")),
                }
            }
        }

        self.finish_line()?;

        self.function_depth += 1;
        let body = self.parse_block(level + 1);
        self.function_depth -= 1;

        Ok(Node::FunctionDef(FunctionDef {
            name,
            parameters,
            body: body?,
            is_procedure,
            line,
        }.into()))
    }

    fn parse_return(&mut self, line: SourceLine) -> ParseResult<Node> {
        let has_value = match self.lexer.peek_token()? {
            Some(token) => !token.is_end_of_line(),
            None => false,
        };

        let value = if has_value {
            Some(Box::new(self.parse_expression_until_end_of_line(&line)?))
        } else {
            self.finish_line()?;
            None
        };

        Ok(Node::Return(Return { value, line }))
    }

    /// Reads the expression of a `jeżeli ... to` or `dopóki ... wykonuj`
    /// header, including the closing keyword and the end of the line.
    fn parse_header_expression(&mut self, closing: Keyword, line: &SourceLine) -> ParseResult<Node> {
        let (expression, terminator) = self.parse_expression(line)?;

        match &terminator {
            Some(token) if token.is_keyword(closing) => (),
            _ => {
                let found = describe(terminator.as_ref());
                let position = terminator.map_or_else(|| self.lexer.current_position(), |token| token.position);
                return Err(self.lexer.stream().error_at(position, ParseErrorKind::ExpectedKeyword { expected: closing, found }));
            }
        }

        self.finish_line()?;
        Ok(expression)
    }

    fn parse_expression_until_end_of_line(&mut self, line: &SourceLine) -> ParseResult<Node> {
        let (expression, terminator) = self.parse_expression(line)?;
        self.end_line(terminator)?;
        Ok(expression)
    }

    /// Collects operands and operators up to a terminator and folds them into
    /// one tree. The terminator is consumed and returned; `None` means the
    /// input ended.
    pub fn parse_expression(&mut self, line: &SourceLine) -> ParseResult<(Node, Option<Token>)> {
        let mut builder = ExpressionBuilder::new(line.clone());

        let terminator = loop {
            let Some(token) = self.lexer.next_token()? else {
                break None;
            };

            let position = token.position;
            match token.kind {
                TokenKind::EndOfLine => break Some(token),
                TokenKind::Keyword(keyword) if keyword.is_terminator() => break Some(token),
                TokenKind::Punctuator(
                    Punctuator::RightParenthesis | Punctuator::RightSquareBracket | Punctuator::Comma
                ) | TokenKind::Range(..) => break Some(token),

                TokenKind::Integer(value) => builder.push_operand(Node::Int(value), position),
                TokenKind::Boolean(value) => builder.push_operand(Node::Bool(value), position),
                TokenKind::StringLiteral(value) => builder.push_operand(Node::Str(value), position),
                TokenKind::Operator(operator) => builder.push_operator(operator, position),

                TokenKind::Identifier(name) => {
                    let operand = self.parse_reference(name, line)?;
                    builder.push_operand(operand, position);
                }

                TokenKind::Punctuator(Punctuator::LeftParenthesis) => {
                    let (inner, closing) = self.parse_expression(line)?;
                    match &closing {
                        Some(token) if token.is_punctuator(Punctuator::RightParenthesis) => (),
                        _ => return Err(self.unexpected_terminator(closing.as_ref(), "`)`")),
                    }
                    builder.push_operand(inner, position);
                }

                TokenKind::Keyword(keyword) => {
                    return Err(self.lexer.stream().error_at(position, ParseErrorKind::UnexpectedKeyword(keyword)));
                }

                TokenKind::Punctuator(Punctuator::Assignment | Punctuator::LeftSquareBracket) => {
                    let found = token.to_string();
                    return Err(self.lexer.stream().error_at(position, ParseErrorKind::UnexpectedToken { found }));
                }
            }
        };

        if builder.is_empty() {
            let found = describe(terminator.as_ref());
            let position = terminator.as_ref().map_or_else(|| self.lexer.current_position(), |token| token.position);
            return Err(self.lexer.stream().error_at(position, ParseErrorKind::ExpectedExpression { found }));
        }

        let end = self.lexer.current_position();
        let expression = builder.build(end)
            .map_err(|error| self.lexer.stream().error_at(error.position, error.kind))?;

        Ok((expression, terminator))
    }

    /// Reads what follows an identifier inside an expression: a call when
    /// `(` follows directly, otherwise a variable with optional indices.
    fn parse_reference(&mut self, name: String, line: &SourceLine) -> ParseResult<Node> {
        if self.lexer.stream().peek(0) == Some('(') {
            _ = self.lexer.next_token()?;
            let arguments = self.parse_arguments(line)?;

            return Ok(Node::Call(Call {
                name,
                arguments,
                line: line.clone(),
            }));
        }

        let indices = self.parse_indices(line)?;
        Ok(Node::Variable(Variable::with_indices(name, indices)))
    }

    fn parse_arguments(&mut self, line: &SourceLine) -> ParseResult<Vec<Node>> {
        let mut arguments = Vec::new();

        if self.peek_is_punctuator(Punctuator::RightParenthesis)? {
            _ = self.lexer.next_token()?;
            return Ok(arguments);
        }

        loop {
            let (argument, terminator) = self.parse_expression(line)?;
            arguments.push(argument);

            match &terminator {
                Some(token) if token.is_punctuator(Punctuator::Comma) => continue,
                Some(token) if token.is_punctuator(Punctuator::RightParenthesis) => break,
                _ => return Err(self.unexpected_terminator(terminator.as_ref(), "`,` or `)`")),
            }
        }

        Ok(arguments)
    }

    fn parse_indices(&mut self, line: &SourceLine) -> ParseResult<Vec<Node>> {
        let mut indices = Vec::new();

        while self.lexer.stream().peek(0) == Some('[') {
            _ = self.lexer.next_token()?;

            let (index, terminator) = self.parse_expression(line)?;
            match &terminator {
                Some(token) if token.is_punctuator(Punctuator::RightSquareBracket) => (),
                _ => return Err(self.unexpected_terminator(terminator.as_ref(), "`]`")),
            }

            indices.push(index);
        }

        Ok(indices)
    }

    fn expect_name(&mut self, after: &'static str) -> ParseResult<String> {
        let token = self.lexer.next_token()?;

        match token {
            Some(Token { kind: TokenKind::Identifier(name), .. }) => Ok(name),
            other => {
                let found = describe(other.as_ref());
                let position = other.map_or_else(|| self.lexer.current_position(), |token| token.position);
                Err(self.lexer.stream().error_at(position, ParseErrorKind::ExpectedName { after, found }))
            }
        }
    }

    fn expect_punctuator(&mut self, punctuator: Punctuator, expected: &'static str) -> ParseResult<()> {
        let token = self.lexer.next_token()?;

        match &token {
            Some(token) if token.is_punctuator(punctuator) => Ok(()),
            _ => Err(self.unexpected_terminator(token.as_ref(), expected)),
        }
    }

    fn peek_is_punctuator(&mut self, punctuator: Punctuator) -> ParseResult<bool> {
        Ok(self.lexer.peek_token()?.is_some_and(|token| token.is_punctuator(punctuator)))
    }

    /// Reads the end of the current line and moves to the next one.
    fn finish_line(&mut self) -> ParseResult<()> {
        let token = self.lexer.next_token()?;
        self.end_line(token)
    }

    fn end_line(&mut self, terminator: Option<Token>) -> ParseResult<()> {
        if let Some(token) = terminator {
            if !token.is_end_of_line() {
                let found = token.to_string();
                return Err(self.lexer.stream().error_at(token.position, ParseErrorKind::UnexpectedToken { found }));
            }
        }

        // The last line has no successor; the cursor then rests at the end of
        // the input, which every block loop checks first.
        _ = self.lexer.stream_mut().next_line();
        Ok(())
    }

    fn unexpected_terminator(&self, token: Option<&Token>, expected: &'static str) -> ParseError {
        let found = describe(token);
        let position = token.map_or_else(|| self.lexer.current_position(), |token| token.position);
        self.lexer.stream().error_at(position, ParseErrorKind::Expected { expected, found })
    }
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of file".to_string(),
    }
}
