// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pseudo::{Keyword, Operator, ParseErrorKind, RuntimeErrorKind, MAX_CALL_DEPTH};
use rstest::rstest;
use tests::{interpret_and_return_stdout, parse_error, runtime_error, with_large_stack};

#[rstest]
#[case("jeżeli 1 to\n    pisz 1\n  pisz 2", ParseErrorKind::InconsistentIndentation, 3)]
#[case("jeżeli 1 to\n    pisz 1\n\tpisz 2", ParseErrorKind::InconsistentIndentation, 3)]
#[case("jeżeli 1 to\n\n    # komentarz\npisz 2", ParseErrorKind::EmptyBlock, 2)]
#[case("funkcja f()\npisz 2", ParseErrorKind::EmptyBlock, 2)]
#[case("dopóki 1 to\n    pisz 1", ParseErrorKind::ExpectedKeyword { expected: Keyword::Wykonuj, found: "`to`".into() }, 1)]
#[case("pisz 2 * * 2", ParseErrorKind::CannotOperateOnNil { operator: Operator::Multiply }, 1)]
#[case("pisz (2 + 2", ParseErrorKind::Expected { expected: "`)`", found: "end of file".into() }, 1)]
#[case("a := 1\nzwróć a", ParseErrorKind::ReturnOutsideFunction, 2)]
#[case("pisz 'abc", ParseErrorKind::UnterminatedString { quote: '\'' }, 1)]
#[case("pisz 1 ? 2", ParseErrorKind::InvalidCharacter('?'), 1)]
fn parse_errors(#[case] input: &str, #[case] expected: ParseErrorKind, #[case] line: usize) {
    assert_eq!(parse_error(input), (expected, line));
}

#[rstest]
#[case("dla i:=1,...,5 wykonuj\n    i := 3", RuntimeErrorKind::AssignToIterator { name: "i".into() }, 2)]
#[case("funkcja a(b)\n    zwróć b\npisz a()", RuntimeErrorKind::ArgumentCount { name: "a".into(), expected: 1, found: 0 }, 3)]
#[case("pisz nic(1)", RuntimeErrorKind::UndefinedFunction { name: "nic".into() }, 1)]
#[case("czytaj 1 + 1", RuntimeErrorKind::ReadTargetNotVariable, 1)]
#[case("procedura p()\n    zwróć 5\np()", RuntimeErrorKind::ProcedureReturnsValue { name: "p".into() }, 2)]
#[case("pisz 5 mod 0", RuntimeErrorKind::DivisionByZero, 1)]
#[case("a := 9223372036854775807\na := a + 1", RuntimeErrorKind::Overflow { operator: Operator::Add }, 2)]
#[case("pisz 'a' - 1", RuntimeErrorKind::TypeMismatch { operator: Operator::Subtract, left: "string", right: "number" }, 1)]
#[case("pisz x + 1", RuntimeErrorKind::TypeMismatch { operator: Operator::Add, left: "nil", right: "number" }, 1)]
#[case("pisz 'x' * 1000000000000000000", RuntimeErrorKind::Overflow { operator: Operator::Multiply }, 1)]
fn runtime_errors(#[case] input: &str, #[case] expected: RuntimeErrorKind, #[case] line: usize) {
    assert_eq!(runtime_error(input), (expected, line));
}

const COUNTDOWN: &str = "\
funkcja f(n)
    jeżeli n = 0 to
        zwróć 0
    zwróć f(n - 1)
";

#[rstest]
#[case(1_000_000)]
#[case(MAX_CALL_DEPTH)]
fn runaway_recursion(#[case] depth: usize) {
    let input = format!("{COUNTDOWN}pisz f({depth})");
    let error = with_large_stack(move || runtime_error(&input));

    assert_eq!(error, (RuntimeErrorKind::RecursionLimit { name: "f".into(), limit: MAX_CALL_DEPTH }, 4));
}

#[test]
fn recursion_below_the_limit() {
    let input = format!("{COUNTDOWN}pisz f({})", MAX_CALL_DEPTH - 1);
    assert_eq!(with_large_stack(move || interpret_and_return_stdout(&input)), "0");
}
