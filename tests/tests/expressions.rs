// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pseudo::Value;
use rstest::rstest;
use tests::interpret_expression;

#[rstest]
#[case("10", Value::Int(10))]
#[case("5 + 2", Value::Int(7))]
#[case("4 * 9", Value::Int(36))]
#[case("52 mod 30", Value::Int(22))]
#[case("7 div 2", Value::Int(3))]
#[case("(0 - 7) div 2", Value::Int(-4))]
#[case("-7 div 2", Value::Int(-3))]
#[case("-5", Value::Int(-5))]
fn binary_operations(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}

#[rstest]
#[case("2+2*2", Value::Int(6))]
#[case("(2+2)*2", Value::Int(8))]
#[case("10 * 4 + 5", Value::Int(45))]
#[case("10 + 4 + 5", Value::Int(19))]
#[case("10 - 4 - 5", Value::Int(1))]
#[case("10 + 4 * 5", Value::Int(30))]
#[case("2 > 3 + 2", Value::Int(0))]
#[case("1 + 1 = 2", Value::Int(1))]
#[case("1 < 2 = 1", Value::Int(1))]
fn precedence(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}

#[rstest]
#[case("prawda", Value::Int(1))]
#[case("fałsz", Value::Int(0))]
#[case("\"Ala\" + ' ma kota'", Value::Str("Ala ma kota".into()))]
#[case("'ab' * 2", Value::Str("abab".into()))]
#[case("\"a\" = 'a'", Value::Int(1))]
#[case("\"1\" = 1", Value::Int(0))]
#[case("nieznana", Value::Nil)]
#[case("T[2][2]", Value::Nil)]
fn values(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}
