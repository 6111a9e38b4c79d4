// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tests::{interpret, interpret_and_return_stdout};

#[rstest]
#[case("0")]
#[case("7")]
#[case("42")]
#[case("1000000")]
#[case("9223372036854775807")]
fn integer_literals_print_unchanged(#[case] literal: &str) {
    assert_eq!(interpret_and_return_stdout(&format!("pisz {literal}")), literal);
}

#[rstest]
#[case(
    "dla i:=1,...,5 wykonuj
    pisz i
",
    "12345",
)]
#[case(
    "dla i := 9223372036854775805 ... 9223372036854775807 wykonuj
    pisz i mod 10
",
    "567",
)]
#[case(
    "jeżeli prawda to
    pisz 4
wpp
    pisz 3
",
    "4",
)]
#[case(
    "jeżeli fałsz to
    pisz 4
wpp
    pisz 3
",
    "3",
)]
#[case(
    "T[1][1] := 5
pisz T[1][1]
pisz T[2][2]
",
    "5nil",
)]
#[case(
    "funkcja a(b)
    zwróć b
pisz a(2)
",
    "2",
)]
#[case(
    "i <- 0
dopóki i < 3 wykonuj
    pisz i
    i <- i + 1
",
    "012",
)]
#[case(
    "# wypisuje tabliczkę mnożenia
dla i:=1,...,3 wykonuj
    dla j:=1,...,3 wykonuj
        pisz i*j
        pisz \" \"
    pisz \"\\n\"
",
    "1 2 3 \n2 4 6 \n3 6 9 \n",
)]
#[case(
    "funkcja fib(n)
    jeżeli n < 2 to
        zwróć n
    zwróć fib(n-1) + fib(n-2)

dla i:=0,...,10 wykonuj
    pisz fib(i)
    pisz ' '
",
    "0 1 1 2 3 5 8 13 21 34 55 ",
)]
#[case(
    "procedura wypisz(x)
    jeżeli x = 0 to
        zwróć
    pisz x
wypisz(0)
wypisz(5)
",
    "5",
)]
#[case(
    "n := 3
dla i := 1 ... n wykonuj
    T[i] := i * i
suma := 0
dla k:=1,...,n wykonuj
    suma := suma + T[k]
pisz suma
",
    "14",
)]
#[case(
    "s := 'a'
jeżeli s = 'a' to
    pisz 'tak'
",
    "tak",
)]
fn interpret_and_return_stdout_tests(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(interpret_and_return_stdout(input), expected);
}

#[test]
fn reading_input() {
    let program = "czytaj imie\nczytaj wiek\npisz imie\npisz ' '\npisz wiek + 1";
    let (result, console) = interpret(program, &["Ola", "20"]);

    result.unwrap();
    assert_eq!(console.prompts, vec!["imie: ", "wiek: "]);
    assert_eq!(console.stdout, "Ola 21");
}

#[test]
fn exit_skips_the_rest() {
    let (result, console) = interpret("dla i:=1,...,5 wykonuj\n    pisz i\n    jeżeli i = 2 to\n        koniec", &[]);
    assert_eq!(result.unwrap(), pseudo::Outcome::Exited);
    assert_eq!(console.stdout, "12");
}

#[test]
fn reparsing_gives_the_same_program() {
    let program = "funkcja a(b)\n    zwróć b * 2\ndla i:=1,...,3 wykonuj\n    pisz a(i)\n";
    assert_eq!(pseudo::parse(program).unwrap(), pseudo::parse(program).unwrap());
}
