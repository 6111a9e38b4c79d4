// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::VecDeque, io, thread};

use pseudo::{parse, Console, ExecutionError, Interpreter, Node, Outcome, ParseErrorKind, RuntimeErrorKind, Value};

fn parse_program(input: &str) -> Vec<Node> {
    match parse(input) {
        Ok(nodes) => nodes,
        Err(e) => panic!("Failed to parse {input:?}: {e} at {}", e.position),
    }
}

pub fn interpret(input: &str, stdin: &[&str]) -> (Result<Outcome, ExecutionError>, TestConsole) {
    let nodes = parse_program(input);
    let mut interpreter = Interpreter::new(TestConsole::new(stdin));
    let result = interpreter.run(&nodes);
    (result, interpreter.into_console())
}

pub fn interpret_and_return_stdout(input: &str) -> String {
    let (result, console) = interpret(input, &[]);

    if let Err(e) = result {
        panic!("Program failed: {e}\n{input}");
    }

    console.stdout
}

/// Evaluates `input` by assigning it to a variable and reading it back.
pub fn interpret_expression(input: &str) -> Value {
    let nodes = parse_program(&format!("wynik := {input}"));
    let mut interpreter = Interpreter::new(TestConsole::new(&[]));

    if let Err(e) = interpreter.run(&nodes) {
        panic!("Expression failed: {e}");
    }

    interpreter.memory().get("wynik", None)
}

pub fn runtime_error(input: &str) -> (RuntimeErrorKind, usize) {
    match interpret(input, &[]).0 {
        Err(ExecutionError::Runtime(e)) => (e.kind, e.line.number()),
        other => panic!("Expected a runtime error, got {other:?}"),
    }
}

pub fn parse_error(input: &str) -> (ParseErrorKind, usize) {
    match parse(input) {
        Err(e) => (e.kind, e.position.line()),
        Ok(nodes) => panic!("Expected a parse error, got {nodes:#?}"),
    }
}

/// Runs `f` on a thread with room for [`pseudo::MAX_CALL_DEPTH`] nested
/// calls, which the default test thread stack does not have.
pub fn with_large_stack<T>(f: impl FnOnce() -> T + Send + 'static) -> T
        where T: Send + 'static {
    let handle = thread::Builder::new()
        .stack_size(512 * 1024 * 1024)
        .spawn(f)
        .unwrap();

    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Feeds `czytaj` from a list of lines and collects what `pisz` writes.
#[derive(Debug, Default)]
pub struct TestConsole {
    stdin: VecDeque<String>,
    pub stdout: String,
    pub prompts: Vec<String>,
}

impl TestConsole {
    #[must_use]
    pub fn new(stdin: &[&str]) -> Self {
        Self {
            stdin: stdin.iter().map(|line| line.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Console for TestConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.stdin.pop_front().unwrap_or_default())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.stdout += text;
        Ok(())
    }
}
