// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, rc::Rc};

use log::{debug, trace};

use crate::{
    Assignment, Call, Console, ExecutionError, FunctionDef, InternalFault, Memory, Node, RuntimeError, RuntimeErrorKind, ScopeId, Statement, StatementKeyword, Value, Variable
};

/// Calls nested deeper than this fail instead of exhausting the stack.
pub const MAX_CALL_DEPTH: usize = 1000;

/// How a block stopped executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Completed,
    Returned(Option<Value>),
    Exit,

    /// The `dla` iterator cannot be incremented past the largest number, so
    /// the loop has nothing left to visit.
    RangeExhausted,
}

/// How a whole program stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,

    /// `koniec` was executed.
    Exited,
}

/// Unwinds an evaluation, which has no [`Flow`] of its own to carry a
/// `koniec` executed inside a called function.
enum Halt {
    Exit,
    Failed(ExecutionError),
}

impl From<ExecutionError> for Halt {
    fn from(value: ExecutionError) -> Self {
        Self::Failed(value)
    }
}

impl From<RuntimeError> for Halt {
    fn from(value: RuntimeError) -> Self {
        Self::Failed(value.into())
    }
}

impl From<InternalFault> for Halt {
    fn from(value: InternalFault) -> Self {
        Self::Failed(value.into())
    }
}

type Evaluation<T> = Result<T, Halt>;

struct Frame {
    scope: ScopeId,
    function: Rc<FunctionDef>,
}

pub struct Interpreter<C>
        where C: Console {
    memory: Memory,
    functions: HashMap<String, Rc<FunctionDef>>,
    frames: Vec<Frame>,
    console: C,
}

impl<C> Interpreter<C>
        where C: Console {
    pub fn new(console: C) -> Self {
        Self {
            memory: Memory::new(),
            functions: HashMap::new(),
            frames: Vec::new(),
            console,
        }
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    #[must_use]
    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    pub fn run(&mut self, nodes: &[Node]) -> Result<Outcome, ExecutionError> {
        let flow = self.execute_block(nodes);
        self.console.flush().map_err(InternalFault::from)?;

        match flow? {
            Flow::Completed | Flow::RangeExhausted => Ok(Outcome::Finished),
            Flow::Exit => Ok(Outcome::Exited),
            Flow::Returned(..) => Err(InternalFault::ReturnEscaped.into()),
        }
    }

    pub fn execute_block(&mut self, nodes: &[Node]) -> Result<Flow, ExecutionError> {
        for node in nodes {
            match self.execute(node)? {
                Flow::Completed => continue,
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Completed)
    }

    pub fn execute(&mut self, node: &Node) -> Result<Flow, ExecutionError> {
        match self.execute_node(node) {
            Ok(flow) => Ok(flow),
            Err(Halt::Exit) => Ok(Flow::Exit),
            Err(Halt::Failed(error)) => Err(error),
        }
    }

    fn execute_node(&mut self, node: &Node) -> Evaluation<Flow> {
        match node {
            Node::EndOfLine => Ok(Flow::Completed),

            Node::Assignment(assignment) => {
                self.execute_assignment(assignment)?;
                Ok(Flow::Completed)
            }

            Node::Statement(statement) => self.execute_statement(statement),

            Node::Condition(condition) => {
                if self.evaluate(&condition.test)?.is_truthy() {
                    return Ok(self.execute_block(&condition.then_block)?);
                }

                match &condition.else_block {
                    Some(block) => Ok(self.execute_block(block)?),
                    None => Ok(Flow::Completed),
                }
            }

            Node::Loop(lp) => {
                let flow = loop {
                    if !self.evaluate(&lp.test)?.is_truthy() {
                        break Flow::Completed;
                    }

                    match self.execute_block(&lp.body)? {
                        Flow::Completed => continue,
                        Flow::RangeExhausted => break Flow::Completed,
                        flow => break flow,
                    }
                };

                if let Some(iterator) = &lp.iterator {
                    let scope = self.scope();
                    self.memory.delete(iterator, scope);
                }

                Ok(flow)
            }

            Node::FunctionDef(function) => {
                debug!("Defining {} `{}` with {} parameter(s)", kind_of(function), function.name, function.parameters.len());
                self.functions.insert(function.name.clone(), Rc::clone(function));
                Ok(Flow::Completed)
            }

            Node::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => Some(self.evaluate(value)?),
                    None => None,
                };

                if value.is_some() {
                    if let Some(frame) = self.frames.last().filter(|frame| frame.function.is_procedure) {
                        let kind = RuntimeErrorKind::ProcedureReturnsValue { name: frame.function.name.clone() };
                        return Err(RuntimeError::new(kind, &ret.line).into());
                    }
                }

                Ok(Flow::Returned(value))
            }

            Node::Increment { name, line } => {
                let scope = self.scope();
                match self.memory.increment(name, scope) {
                    Ok(()) => Ok(Flow::Completed),
                    Err(RuntimeErrorKind::Overflow { .. }) => {
                        trace!("Iterator `{name}` reached the largest number");
                        Ok(Flow::RangeExhausted)
                    }
                    Err(kind) => Err(RuntimeError::new(kind, line).into()),
                }
            }

            Node::Int(..) | Node::Str(..) | Node::Bool(..) | Node::Variable(..) | Node::Operation(..) | Node::Call(..) => {
                self.evaluate(node)?;
                Ok(Flow::Completed)
            }
        }
    }

    fn execute_assignment(&mut self, assignment: &Assignment) -> Evaluation<()> {
        let value = self.evaluate(&assignment.value)?;
        let key = self.key_of(&assignment.target)?;
        let scope = self.scope();

        let result = if assignment.is_iterator {
            self.memory.bind_iterator(&key, value, scope)
        } else {
            self.memory.save(&key, value, scope)
        };

        result.map_err(|kind| RuntimeError::new(kind, &assignment.line))?;
        Ok(())
    }

    fn execute_statement(&mut self, statement: &Statement) -> Evaluation<Flow> {
        trace!("Executing `{}` on line {}", statement.keyword.keyword(), statement.line.number());

        match statement.keyword {
            StatementKeyword::Print => {
                let Some(argument) = &statement.argument else {
                    return Ok(Flow::Completed);
                };

                let written = match self.evaluate(argument)? {
                    Value::Str(text) if text == "\\n" => self.console.write("\n"),
                    value => self.console.write(&value.to_string()),
                };

                written.map_err(InternalFault::from)?;

                Ok(Flow::Completed)
            }

            StatementKeyword::Read => {
                let Some(variable) = statement.argument.as_deref().and_then(Node::as_variable) else {
                    return Err(RuntimeError::new(RuntimeErrorKind::ReadTargetNotVariable, &statement.line).into());
                };

                let input = self.console.read_line(&format!("{}: ", variable.name))
                    .map_err(InternalFault::from)?;

                let key = self.key_of(variable)?;
                let scope = self.scope();
                self.memory.save(&key, Value::from_input(&input), scope)
                    .map_err(|kind| RuntimeError::new(kind, &statement.line))?;

                Ok(Flow::Completed)
            }

            StatementKeyword::Exit => Ok(Flow::Exit),
        }
    }

    fn evaluate(&mut self, node: &Node) -> Evaluation<Value> {
        match node {
            Node::Int(value) => Ok(Value::Int(*value)),
            Node::Str(value) => Ok(Value::Str(value.clone())),
            Node::Bool(value) => Ok(Value::from(*value)),

            Node::Variable(variable) => {
                let key = self.key_of(variable)?;
                Ok(self.memory.get(&key, self.scope()))
            }

            Node::Operation(operation) => {
                let left = self.evaluate(&operation.left)?;
                let right = self.evaluate(&operation.right)?;

                Value::apply(operation.operator, left, right)
                    .map_err(|kind| RuntimeError::new(kind, &operation.line).into())
            }

            Node::Call(call) => self.call(call),

            Node::Assignment(..) | Node::Statement(..) | Node::Condition(..) | Node::Loop(..)
                | Node::FunctionDef(..) | Node::Return(..) | Node::Increment { .. } | Node::EndOfLine => {
                Err(InternalFault::NotAnExpression(node.name()).into())
            }
        }
    }

    fn call(&mut self, call: &Call) -> Evaluation<Value> {
        let Some(function) = self.functions.get(&call.name).cloned() else {
            let kind = RuntimeErrorKind::UndefinedFunction { name: call.name.clone() };
            return Err(RuntimeError::new(kind, &call.line).into());
        };

        if call.arguments.len() != function.parameters.len() {
            let kind = RuntimeErrorKind::ArgumentCount {
                name: call.name.clone(),
                expected: function.parameters.len(),
                found: call.arguments.len(),
            };
            return Err(RuntimeError::new(kind, &call.line).into());
        }

        if self.frames.len() >= MAX_CALL_DEPTH {
            let kind = RuntimeErrorKind::RecursionLimit {
                name: call.name.clone(),
                limit: MAX_CALL_DEPTH,
            };
            return Err(RuntimeError::new(kind, &call.line).into());
        }

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let scope = self.memory.open_scope();
        trace!("Calling `{}` in scope {scope}", function.name);

        for (parameter, value) in function.parameters.iter().zip(arguments) {
            self.memory.define_local(parameter, value, scope);
        }

        self.frames.push(Frame {
            scope,
            function: Rc::clone(&function),
        });

        let flow = self.execute_block(&function.body);

        self.frames.pop();
        self.memory.close_scope(scope);

        match flow? {
            Flow::Completed | Flow::RangeExhausted => Ok(Value::Nil),
            Flow::Returned(value) => Ok(value.unwrap_or_default()),
            Flow::Exit => Err(Halt::Exit),
        }
    }

    /// The memory key of a variable: its name, followed by the evaluated
    /// indices for an array element.
    fn key_of(&mut self, variable: &Variable) -> Evaluation<String> {
        if variable.indices.is_empty() {
            return Ok(variable.name.clone());
        }

        let mut indices = Vec::with_capacity(variable.indices.len());
        for index in &variable.indices {
            indices.push(self.evaluate(index)?);
        }

        Ok(Memory::composite_key(&variable.name, &indices))
    }

    fn scope(&self) -> Option<ScopeId> {
        self.frames.last().map(|frame| frame.scope)
    }
}

fn kind_of(function: &FunctionDef) -> &'static str {
    if function.is_procedure {
        "procedure"
    } else {
        "function"
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io};

    use super::*;
    use crate::{parse, Return, SourceLine};

    #[derive(Default)]
    struct TestConsole {
        input: VecDeque<String>,
        output: String,
        prompts: Vec<String>,
    }

    impl Console for TestConsole {
        fn read_line(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_string());
            Ok(self.input.pop_front().unwrap_or_default())
        }

        fn write(&mut self, text: &str) -> io::Result<()> {
            self.output += text;
            Ok(())
        }
    }

    fn run(source: &str) -> (Result<Outcome, ExecutionError>, Interpreter<TestConsole>) {
        let nodes = parse(source).unwrap();
        let mut interpreter = Interpreter::new(TestConsole::default());
        let result = interpreter.run(&nodes);
        (result, interpreter)
    }

    fn output_of(source: &str) -> String {
        let (result, interpreter) = run(source);
        result.unwrap();
        interpreter.into_console().output
    }

    fn runtime_error_of(source: &str) -> RuntimeError {
        match run(source).0 {
            Err(ExecutionError::Runtime(error)) => error,
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn precedence() {
        assert_eq!(output_of("pisz 2+2*2"), "6");
        assert_eq!(output_of("pisz (2+2)*2"), "8");
    }

    #[test]
    fn assignment_is_visible_in_memory() {
        let (result, interpreter) = run("a := 1");
        assert_eq!(result.unwrap(), Outcome::Finished);
        assert_eq!(interpreter.memory().get("a", None), Value::Int(1));
    }

    #[test]
    fn arrays() {
        let (_, interpreter) = run("T[1][1] := 5\nx := 1\nT[x][x+1] := 6");
        assert_eq!(interpreter.memory().get("T[1][1]", None), Value::Int(5));
        assert_eq!(interpreter.memory().get("T[1][2]", None), Value::Int(6));
        assert_eq!(interpreter.memory().get("T[2][2]", None), Value::Nil);
    }

    #[test]
    fn for_loop_removes_its_iterator() {
        let (_, interpreter) = run("dla i:=1,...,5 wykonuj\n    pisz i");
        assert_eq!(interpreter.console().output, "12345");
        assert_eq!(interpreter.memory().get("i", None), Value::Nil);
    }

    #[test]
    fn assigning_the_iterator_fails() {
        let error = runtime_error_of("dla i:=1,...,5 wykonuj\n    i := 3");
        assert_eq!(error.kind, RuntimeErrorKind::AssignToIterator { name: "i".into() });
        assert_eq!(error.line.number(), 2);
    }

    #[test]
    fn exit_stops_everything() {
        let (result, interpreter) = run("pisz 1\nkoniec\npisz 2");
        assert_eq!(result.unwrap(), Outcome::Exited);
        assert_eq!(interpreter.console().output, "1");
    }

    #[test]
    fn exit_inside_a_call() {
        let source = "procedura stop()\n    koniec\npisz 1 + stop()\npisz 2";
        let (result, interpreter) = run(source);
        assert_eq!(result.unwrap(), Outcome::Exited);
        assert_eq!(interpreter.console().output, "");
    }

    #[test]
    fn functions_return_values() {
        assert_eq!(output_of("funkcja a(b)\n    zwróć b\npisz a(2)"), "2");
        assert_eq!(output_of("funkcja nic()\n    x := 1\npisz nic()"), "nil");
    }

    #[test]
    fn recursion_gets_a_scope_per_call() {
        let source = "\
funkcja silnia(n)
    jeżeli n <= 1 to
        zwróć 1
    zwróć n * silnia(n - 1)
pisz silnia(5)";
        assert_eq!(output_of(source), "120");
    }

    #[test]
    fn locals_do_not_leak() {
        let source = "procedura p(a)\n    b := a\np(3)\npisz b";
        assert_eq!(output_of(source), "nil");
    }

    #[test]
    fn globals_are_shared_with_calls() {
        let source = "licznik := 0\nprocedura dodaj()\n    licznik := licznik + 1\ndodaj()\ndodaj()\npisz licznik";
        assert_eq!(output_of(source), "2");
    }

    #[test]
    fn wrong_argument_count() {
        let error = runtime_error_of("funkcja a(b)\n    zwróć b\npisz a(1, 2)");
        assert_eq!(error.kind, RuntimeErrorKind::ArgumentCount { name: "a".into(), expected: 1, found: 2 });
        assert_eq!(error.line.number(), 3);
    }

    #[test]
    fn undefined_function() {
        let error = runtime_error_of("pisz b(1)");
        assert_eq!(error.kind, RuntimeErrorKind::UndefinedFunction { name: "b".into() });
    }

    #[test]
    fn procedure_returning_a_value() {
        let error = runtime_error_of("procedura p()\n    zwróć 1\np()");
        assert_eq!(error.kind, RuntimeErrorKind::ProcedureReturnsValue { name: "p".into() });
        assert_eq!(error.line.number(), 2);
    }

    #[test]
    fn read_into_variable() {
        let nodes = parse("czytaj a\nczytaj T[1]\npisz a + T[1]").unwrap();
        let console = TestConsole {
            input: VecDeque::from(["40".to_string(), "2".to_string()]),
            ..Default::default()
        };

        let mut interpreter = Interpreter::new(console);
        interpreter.run(&nodes).unwrap();

        let console = interpreter.into_console();
        assert_eq!(console.prompts, vec!["a: ", "T: "]);
        assert_eq!(console.output, "42");
    }

    #[test]
    fn read_into_non_variable() {
        let error = runtime_error_of("czytaj 5");
        assert_eq!(error.kind, RuntimeErrorKind::ReadTargetNotVariable);
    }

    #[test]
    fn newline_escape() {
        assert_eq!(output_of("pisz 1\npisz \"\\n\"\npisz 2"), "1\n2");
    }

    #[test]
    fn type_mismatch_reports_the_line() {
        let error = runtime_error_of("a := 1\nb := \"x\" - a");
        assert!(matches!(error.kind, RuntimeErrorKind::TypeMismatch { .. }));
        assert_eq!(error.line.text(), "b := \"x\" - a");
    }

    #[test]
    fn conditions() {
        let source = "jeżeli prawda to\n    pisz 4\nwpp\n    pisz 3";
        assert_eq!(output_of(source), "4");
        assert_eq!(output_of(&source.replace("prawda", "fałsz")), "3");
    }

    #[test]
    fn range_ending_at_the_largest_number() {
        let (result, interpreter) = run("dla i := 9223372036854775806 ... 9223372036854775807 wykonuj\n    pisz i\n    pisz \"\\n\"");
        assert_eq!(result.unwrap(), Outcome::Finished);
        assert_eq!(interpreter.console().output, "9223372036854775806\n9223372036854775807\n");
        assert_eq!(interpreter.memory().get("i", None), Value::Nil);
    }

    #[test]
    fn return_escaping_the_top_level() {
        let nodes = [Node::Return(Return {
            value: None,
            line: SourceLine::new(1, "zwróć"),
        })];

        let result = Interpreter::new(TestConsole::default()).run(&nodes);
        assert!(matches!(result, Err(ExecutionError::Internal(InternalFault::ReturnEscaped))), "{result:?}");
    }

    #[test]
    fn statements_are_not_expressions() {
        let mut interpreter = Interpreter::new(TestConsole::default());

        let result = interpreter.evaluate(&Node::EndOfLine);
        assert!(matches!(result, Err(Halt::Failed(ExecutionError::Internal(InternalFault::NotAnExpression("EndOfLine"))))));
    }

    struct ClosedConsole;

    impl Console for ClosedConsole {
        fn read_line(&mut self, _: &str) -> io::Result<String> {
            Err(io::ErrorKind::UnexpectedEof.into())
        }

        fn write(&mut self, _: &str) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn console_failures_are_internal() {
        let nodes = parse("pisz 1").unwrap();

        match Interpreter::new(ClosedConsole).run(&nodes) {
            Err(ExecutionError::Internal(InternalFault::Console(e))) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected a console fault, got {other:?}"),
        }

        let nodes = parse("czytaj a").unwrap();
        let result = Interpreter::new(ClosedConsole).run(&nodes);
        assert!(matches!(result, Err(ExecutionError::Internal(InternalFault::Console(..)))));
    }
}
