// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod console;
mod error;
mod interpreter;
mod memory;
mod value;

pub use self::{
    console::{Console, StdConsole},
    error::{ExecutionError, InternalFault, RuntimeError, RuntimeErrorKind},
    interpreter::{Flow, Interpreter, Outcome, MAX_CALL_DEPTH},
    memory::{Memory, ScopeId},
    value::Value,
};
