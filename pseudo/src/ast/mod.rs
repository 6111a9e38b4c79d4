// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod expression;
mod node;
mod statement;

pub use self::{
    expression::{Call, Operation, Variable},
    node::Node,
    statement::{Assignment, Condition, FunctionDef, Loop, Return, Statement, StatementKeyword},
};
