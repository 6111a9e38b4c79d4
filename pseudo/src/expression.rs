// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::VecDeque;

use crate::{Node, Operation, Operator, ParseErrorKind, Position, Precedence, SourceLine};

/// One element of the flat run collected by the parser. Parenthesized runs
/// arrive here already reduced to a single operand.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionItem {
    Operand {
        node: Node,
        position: Position,
    },
    Operator {
        operator: Operator,
        position: Position,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionError {
    pub position: Position,
    pub kind: ParseErrorKind,
}

/// Folds a flat run of operands and operators into one expression tree.
#[derive(Debug)]
pub struct ExpressionBuilder {
    items: Vec<ExpressionItem>,
    line: SourceLine,
}

impl ExpressionBuilder {
    #[must_use]
    pub fn new(line: SourceLine) -> Self {
        Self {
            items: Vec::new(),
            line,
        }
    }

    pub fn push_operand(&mut self, node: Node, position: Position) {
        self.items.push(ExpressionItem::Operand { node, position });
    }

    pub fn push_operator(&mut self, operator: Operator, position: Position) {
        self.items.push(ExpressionItem::Operator { operator, position });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds the tree. `end` is where the run stopped, used when the run
    /// turns out to be empty.
    pub fn build(self, end: Position) -> Result<Node, ExpressionError> {
        let (first, rest) = Self::split(self.items, end)?;

        let mut climber = Climber {
            rest: rest.into(),
            line: self.line,
        };

        Ok(climber.climb(first, Precedence::Comparison))
    }

    /// Checks that operands and operators alternate, and splits the run into
    /// its first operand and the `(operator, operand)` pairs after it.
    fn split(items: Vec<ExpressionItem>, end: Position) -> Result<(Node, Vec<(Operator, Node)>), ExpressionError> {
        let mut first = None;
        let mut rest = Vec::new();
        let mut pending: Option<(Operator, Position)> = None;

        for item in items {
            match item {
                ExpressionItem::Operand { node, position } => {
                    if let Some((operator, _)) = pending.take() {
                        rest.push((operator, node));
                    } else if first.is_none() {
                        first = Some(node);
                    } else {
                        return Err(ExpressionError {
                            position,
                            kind: ParseErrorKind::UndefinedOperation,
                        });
                    }
                }

                ExpressionItem::Operator { operator, position } => {
                    if let Some((previous, position)) = pending {
                        return Err(ExpressionError {
                            position,
                            kind: ParseErrorKind::CannotOperateOnNil { operator: previous },
                        });
                    }

                    if first.is_none() {
                        if !operator.is_sign() {
                            return Err(ExpressionError {
                                position,
                                kind: ParseErrorKind::CannotOperateOnNil { operator },
                            });
                        }

                        first = Some(Node::Int(0));
                    }

                    pending = Some((operator, position));
                }
            }
        }

        if let Some((operator, position)) = pending {
            return Err(ExpressionError {
                position,
                kind: ParseErrorKind::CannotOperateOnNil { operator },
            });
        }

        match first {
            Some(first) => Ok((first, rest)),
            None => Err(ExpressionError {
                position: end,
                kind: ParseErrorKind::ExpectedExpression { found: "nothing".into() },
            }),
        }
    }
}

struct Climber {
    rest: VecDeque<(Operator, Node)>,
    line: SourceLine,
}

impl Climber {
    fn climb(&mut self, mut left: Node, min: Precedence) -> Node {
        while let Some((operator, _)) = self.rest.front() {
            if operator.precedence() < min {
                break;
            }

            let Some((operator, mut right)) = self.rest.pop_front() else {
                break;
            };

            if let Some(tighter) = operator.precedence().tighter() {
                right = self.climb(right, tighter);
            }

            left = Node::Operation(Operation {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                line: self.line.clone(),
            });
        }

        left
    }
}
