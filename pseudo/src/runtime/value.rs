// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{cmp::Ordering, fmt::Display};

use crate::{Operator, RuntimeErrorKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    /// What every unset variable reads as.
    #[default]
    Nil,

    Int(i64),
    Str(String),
}

impl Value {
    /// Reads a line typed by the user: numbers become integers, anything
    /// else is kept as text.
    #[must_use]
    pub fn from_input(text: &str) -> Self {
        match text.trim().parse() {
            Ok(number) => Self::Int(number),
            Err(..) => Self::Str(text.to_string()),
        }
    }

    /// Everything is true except `0` and nil.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Int(0))
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Int(..) => "number",
            Self::Str(..) => "string",
        }
    }

    /// How the value appears inside the key of an array cell. Text is quoted
    /// so `T["1"]` and `T[1]` stay apart.
    #[must_use]
    pub fn key_fragment(&self) -> String {
        match self {
            Self::Str(str) => format!("{str:?}"),
            other => other.to_string(),
        }
    }

    pub fn apply(operator: Operator, left: Self, right: Self) -> Result<Self, RuntimeErrorKind> {
        match (operator, &left, &right) {
            (Operator::Equal, ..) => Ok(Self::from(left == right)),
            (Operator::NotEqual, ..) => Ok(Self::from(left != right)),

            (_, Self::Int(lhs), Self::Int(rhs)) => apply_integers(operator, *lhs, *rhs),

            (Operator::Add, Self::Str(lhs), Self::Str(rhs)) => Ok(Self::Str(format!("{lhs}{rhs}"))),

            (Operator::Multiply, Self::Str(text), Self::Int(count))
                | (Operator::Multiply, Self::Int(count), Self::Str(text)) => repeat(text, *count),

            (_, Self::Str(lhs), Self::Str(rhs)) if operator.is_comparison() => {
                Ok(Self::from(compare(operator, lhs.cmp(rhs))))
            }

            _ => Err(RuntimeErrorKind::TypeMismatch {
                operator,
                left: left.kind_name(),
                right: right.kind_name(),
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Int(value as i64)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Int(i) => i.fmt(f),
            Self::Str(str) => f.write_str(str),
        }
    }
}

fn apply_integers(operator: Operator, lhs: i64, rhs: i64) -> Result<Value, RuntimeErrorKind> {
    let overflow = RuntimeErrorKind::Overflow { operator };

    let result = match operator {
        Operator::Add => lhs.checked_add(rhs).ok_or(overflow)?,
        Operator::Subtract => lhs.checked_sub(rhs).ok_or(overflow)?,
        Operator::Multiply => lhs.checked_mul(rhs).ok_or(overflow)?,

        Operator::Divide => {
            if rhs == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }

            let quotient = lhs.checked_div(rhs).ok_or(overflow)?;
            if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
                quotient - 1
            } else {
                quotient
            }
        }

        Operator::Modulo => {
            if rhs == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }

            let remainder = lhs.checked_rem(rhs).ok_or(overflow)?;
            if remainder != 0 && (remainder < 0) != (rhs < 0) {
                remainder + rhs
            } else {
                remainder
            }
        }

        _ => return Ok(Value::from(compare(operator, lhs.cmp(&rhs)))),
    };

    Ok(Value::Int(result))
}

fn compare(operator: Operator, ordering: Ordering) -> bool {
    match operator {
        Operator::Less => ordering.is_lt(),
        Operator::Greater => ordering.is_gt(),
        Operator::LessOrEqual => ordering.is_le(),
        Operator::GreaterOrEqual => ordering.is_ge(),
        Operator::NotEqual => ordering.is_ne(),
        _ => ordering.is_eq(),
    }
}

/// Repeats `text`, failing instead of aborting when the result cannot be
/// allocated.
fn repeat(text: &str, count: i64) -> Result<Value, RuntimeErrorKind> {
    let overflow = RuntimeErrorKind::Overflow { operator: Operator::Multiply };
    let count = usize::try_from(count).unwrap_or(0);

    let length = text.len().checked_mul(count).ok_or(overflow.clone())?;

    let mut result = String::new();
    result.try_reserve_exact(length).map_err(|_| overflow)?;

    for _ in 0..count {
        result.push_str(text);
    }

    Ok(Value::Str(result))
}
