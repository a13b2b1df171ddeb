//! Tree-walking evaluator.

use super::parser::{BinaryOp, Expr, UnaryOp};
use super::value::Value;
use super::ExprError;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Evaluate an expression against a map of top-level variables.
///
/// Unknown identifiers and missing map keys evaluate to nil, and indexing
/// nil yields nil.
pub fn eval(expr: &Expr, vars: &BTreeMap<String, Value>) -> Result<Value, ExprError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => Ok(vars.get(name).cloned().unwrap_or(Value::Nil)),
        Expr::List(items) => Ok(Value::List(
            items
                .iter()
                .map(|item| eval(item, vars))
                .collect::<Result<_, _>>()?,
        )),
        Expr::Index(target, index) => {
            let target = eval(target, vars)?;
            let index = eval(index, vars)?;
            index_value(target, &index)
        }
        Expr::Unary(op, operand) => {
            let value = eval(operand, vars)?;
            match (op, value) {
                (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                (UnaryOp::Neg, Value::Int(i)) => {
                    i.checked_neg().map(Value::Int).ok_or(ExprError::Overflow)
                }
                (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
                (UnaryOp::Not, other) => Err(type_error(format!(
                    "invalid operation: !{}",
                    other.type_name()
                ))),
                (UnaryOp::Neg, other) => Err(type_error(format!(
                    "invalid operation: -{}",
                    other.type_name()
                ))),
            }
        }
        Expr::Binary(BinaryOp::And, left, right) => {
            if !expect_bool(eval(left, vars)?, "&&")? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(expect_bool(eval(right, vars)?, "&&")?))
        }
        Expr::Binary(BinaryOp::Or, left, right) => {
            if expect_bool(eval(left, vars)?, "||")? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(expect_bool(eval(right, vars)?, "||")?))
        }
        Expr::Binary(op, left, right) => {
            let left = eval(left, vars)?;
            let right = eval(right, vars)?;
            binary(*op, left, right)
        }
    }
}

fn index_value(target: Value, index: &Value) -> Result<Value, ExprError> {
    match (target, index) {
        (Value::Nil, _) => Ok(Value::Nil),
        (Value::Map(mut map), Value::Str(key)) => Ok(map.remove(key).unwrap_or(Value::Nil)),
        (Value::List(items), Value::Int(i)) => {
            let len = items.len() as i64;
            let i = if *i < 0 { len + i } else { *i };
            Ok(usize::try_from(i)
                .ok()
                .and_then(|i| items.into_iter().nth(i))
                .unwrap_or(Value::Nil))
        }
        (target, index) => Err(type_error(format!(
            "cannot index {} with {}",
            target.type_name(),
            index.type_name()
        ))),
    }
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ExprError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left.loose_eq(&right))),
        BinaryOp::Ne => Ok(Value::Bool(!left.loose_eq(&right))),
        BinaryOp::Lt => compare(&left, &right, "<").map(|o| Value::Bool(o == Ordering::Less)),
        BinaryOp::Le => compare(&left, &right, "<=").map(|o| Value::Bool(o != Ordering::Greater)),
        BinaryOp::Gt => compare(&left, &right, ">").map(|o| Value::Bool(o == Ordering::Greater)),
        BinaryOp::Ge => compare(&left, &right, ">=").map(|o| Value::Bool(o != Ordering::Less)),
        BinaryOp::In => contains_member(&right, &left).map(Value::Bool),
        BinaryOp::NotIn => contains_member(&right, &left).map(|found| Value::Bool(!found)),
        BinaryOp::Contains => {
            strings(&left, &right, "contains").map(|(a, b)| Value::Bool(a.contains(b)))
        }
        BinaryOp::StartsWith => {
            strings(&left, &right, "startsWith").map(|(a, b)| Value::Bool(a.starts_with(b)))
        }
        BinaryOp::EndsWith => {
            strings(&left, &right, "endsWith").map(|(a, b)| Value::Bool(a.ends_with(b)))
        }
        BinaryOp::Matches => {
            let (text, pattern) = strings(&left, &right, "matches")?;
            let regex = Regex::new(pattern).map_err(|e| ExprError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            Ok(Value::Bool(regex.is_match(text)))
        }
        BinaryOp::Add => match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (left, right) => arithmetic(op, left, right),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(op, left, right)
        }
        BinaryOp::And | BinaryOp::Or => {
            unreachable!("short-circuit operators are handled in eval")
        }
    }
}

fn arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value, ExprError> {
    let symbol = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        _ => "%",
    };
    match (&left, &right, op) {
        (Value::Int(_), Value::Int(0), BinaryOp::Div | BinaryOp::Mod) => {
            Err(ExprError::DivisionByZero)
        }
        (Value::Int(a), Value::Int(b), BinaryOp::Div) => Ok(Value::Float(*a as f64 / *b as f64)),
        (Value::Int(a), Value::Int(b), _) => {
            let result = match op {
                BinaryOp::Add => a.checked_add(*b),
                BinaryOp::Sub => a.checked_sub(*b),
                BinaryOp::Mul => a.checked_mul(*b),
                _ => a.checked_rem(*b),
            };
            result.map(Value::Int).ok_or(ExprError::Overflow)
        }
        (_, _, BinaryOp::Mod) => Err(type_error(format!(
            "invalid operation: {} % {}",
            left.type_name(),
            right.type_name()
        ))),
        _ => {
            let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
                return Err(type_error(format!(
                    "invalid operation: {} {} {}",
                    left.type_name(),
                    symbol,
                    right.type_name()
                )));
            };
            if op == BinaryOp::Div && b == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Value::Float(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                _ => a / b,
            }))
        }
    }
}

fn compare(left: &Value, right: &Value, symbol: &str) -> Result<Ordering, ExprError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a
                .partial_cmp(&b)
                .ok_or_else(|| type_error(format!("cannot compare NaN with {}", symbol))),
            _ => Err(type_error(format!(
                "invalid operation: {} {} {}",
                left.type_name(),
                symbol,
                right.type_name()
            ))),
        },
    }
}

fn contains_member(haystack: &Value, needle: &Value) -> Result<bool, ExprError> {
    match (haystack, needle) {
        (Value::List(items), needle) => Ok(items.iter().any(|item| item.loose_eq(needle))),
        (Value::Map(map), Value::Str(key)) => Ok(map.contains_key(key)),
        (Value::Nil, _) => Ok(false),
        _ => Err(type_error(format!(
            "invalid operation: {} in {}",
            needle.type_name(),
            haystack.type_name()
        ))),
    }
}

fn strings<'a>(
    left: &'a Value,
    right: &'a Value,
    op: &str,
) -> Result<(&'a str, &'a str), ExprError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok((a.as_str(), b.as_str())),
        _ => Err(type_error(format!(
            "invalid operation: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        ))),
    }
}

fn expect_bool(value: Value, op: &str) -> Result<bool, ExprError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(type_error(format!(
            "invalid operation: {} {} bool",
            other.type_name(),
            op
        ))),
    }
}

fn type_error(message: String) -> ExprError {
    ExprError::Type(message)
}
