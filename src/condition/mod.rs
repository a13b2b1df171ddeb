//! Gating expressions for optional side effects.
//!
//! `datastore.if` holds a small boolean expression evaluated against the
//! clock, the triggering GitHub event and the environment (see
//! [`ConditionContext`]). The gate never fails hard: a malformed expression
//! or one that does not produce `true` means "skip".

mod context;
mod eval;
mod lexer;
mod parser;
mod value;


pub use context::ConditionContext;
pub use value::Value;

use log::debug;
use thiserror::Error;

/// Error raised while parsing or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("syntax error at position {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("{0}")]
    Type(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Parse and evaluate an expression.
pub fn evaluate(expression: &str, ctx: &ConditionContext) -> Result<Value, ExprError> {
    let expr = parser::parse(expression)?;
    eval::eval(&expr, ctx.vars())
}

/// Outcome of a gating expression.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// No condition, or the condition evaluated to `true`.
    Proceed,
    /// The condition evaluated to something other than `true`.
    Skip { condition: String },
    /// The condition could not be parsed or evaluated.
    Failed { condition: String, error: ExprError },
}

impl GateDecision {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }

    /// Human-readable diagnostic for a skipped or failed gate.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            GateDecision::Proceed => None,
            GateDecision::Skip { condition } => Some(format!(
                "Skip storing the report: the condition in the `if` section is not met ({})",
                condition
            )),
            GateDecision::Failed { condition, error } => Some(format!(
                "Skip storing the report: failed to evaluate the condition in the `if` section ({}): {}",
                condition, error
            )),
        }
    }
}

/// Decide whether a gated action should run.
///
/// An absent or empty condition always proceeds. Otherwise the condition is
/// evaluated as `(<condition>) == true`, so any result other than boolean
/// `true` skips the action instead of raising a type error.
pub fn gate(condition: Option<&str>, ctx: &ConditionContext) -> GateDecision {
    let condition = match condition {
        Some(c) if !c.is_empty() => c,
        _ => return GateDecision::Proceed,
    };

    match evaluate(&format!("({}) == true", condition), ctx) {
        Ok(Value::Bool(true)) => {
            debug!("condition met: {}", condition);
            GateDecision::Proceed
        }
        Ok(_) => GateDecision::Skip {
            condition: condition.to_string(),
        },
        Err(error) => GateDecision::Failed {
            condition: condition.to_string(),
            error,
        },
    }
}
