//! Error types for the postfix stack machine.
//!
//! Every evaluation failure is reported as an explicit [`EvalError`]
//! variant returned from the machine's entry points. The machine never
//! produces a partial stack or an ambiguous sentinel value in place of an
//! error.
//!
//! Non-termination is deliberately absent from this taxonomy: an infinite
//! chain of deferred steps cannot be detected by the trampoline and is a
//! caller obligation, documented on
//! [`Thunk::force`](crate::control::Thunk::force).

use static_assertions::assert_impl_all;

use super::postfix::Operator;

/// The reason an arithmetic step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticReason {
    /// The divisor was zero.
    DivisionByZero,
    /// The operation overflowed the `i64` range.
    Overflow,
}

impl std::fmt::Display for ArithmeticReason {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(formatter, "division by zero"),
            Self::Overflow => write!(formatter, "integer overflow"),
        }
    }
}

/// Represents errors that can occur while evaluating a postfix expression.
///
/// # Examples
///
/// ```rust
/// use treadmill::machine::{evaluate_postfix, EvalError};
///
/// let error = evaluate_postfix(["1", "x", "+"]).unwrap_err();
/// assert_eq!(error, EvalError::Parse { token: "x".to_string() });
/// assert_eq!(
///     format!("{}", error),
///     "unrecognized token 'x': not an operator or integer literal"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A token is neither a recognized operator nor a valid integer
    /// literal.
    Parse {
        /// The offending token, verbatim.
        token: String,
    },
    /// An operator step required two operands but fewer were available.
    StackUnderflow {
        /// The operator that could not be applied.
        operator: Operator,
        /// How many operands the stack actually held.
        available: usize,
    },
    /// An arithmetic step failed, e.g. division by zero.
    Arithmetic {
        /// The operator whose application failed.
        operator: Operator,
        /// Why the operation failed.
        reason: ArithmeticReason,
    },
    /// The token sequence was empty, so there is no result to report.
    EmptyExpression,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { token } => write!(
                formatter,
                "unrecognized token '{token}': not an operator or integer literal"
            ),
            Self::StackUnderflow {
                operator,
                available,
            } => write!(
                formatter,
                "stack underflow: operator '{operator}' requires 2 operands, {available} available"
            ),
            Self::Arithmetic { operator, reason } => {
                write!(formatter, "arithmetic error in '{operator}': {reason}")
            }
            Self::EmptyExpression => write!(formatter, "empty expression: nothing to evaluate"),
        }
    }
}

impl std::error::Error for EvalError {}

assert_impl_all!(EvalError: std::error::Error, Send, Sync);
