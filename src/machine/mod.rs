//! A postfix-expression stack machine.
//!
//! The machine evaluates tokenized postfix (reverse Polish) arithmetic
//! expressions against an operand stack. Every token becomes one
//! [`StateProgram`](crate::effect::StateProgram) step, the expression is a
//! left fold of those steps, and the fold runs on the trampoline, so
//! expression length never threatens the native stack.
//!
//! # Examples
//!
//! ```rust
//! use treadmill::machine::{evaluate_postfix, tokenize, EvalError};
//!
//! assert_eq!(evaluate_postfix(tokenize("1 2 + 3 *")), Ok(9));
//! assert_eq!(evaluate_postfix(["2", "2", "*"]), Ok(4));
//!
//! let error = evaluate_postfix(["4", "0", "/"]).unwrap_err();
//! assert!(matches!(error, EvalError::Arithmetic { .. }));
//! ```

mod error;
mod postfix;

pub use error::{ArithmeticReason, EvalError};
pub use postfix::{
    evaluate_postfix, postfix_program, run_postfix, token_program, tokenize, OperandStack,
    Operator, StepOutcome,
};
