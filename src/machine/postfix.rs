//! A postfix-expression stack machine built from [`StateProgram`] steps.
//!
//! Each token of a postfix expression becomes one `StateProgram` step over
//! an operand stack; the whole expression is a left fold of those steps
//! via `and_then`. Running the folded program against an initial (usually
//! empty) stack yields the final stack and the expression's result.
//! Because `StateProgram` sequencing is trampolined, expression length is
//! bounded only by memory, never by native stack depth.
//!
//! # Semantics
//!
//! - A numeric token `n` pushes `n`; its step result is `n`.
//! - An operator token pops the top two values `a` (top) and `b` (second)
//!   and pushes `b OP a`: operands are consumed in push order, so the
//!   earlier-pushed operand is the left operand. `5 3 -` is `5 - 3`.
//! - Everything else is a parse error.
//!
//! # Examples
//!
//! ```rust
//! use treadmill::machine::{evaluate_postfix, tokenize};
//!
//! assert_eq!(evaluate_postfix(tokenize("1 2 + 3 *")), Ok(9));
//! ```

use crate::effect::StateProgram;

use super::error::{ArithmeticReason, EvalError};

/// The operand stack of the machine: an ordered sequence of integers with
/// the top at the end.
pub type OperandStack = Vec<i64>;

/// The result a single machine step reports: the integer it produced, or
/// the failure that terminated the run.
pub type StepOutcome = Result<i64, EvalError>;

/// A binary arithmetic operator of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl Operator {
    /// Classifies a token as an operator, if it is one.
    #[must_use]
    pub fn classify(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// The token this operator was classified from.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Applies the operator to its operands in push order.
    ///
    /// `second` was pushed before `top`, so the computation is
    /// `second OP top`. Arithmetic is checked: division by zero and `i64`
    /// overflow are reported as [`EvalError::Arithmetic`].
    fn apply(self, second: i64, top: i64) -> Result<i64, EvalError> {
        let computed = match self {
            Self::Add => second.checked_add(top),
            Self::Subtract => second.checked_sub(top),
            Self::Multiply => second.checked_mul(top),
            Self::Divide => {
                if top == 0 {
                    return Err(EvalError::Arithmetic {
                        operator: self,
                        reason: ArithmeticReason::DivisionByZero,
                    });
                }
                second.checked_div(top)
            }
        };
        computed.ok_or(EvalError::Arithmetic {
            operator: self,
            reason: ArithmeticReason::Overflow,
        })
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.symbol())
    }
}

/// Splits a postfix expression string into its whitespace-separated tokens.
///
/// # Examples
///
/// ```rust
/// use treadmill::machine::tokenize;
///
/// assert_eq!(tokenize("1 2 +"), vec!["1", "2", "+"]);
/// assert_eq!(tokenize("  "), Vec::<String>::new());
/// ```
#[must_use]
pub fn tokenize(expression: &str) -> Vec<String> {
    expression
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// Builds the machine step for a single token.
///
/// - A numeric token becomes a push program built from `modify` + `pure`.
/// - An operator token becomes an explicit bounds-checked double pop with
///   an underflow branch; on failure the operands stay on the stack.
/// - An unrecognized token becomes a program that reports
///   [`EvalError::Parse`] without touching the stack.
///
/// # Examples
///
/// ```rust
/// use treadmill::machine::token_program;
///
/// let push = token_program("7");
/// let (stack, outcome) = push.run(vec![]);
/// assert_eq!(stack, vec![7]);
/// assert_eq!(outcome, Ok(7));
///
/// let add = token_program("+");
/// let (stack, outcome) = add.run(vec![1, 2]);
/// assert_eq!(stack, vec![3]);
/// assert_eq!(outcome, Ok(3));
/// ```
#[must_use]
pub fn token_program(token: &str) -> StateProgram<OperandStack, StepOutcome> {
    if let Some(operator) = Operator::classify(token) {
        return operator_program(operator);
    }
    match token.parse::<i64>() {
        Ok(operand) => push_program(operand),
        Err(_) => StateProgram::pure(Err(EvalError::Parse {
            token: token.to_string(),
        })),
    }
}

/// A step that pushes an operand and reports it as the step result.
fn push_program(operand: i64) -> StateProgram<OperandStack, StepOutcome> {
    StateProgram::modify(move |mut stack: OperandStack| {
        stack.push(operand);
        stack
    })
    .then(StateProgram::pure(Ok(operand)))
}

/// A step that applies an operator to the top two operands.
fn operator_program(operator: Operator) -> StateProgram<OperandStack, StepOutcome> {
    StateProgram::from_transition(move |mut stack: OperandStack| {
        let depth = stack.len();
        if depth < 2 {
            return (
                stack,
                Err(EvalError::StackUnderflow {
                    operator,
                    available: depth,
                }),
            );
        }
        let top = stack[depth - 1];
        let second = stack[depth - 2];
        match operator.apply(second, top) {
            Ok(value) => {
                stack.truncate(depth - 2);
                stack.push(value);
                (stack, Ok(value))
            }
            Err(error) => (stack, Err(error)),
        }
    })
}

/// Folds a token sequence into one machine program.
///
/// Tokens are sequenced left to right via `and_then`; each step's result
/// is discarded except the last, and any failing step short-circuits the
/// remainder of the fold, leaving the stack as the failing step left it.
/// An empty token sequence yields a program that reports
/// [`EvalError::EmptyExpression`].
///
/// The returned program can be run against any initial stack; see
/// [`evaluate_postfix`] and [`run_postfix`].
pub fn postfix_program<I, T>(tokens: I) -> StateProgram<OperandStack, StepOutcome>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut folded: Option<StateProgram<OperandStack, StepOutcome>> = None;
    for token in tokens {
        let step = token_program(token.as_ref());
        folded = Some(match folded {
            None => step,
            Some(program) => program.and_then(move |outcome| match outcome {
                Ok(_) => step.clone(),
                Err(error) => StateProgram::pure(Err(error)),
            }),
        });
    }
    folded.unwrap_or_else(|| StateProgram::pure(Err(EvalError::EmptyExpression)))
}

/// Evaluates a tokenized postfix expression against an empty stack.
///
/// The advertised result is the final step's result, which for a
/// well-formed expression equals the single remaining stack top.
///
/// # Errors
///
/// Returns the [`EvalError`] of the first failing step: an unrecognized
/// token, an operator with fewer than two operands available, a failed
/// arithmetic operation, or an empty token sequence.
///
/// # Examples
///
/// ```rust
/// use treadmill::machine::{evaluate_postfix, EvalError};
///
/// assert_eq!(evaluate_postfix(["1", "2", "+", "3", "*"]), Ok(9));
/// assert!(matches!(
///     evaluate_postfix(["+"]),
///     Err(EvalError::StackUnderflow { .. })
/// ));
/// ```
pub fn evaluate_postfix<I, T>(tokens: I) -> Result<i64, EvalError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    postfix_program(tokens).eval(OperandStack::new())
}

/// Runs a tokenized postfix expression against a caller-supplied stack.
///
/// Returns the final stack alongside the result so the caller can inspect
/// both, e.g. when evaluating an expression fragment that deliberately
/// leaves operands behind.
///
/// # Examples
///
/// ```rust
/// use treadmill::machine::run_postfix;
///
/// let (stack, outcome) = run_postfix(["3", "+"], vec![4]);
/// assert_eq!(stack, vec![7]);
/// assert_eq!(outcome, Ok(7));
/// ```
pub fn run_postfix<I, T>(
    tokens: I,
    initial_stack: OperandStack,
) -> (OperandStack, Result<i64, EvalError>)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    postfix_program(tokens).run(initial_stack)
}
