//! # treadmill
//!
//! Stack-safe deferred evaluation, pure state threading, and a postfix
//! stack machine built on both.
//!
//! ## Overview
//!
//! Rust does not guarantee tail call optimization, so deeply recursive or
//! deeply composed computations can overflow the native stack. This library
//! provides:
//!
//! - **Control Structures**: [`control::Thunk`], a suspended computation
//!   that is forced by an explicit work-list loop (a trampoline) in
//!   constant native stack space.
//! - **Effect System**: [`effect::StateProgram`], a pure state-threading
//!   computation whose sequencing is recorded as deferred `Thunk` steps,
//!   so arbitrarily long chains run without stack growth.
//! - **Stack Machine**: [`machine`], a postfix-expression calculator
//!   expressed entirely as `StateProgram` steps over an operand stack.
//!
//! ## Feature Flags
//!
//! - `control`: `Thunk` and its trampoline evaluator
//! - `effect`: `StateProgram` (requires `control`)
//! - `machine`: the postfix stack machine (requires `effect`)
//!
//! ## Example
//!
//! ```rust
//! use treadmill::machine::evaluate_postfix;
//!
//! let result = evaluate_postfix(["1", "2", "+", "3", "*"]);
//! assert_eq!(result, Ok(9));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use treadmill::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(feature = "machine")]
    pub use crate::machine::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;

#[cfg(feature = "machine")]
pub mod machine;
