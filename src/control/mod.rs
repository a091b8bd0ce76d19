//! Control structures for stack-safe evaluation.
//!
//! This module provides the deferred-computation primitive the rest of the
//! crate is built on:
//!
//! - [`Thunk`]: a suspended, composable computation forced by an explicit
//!   work-list loop (a trampoline) in constant native stack space
//!
//! # Examples
//!
//! ## Stack-Safe Recursion
//!
//! ```rust
//! use treadmill::control::Thunk;
//!
//! fn factorial(n: u64) -> Thunk<u64> {
//!     factorial_helper(n, 1)
//! }
//!
//! fn factorial_helper(n: u64, accumulator: u64) -> Thunk<u64> {
//!     if n <= 1 {
//!         Thunk::done(accumulator)
//!     } else {
//!         Thunk::defer(move || factorial_helper(n - 1, n * accumulator))
//!     }
//! }
//!
//! let result = factorial(10).force();
//! assert_eq!(result, 3628800);
//! ```

mod thunk;

pub use thunk::Thunk;
