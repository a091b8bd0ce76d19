//! Effect system for pure state threading.
//!
//! This module provides [`StateProgram`], a computation that threads a
//! state value alongside a computed result. Programs compose via
//! `flat_map`/`and_then`, and sequencing is recorded as deferred
//! [`Thunk`](crate::control::Thunk) steps so that arbitrarily long chains
//! evaluate without growing the native stack.
//!
//! # Examples
//!
//! ```rust
//! use treadmill::effect::StateProgram;
//!
//! let computation: StateProgram<i32, i32> = StateProgram::get()
//!     .flat_map(|current| {
//!         StateProgram::put(current + 1).then(StateProgram::pure(current))
//!     });
//!
//! let (final_state, result) = computation.run(10);
//! assert_eq!(final_state, 11);
//! assert_eq!(result, 10);
//! ```

mod state_program;

pub use state_program::StateProgram;
