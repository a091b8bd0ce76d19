//! `StateProgram` - stateful computation with stack-safe sequencing.
//!
//! A `StateProgram<S, A>` represents a computation that threads a state
//! through a sequence of operations. It is useful for maintaining mutable
//! state in a pure functional way.
//!
//! # Overview
//!
//! A `StateProgram<S, A>` encapsulates a function `S -> (S, A)`, where `S`
//! is the state type and `A` is the result type. The function takes the
//! current state, returns a potentially modified state, and produces a
//! result. The state is passed by value: running a program never mutates
//! anything outside the pair it returns.
//!
//! # Stack Safety
//!
//! Sequencing is not performed with nested native calls. Each composition
//! step is recorded as a deferred [`Thunk`](crate::control::Thunk)
//! continuation, and [`run`](StateProgram::run) hands the whole chain to
//! the trampoline evaluator. A chain of N `and_then` steps therefore
//! evaluates in O(1) native stack frames.
//!
//! # Laws
//!
//! `StateProgram` satisfies the Functor and Monad laws, plus the
//! `MonadState`-specific laws:
//!
//! ## Functor Laws
//!
//! - Identity: `program.fmap(|x| x) == program`
//! - Composition: `program.fmap(f).fmap(g) == program.fmap(|x| g(f(x)))`
//!
//! ## Monad Laws
//!
//! - Left Identity: `StateProgram::pure(a).flat_map(f) == f(a)`
//! - Right Identity: `m.flat_map(StateProgram::pure) == m`
//! - Associativity: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!
//! ## `MonadState` Laws
//!
//! - Get Put Law: `get().flat_map(|s| put(s)) == pure(())`
//! - Put Get Law: `put(s).then(get())` returns `s`
//! - Put Put Law: `put(s1).then(put(s2)) == put(s2)`
//! - Modify Composition: `modify(f).then(modify(g)) == modify(|s| g(f(s)))`
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```rust
//! use treadmill::effect::StateProgram;
//!
//! // Double the result, increment the state
//! let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
//! let (final_state, result) = program.run(10);
//! assert_eq!(final_state, 11);
//! assert_eq!(result, 20);
//! ```
//!
//! Counter pattern:
//!
//! ```rust
//! use treadmill::effect::StateProgram;
//!
//! fn increment() -> StateProgram<i32, ()> {
//!     StateProgram::modify(|count| count + 1)
//! }
//!
//! fn current_count() -> StateProgram<i32, i32> {
//!     StateProgram::get()
//! }
//!
//! let computation = increment()
//!     .then(increment())
//!     .then(increment())
//!     .then(current_count());
//!
//! let (_, count) = computation.run(0);
//! assert_eq!(count, 3);
//! ```

use std::rc::Rc;

use crate::control::Thunk;

/// A pure state-threading computation with stack-safe sequencing.
///
/// `StateProgram<S, A>` represents a computation that, given an initial
/// state of type `S`, produces a new state of type `S` and a result of
/// type `A`.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The result type
///
/// # Examples
///
/// ```rust
/// use treadmill::effect::StateProgram;
///
/// let computation: StateProgram<i32, i32> = StateProgram::get()
///     .flat_map(|current| {
///         StateProgram::put(current + 1).then(StateProgram::pure(current))
///     });
///
/// let (final_state, result) = computation.run(10);
/// assert_eq!(final_state, 11);
/// assert_eq!(result, 10);
/// ```
pub struct StateProgram<S, A>
where
    S: 'static,
    A: 'static,
{
    /// The wrapped state transition, producing its `(state, result)` pair
    /// as a deferred thunk so composition never nests native calls.
    /// Uses Rc to allow cloning of the program for `flat_map`.
    transition: Rc<dyn Fn(S) -> Thunk<(S, A)>>,
}

impl<S, A> StateProgram<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a program directly from a thunk-producing transition.
    ///
    /// All composition goes through here so every step stays deferred.
    fn from_steps<F>(transition: F) -> Self
    where
        F: Fn(S) -> Thunk<(S, A)> + 'static,
    {
        Self {
            transition: Rc::new(transition),
        }
    }

    /// Creates a new program from a state transition function.
    ///
    /// # Arguments
    ///
    /// * `function` - A function that takes the current state and returns
    ///   a tuple of (`new_state`, result)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
    /// let (final_state, result) = program.run(10);
    /// assert_eq!(final_state, 11);
    /// assert_eq!(result, 20);
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S) -> (S, A) + 'static,
    {
        Self::from_steps(move |state| Thunk::done(function(state)))
    }

    /// Creates a new program from a state transition function.
    ///
    /// This is an alias for `new` that is more descriptive for state
    /// transitions.
    ///
    /// # Arguments
    ///
    /// * `transition` - A function that takes the current state and returns
    ///   a tuple of (`new_state`, result)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, String> = StateProgram::from_transition(|s: i32| {
    ///     (s + 1, format!("was: {}", s))
    /// });
    /// let (final_state, result) = program.run(10);
    /// assert_eq!(final_state, 11);
    /// assert_eq!(result, "was: 10");
    /// ```
    pub fn from_transition<F>(transition: F) -> Self
    where
        F: Fn(S) -> (S, A) + 'static,
    {
        Self::new(transition)
    }

    /// Runs the program with the given initial state.
    ///
    /// Returns both the final state and the result. Evaluation delegates
    /// to the trampoline, so arbitrarily long `and_then` chains run in
    /// constant native stack space.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state to run the computation with
    ///
    /// # Returns
    ///
    /// A tuple of (`final_state`, result).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s * 2, s + 1));
    /// let (final_state, result) = program.run(10);
    /// assert_eq!(final_state, 20);
    /// assert_eq!(result, 11);
    /// ```
    pub fn run(&self, initial_state: S) -> (S, A) {
        (self.transition)(initial_state).force()
    }

    /// Runs the program and returns only the result.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state to run the computation with
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(program.eval(10), 20);
    /// ```
    pub fn eval(&self, initial_state: S) -> A {
        let (_, result) = self.run(initial_state);
        result
    }

    /// Runs the program and returns only the final state.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state to run the computation with
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
    /// assert_eq!(program.exec(10), 11);
    /// ```
    pub fn exec(&self, initial_state: S) -> S {
        let (final_state, _) = self.run(initial_state);
        final_state
    }

    /// Creates a program that returns a constant value without modifying
    /// the state.
    ///
    /// This is equivalent to `Applicative::pure`.
    ///
    /// # Arguments
    ///
    /// * `value` - The constant value to return
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, &str> = StateProgram::pure("constant");
    /// let (final_state, result) = program.run(42);
    /// assert_eq!(final_state, 42);
    /// assert_eq!(result, "constant");
    /// ```
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::new(move |state| (state, value.clone()))
    }

    /// Maps a function over the result of this program.
    ///
    /// This is the Functor operation. The state transition is unchanged.
    ///
    /// # Arguments
    ///
    /// * `function` - A function to apply to the result
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s, s));
    /// let mapped = program.fmap(|value| value * 2);
    /// let (final_state, result) = mapped.run(21);
    /// assert_eq!(final_state, 21);
    /// assert_eq!(result, 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> StateProgram<S, B>
    where
        F: Fn(A) -> B + 'static,
        B: 'static,
    {
        let transition = self.transition;
        let function = Rc::new(function);
        StateProgram::from_steps(move |state| {
            let transition = transition.clone();
            let function = function.clone();
            Thunk::defer(move || transition(state))
                .map(move |(new_state, result)| (new_state, function(result)))
        })
    }

    /// Chains this program with a function that produces another program.
    ///
    /// This is the Monad operation. Running the chained program on state
    /// `s0` runs this program to get `(s1, a)`, then runs `function(a)` on
    /// `s1`. Both steps are recorded as deferred thunk continuations, so
    /// chains of any length evaluate without native recursion.
    ///
    /// # Arguments
    ///
    /// * `function` - A function that takes the result and produces a new
    ///   program
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
    /// let chained = program.flat_map(|value| {
    ///     StateProgram::new(move |s: i32| (s * 2, value + s))
    /// });
    /// let (final_state, result) = chained.run(10);
    /// // First: (11, 10), then with state 11: (22, 10 + 11)
    /// assert_eq!(final_state, 22);
    /// assert_eq!(result, 21);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> StateProgram<S, B>
    where
        F: Fn(A) -> StateProgram<S, B> + 'static,
        B: 'static,
    {
        let transition = self.transition;
        let function = Rc::new(function);
        StateProgram::from_steps(move |state| {
            let transition = transition.clone();
            let function = function.clone();
            Thunk::defer(move || transition(state)).flat_map(
                move |(intermediate_state, result)| {
                    let next = function(result);
                    Thunk::defer(move || (next.transition)(intermediate_state))
                },
            )
        })
    }

    /// Alias for `flat_map` to match Rust's naming conventions.
    ///
    /// # Arguments
    ///
    /// * `function` - A function that takes the result and produces a new
    ///   program
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
    /// let chained = program.and_then(|value| {
    ///     StateProgram::new(move |s: i32| (s, value + s))
    /// });
    /// let (final_state, result) = chained.run(10);
    /// assert_eq!(final_state, 11);
    /// assert_eq!(result, 21); // 10 + 11
    /// ```
    pub fn and_then<B, F>(self, function: F) -> StateProgram<S, B>
    where
        F: Fn(A) -> StateProgram<S, B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two programs, discarding the first result.
    ///
    /// # Arguments
    ///
    /// * `next` - The program to execute after this one
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let first: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 10, s));
    /// let second: StateProgram<i32, &str> = StateProgram::pure("result");
    /// let sequenced = first.then(second);
    /// let (final_state, result) = sequenced.run(42);
    /// assert_eq!(final_state, 52);
    /// assert_eq!(result, "result");
    /// ```
    #[must_use]
    pub fn then<B>(self, next: StateProgram<S, B>) -> StateProgram<S, B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next.clone())
    }

    /// Combines two programs using a binary function.
    ///
    /// This is the Applicative map2 operation: the first program runs, the
    /// second runs on the resulting state, and the results are combined.
    ///
    /// # Arguments
    ///
    /// * `other` - The second program
    /// * `function` - A function that combines the results
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let first: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
    /// let second: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
    /// let combined = first.map2(second, |a, b| a + b);
    /// let (final_state, result) = combined.run(10);
    /// // first: (11, 10), second with 11: (12, 22)
    /// assert_eq!(final_state, 12);
    /// assert_eq!(result, 32);
    /// ```
    pub fn map2<B, C, F>(self, other: StateProgram<S, B>, function: F) -> StateProgram<S, C>
    where
        F: Fn(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        let self_transition = self.transition;
        let other_transition = other.transition;
        let function = Rc::new(function);
        StateProgram::from_steps(move |state| {
            let self_transition = self_transition.clone();
            let other_transition = other_transition.clone();
            let function = function.clone();
            Thunk::defer(move || self_transition(state)).flat_map(
                move |(intermediate_state, result_a)| {
                    Thunk::defer(move || other_transition(intermediate_state)).map(
                        move |(final_state, result_b)| {
                            (final_state, function(result_a, result_b))
                        },
                    )
                },
            )
        })
    }

    /// Combines two programs into a tuple.
    ///
    /// # Arguments
    ///
    /// * `other` - The second program
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let first: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
    /// let second: StateProgram<i32, &str> = StateProgram::pure("hello");
    /// let product = first.product(second);
    /// let (final_state, (left, right)) = product.run(42);
    /// assert_eq!(final_state, 43);
    /// assert_eq!(left, 42);
    /// assert_eq!(right, "hello");
    /// ```
    #[must_use]
    pub fn product<B>(self, other: StateProgram<S, B>) -> StateProgram<S, (A, B)>
    where
        B: 'static,
    {
        self.map2(other, |a, b| (a, b))
    }
}

// =============================================================================
// MonadState Operations (as inherent methods)
// =============================================================================

impl<St> StateProgram<St, St>
where
    St: Clone + 'static,
{
    /// Creates a program that returns the current state without modifying
    /// it.
    ///
    /// This is the fundamental "get" operation of `MonadState`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, i32> = StateProgram::get();
    /// let (final_state, result) = program.run(42);
    /// assert_eq!(final_state, 42);
    /// assert_eq!(result, 42);
    /// ```
    #[must_use]
    pub fn get() -> Self {
        Self::new(|state: St| {
            let snapshot = state.clone();
            (state, snapshot)
        })
    }
}

impl<S> StateProgram<S, ()>
where
    S: 'static,
{
    /// Creates a program that replaces the current state with a new value.
    ///
    /// This is the fundamental "put"/"set" operation of `MonadState`.
    ///
    /// # Arguments
    ///
    /// * `new_state` - The new state value
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, ()> = StateProgram::put(100);
    /// let (final_state, _) = program.run(42);
    /// assert_eq!(final_state, 100);
    /// ```
    pub fn put(new_state: S) -> Self
    where
        S: Clone,
    {
        Self::new(move |_| (new_state.clone(), ()))
    }

    /// Creates a program that modifies the current state using a function.
    ///
    /// # Arguments
    ///
    /// * `modifier` - A function that transforms the state
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<i32, ()> = StateProgram::modify(|x| x * 2);
    /// let (final_state, _) = program.run(21);
    /// assert_eq!(final_state, 42);
    /// ```
    pub fn modify<F>(modifier: F) -> Self
    where
        F: Fn(S) -> S + 'static,
    {
        Self::new(move |state| (modifier(state), ()))
    }
}

impl<S, A> StateProgram<S, A>
where
    S: 'static,
    A: 'static,
{
    /// Creates a program that projects a value from the current state.
    ///
    /// This is the "inspect" operation: a convenience combining `get` with
    /// a projection, leaving the state unchanged.
    ///
    /// # Arguments
    ///
    /// * `projection` - A function that extracts a value from the state
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::effect::StateProgram;
    ///
    /// let program: StateProgram<Vec<i64>, usize> = StateProgram::gets(|stack: &Vec<i64>| stack.len());
    /// let (_, depth) = program.run(vec![1, 2, 3]);
    /// assert_eq!(depth, 3);
    /// ```
    pub fn gets<F>(projection: F) -> Self
    where
        F: Fn(&S) -> A + 'static,
    {
        Self::new(move |state| {
            let result = projection(&state);
            (state, result)
        })
    }
}

// =============================================================================
// Clone Implementation
// =============================================================================

impl<S, A> Clone for StateProgram<S, A>
where
    S: 'static,
    A: 'static,
{
    fn clone(&self) -> Self {
        Self {
            transition: self.transition.clone(),
        }
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<S, A> std::fmt::Display for StateProgram<S, A>
where
    S: 'static,
    A: 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<StateProgram>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_state_program() {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        assert_eq!(format!("{program}"), "<StateProgram>");
    }

    // =========================================================================
    // Core Operations
    // =========================================================================

    #[rstest]
    fn state_program_new_and_run() {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        let (final_state, result) = program.run(10);
        assert_eq!(final_state, 11);
        assert_eq!(result, 20);
    }

    #[rstest]
    fn state_program_pure_does_not_modify_state() {
        let program: StateProgram<i32, &str> = StateProgram::pure("constant");
        let (final_state, result) = program.run(42);
        assert_eq!(final_state, 42);
        assert_eq!(result, "constant");
    }

    #[rstest]
    fn state_program_get_returns_current_state() {
        let program: StateProgram<i32, i32> = StateProgram::get();
        let (final_state, result) = program.run(42);
        assert_eq!(final_state, 42);
        assert_eq!(result, 42);
    }

    #[rstest]
    fn state_program_put_replaces_state() {
        let program: StateProgram<i32, ()> = StateProgram::put(100);
        let (final_state, ()) = program.run(42);
        assert_eq!(final_state, 100);
    }

    #[rstest]
    fn state_program_modify_transforms_state() {
        let program: StateProgram<i32, ()> = StateProgram::modify(|x| x * 2);
        let (final_state, ()) = program.run(21);
        assert_eq!(final_state, 42);
    }

    #[rstest]
    fn state_program_gets_projects_state() {
        let program: StateProgram<Vec<i64>, usize> =
            StateProgram::gets(|stack: &Vec<i64>| stack.len());
        let (final_state, depth) = program.run(vec![5, 6]);
        assert_eq!(final_state, vec![5, 6]);
        assert_eq!(depth, 2);
    }

    #[rstest]
    fn state_program_fmap_transforms_result() {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s, s));
        let mapped = program.fmap(|value| value * 2);
        let (final_state, result) = mapped.run(21);
        assert_eq!(final_state, 21);
        assert_eq!(result, 42);
    }

    #[rstest]
    fn state_program_flat_map_threads_state() {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
        let chained =
            program.flat_map(|value| StateProgram::new(move |s: i32| (s, value + s)));
        let (final_state, result) = chained.run(10);
        assert_eq!(final_state, 11);
        assert_eq!(result, 21); // 10 + 11
    }

    #[rstest]
    fn state_program_map2_combines_results() {
        let first: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s));
        let second: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        let combined = first.map2(second, |a, b| a + b);
        let (final_state, result) = combined.run(10);
        assert_eq!(final_state, 12);
        assert_eq!(result, 32); // 10 + 22
    }

    #[rstest]
    fn state_program_clone_shares_transition() {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        let cloned = program.clone();
        let (f1, r1) = program.run(10);
        let (f2, r2) = cloned.run(10);
        assert_eq!(f1, f2);
        assert_eq!(r1, r2);
    }

    #[rstest]
    fn state_program_rerun_is_idempotent() {
        let program: StateProgram<i32, i32> = StateProgram::get()
            .flat_map(|value| StateProgram::put(value + 1).then(StateProgram::pure(value)));
        assert_eq!(program.run(7), program.run(7));
    }

    // =========================================================================
    // Stack Safety
    // =========================================================================

    #[rstest]
    fn state_program_deep_then_chain_does_not_overflow() {
        let mut program: StateProgram<u64, ()> = StateProgram::pure(());
        for _ in 0..10_000 {
            program = program.then(StateProgram::modify(|count: u64| count + 1));
        }
        let (final_state, ()) = program.run(0);
        assert_eq!(final_state, 10_000);
    }
}
