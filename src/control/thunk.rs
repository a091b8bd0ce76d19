//! Stack-safe deferred evaluation via trampolining.
//!
//! This module provides the `Thunk<A>` type for expressing suspended,
//! composable computations in a stack-safe manner. Instead of using the
//! call stack, deferred steps and pending transformations are represented
//! as data and interpreted in a loop.
//!
//! # Motivation
//!
//! Rust does not guarantee tail call optimization (TCO). This means that
//! deeply recursive functions can overflow the stack. Trampolining converts
//! recursion into iteration, making it safe for arbitrary depths.
//!
//! # Examples
//!
//! ## Factorial
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
//! let result = factorial(20).force();
//! assert_eq!(result, 2432902008176640000);
//! ```
//!
//! ## Mutual Recursion
//!
//! ```rust
//! use treadmill::control::Thunk;
//!
//! fn is_even(n: u64) -> Thunk<bool> {
//!     if n == 0 {
//!         Thunk::done(true)
//!     } else {
//!         Thunk::defer(move || is_odd(n - 1))
//!     }
//! }
//!
//! fn is_odd(n: u64) -> Thunk<bool> {
//!     if n == 0 {
//!         Thunk::done(false)
//!     } else {
//!         Thunk::defer(move || is_even(n - 1))
//!     }
//! }
//!
//! assert!(is_even(1000).force());
//! assert!(!is_odd(1000).force());
//! ```

use std::any::Any;
use std::marker::PhantomData;

use smallvec::SmallVec;

/// A type-erased computed value.
///
/// Intermediate results flowing between heterogeneously-typed `map` and
/// `flat_map` steps are carried as `Box<dyn Any>` and downcast at the
/// boundary of each user-supplied closure. The phantom-typed [`Thunk`]
/// wrapper guarantees every downcast succeeds.
type ErasedValue = Box<dyn Any>;

/// The untyped node graph behind [`Thunk`].
///
/// Keeping the graph untyped lets `force` hold pending continuations with
/// different intermediate types on a single explicit stack, which is what
/// bounds evaluation to constant native stack space.
enum Node {
    /// The computation has completed with a value.
    Done(ErasedValue),
    /// The computation is suspended and needs another step.
    Defer(Box<dyn FnOnce() -> Node>),
    /// A value transformation recorded lazily over a source node.
    Mapped(Box<Node>, Box<dyn FnOnce(ErasedValue) -> ErasedValue>),
    /// A monadic continuation recorded lazily over a source node.
    Bind(Box<Node>, Box<dyn FnOnce(ErasedValue) -> Node>),
}

/// A pending step accumulated by `force` while unwinding `Mapped`/`Bind`
/// nodes toward a `Done` leaf.
enum Pending {
    /// Apply a pure transformation to the computed value.
    Transform(Box<dyn FnOnce(ErasedValue) -> ErasedValue>),
    /// Feed the computed value to a continuation producing the next node.
    Continue(Box<dyn FnOnce(ErasedValue) -> Node>),
}

/// Downcasts an erased value back to its concrete type.
///
/// The typed `Thunk` API is the only way to construct nodes, so the stored
/// type always matches the requested one; a mismatch is a bug in this
/// module, not in caller code.
fn downcast<A: 'static>(value: ErasedValue) -> A {
    *value
        .downcast::<A>()
        .expect("Thunk: continuation received a value of an unexpected type")
}

/// A suspended, composable computation evaluated in constant stack space.
///
/// `Thunk<A>` represents a potentially deep chain of deferred steps and
/// lazy transformations that produces a value of type `A`. Steps are
/// encoded as data and interpreted by [`force`](Thunk::force) with an
/// explicit work list, never with native recursion.
///
/// # Type Parameters
///
/// * `A` - The type of the final result. Must be `'static` due to the
///   internal use of boxed closures and type erasure.
///
/// # Design
///
/// A thunk is one of:
///
/// 1. `done(a)` - an already-computed value
/// 2. `defer(producer)` - a suspended step yielding another thunk
/// 3. a lazily recorded `map` or `flat_map` over another thunk
///
/// Forcing a thunk is one-shot: `force` consumes `self`, so an
/// already-evaluated thunk cannot be observed twice. Re-forcing an
/// unconsumed pure thunk built from the same closures yields the same
/// value.
///
/// # Laws
///
/// `Thunk` forms a monad and satisfies:
///
/// - **Left Identity**: `Thunk::done(a).flat_map(f).force() == f(a).force()`
/// - **Right Identity**: `m.flat_map(Thunk::done).force() == m.force()`
/// - **Associativity**: `m.flat_map(f).flat_map(g).force() == m.flat_map(|x| f(x).flat_map(g)).force()`
///
/// # Non-termination
///
/// `force` is total for any finite chain of steps. A producer that keeps
/// yielding fresh `defer` nodes forever makes `force` loop forever; the
/// evaluator does not (and cannot) detect this, it is a caller obligation.
///
/// # Examples
///
/// ```rust
/// use treadmill::control::Thunk;
///
/// // Simple computation
/// let result = Thunk::done(42).force();
/// assert_eq!(result, 42);
///
/// // Suspended computation
/// let result = Thunk::defer(|| Thunk::done(42)).force();
/// assert_eq!(result, 42);
/// ```
pub struct Thunk<A> {
    node: Node,
    result: PhantomData<fn() -> A>,
}

impl<A: 'static> Thunk<A> {
    fn from_node(node: Node) -> Self {
        Self {
            node,
            result: PhantomData,
        }
    }

    /// Creates a completed thunk with the given value.
    ///
    /// # Arguments
    ///
    /// * `value` - The final result of the computation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::done(42);
    /// assert_eq!(thunk.force(), 42);
    /// ```
    #[inline]
    pub fn done(value: A) -> Self {
        Self::from_node(Node::Done(Box::new(value)))
    }

    /// Alias for `done`. Lifts a value into the thunk context.
    ///
    /// This corresponds to the `pure` operation in Applicative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::pure(42);
    /// assert_eq!(thunk.force(), 42);
    /// ```
    #[inline]
    pub fn pure(value: A) -> Self {
        Self::done(value)
    }

    /// Creates a suspended thunk that will continue with the given producer.
    ///
    /// The producer is not evaluated until `force()` reaches it.
    ///
    /// # Arguments
    ///
    /// * `producer` - A function that produces the next thunk
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::defer(|| Thunk::done(42));
    /// assert_eq!(thunk.force(), 42);
    /// ```
    #[inline]
    pub fn defer<F>(producer: F) -> Self
    where
        F: FnOnce() -> Thunk<A> + 'static,
    {
        Self::from_node(Node::Defer(Box::new(move || producer().node)))
    }

    /// Applies a function to the result of the thunk.
    ///
    /// This is the functor `map` operation. The transformation is recorded
    /// lazily and applied during `force`, after the source value is known.
    ///
    /// # Arguments
    ///
    /// * `transform` - A function to apply to the final value
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::done(21);
    /// let doubled = thunk.map(|x| x * 2);
    /// assert_eq!(doubled.force(), 42);
    /// ```
    pub fn map<B, F>(self, transform: F) -> Thunk<B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        Thunk::from_node(Node::Mapped(
            Box::new(self.node),
            Box::new(move |value| Box::new(transform(downcast::<A>(value))) as ErasedValue),
        ))
    }

    /// Applies a function that returns a thunk to the result.
    ///
    /// This is the monadic `bind` (>>=) operation. The continuation is
    /// recorded lazily and invoked during `force`.
    ///
    /// # Arguments
    ///
    /// * `function` - A function that takes the result and returns a new thunk
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::done(21);
    /// let result = thunk.flat_map(|x| Thunk::done(x * 2));
    /// assert_eq!(result.force(), 42);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Thunk<B>
    where
        F: FnOnce(A) -> Thunk<B> + 'static,
        B: 'static,
    {
        Thunk::from_node(Node::Bind(
            Box::new(self.node),
            Box::new(move |value| function(downcast::<A>(value)).node),
        ))
    }

    /// Alias for `flat_map`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let thunk = Thunk::done(21);
    /// let result = thunk.and_then(|x| Thunk::done(x * 2));
    /// assert_eq!(result.force(), 42);
    /// ```
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Thunk<B>
    where
        F: FnOnce(A) -> Thunk<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two thunks, discarding the result of the first.
    ///
    /// # Arguments
    ///
    /// * `next` - The thunk to evaluate after this one
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// let first = Thunk::done("ignored");
    /// let second = Thunk::done(42);
    /// let result = first.then(second);
    /// assert_eq!(result.force(), 42);
    /// ```
    #[inline]
    pub fn then<B: 'static>(self, next: Thunk<B>) -> Thunk<B> {
        self.flat_map(move |_| next)
    }

    /// Forces the thunk to completion and returns the final value.
    ///
    /// This is the trampoline evaluator. It maintains an explicit list of
    /// pending transformations and continuations instead of recursing:
    ///
    /// - `Defer` replaces the cursor with the produced node
    /// - `Mapped`/`Bind` push their closure onto the pending list and
    ///   descend into the source node
    /// - `Done` pops pending steps until the list empties, then returns
    ///
    /// Pending steps are pushed outermost-first while unwinding, so popping
    /// applies the innermost (earliest-constructed) transformation first.
    /// Native stack usage is O(1) regardless of chain depth.
    ///
    /// Each user-supplied producer/transform closure is invoked exactly
    /// once, in dependency order. A closure that panics propagates the
    /// panic unchanged to the caller of `force`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treadmill::control::Thunk;
    ///
    /// fn count_down(n: u64) -> Thunk<u64> {
    ///     if n == 0 {
    ///         Thunk::done(0)
    ///     } else {
    ///         Thunk::defer(move || count_down(n - 1))
    ///     }
    /// }
    ///
    /// // This would overflow the stack with regular recursion
    /// let result = count_down(100_000).force();
    /// assert_eq!(result, 0);
    /// ```
    pub fn force(self) -> A {
        let mut current = self.node;
        let mut pending: SmallVec<[Pending; 16]> = SmallVec::new();

        loop {
            current = match current {
                Node::Done(value) => match pending.pop() {
                    None => return downcast::<A>(value),
                    Some(Pending::Transform(transform)) => Node::Done(transform(value)),
                    Some(Pending::Continue(continuation)) => continuation(value),
                },
                Node::Defer(producer) => producer(),
                Node::Mapped(source, transform) => {
                    pending.push(Pending::Transform(transform));
                    *source
                }
                Node::Bind(source, continuation) => {
                    pending.push(Pending::Continue(continuation));
                    *source
                }
            };
        }
    }
}

// =============================================================================
// Debug Implementation
// =============================================================================

impl<A> std::fmt::Debug for Thunk<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node {
            Node::Done(_) => formatter.debug_tuple("Done").field(&"<value>").finish(),
            Node::Defer(_) => formatter.debug_tuple("Defer").field(&"<producer>").finish(),
            Node::Mapped(..) => formatter.debug_tuple("Mapped").field(&"<transform>").finish(),
            Node::Bind(..) => formatter
                .debug_tuple("Bind")
                .field(&"<continuation>")
                .finish(),
        }
    }
}
