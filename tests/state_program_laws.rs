//! Property-based tests for StateProgram laws.
//!
//! Tests the following laws using proptest:
//!
//! ## Functor Laws
//! - Identity: program.fmap(|x| x) == program
//! - Composition: program.fmap(f).fmap(g) == program.fmap(|x| g(f(x)))
//!
//! ## Monad Laws
//! - Left Identity: pure(a).flat_map(f) == f(a)
//! - Right Identity: m.flat_map(pure) == m
//! - Associativity: m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//!
//! ## MonadState Laws
//! - Get Put Law: get().flat_map(|s| put(s)) == pure(())
//! - Put Get Law: put(s).then(get()) returns s
//! - Put Put Law: put(s1).then(put(s2)) == put(s2)
//! - Modify Composition: modify(f).then(modify(g)) == modify(|s| g(f(s)))
//!
//! ## Purity
//! - Running the same program twice with the same initial state yields
//!   identical (state, result) pairs.

#![cfg(feature = "effect")]

use proptest::prelude::*;
use treadmill::effect::StateProgram;

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Functor Identity Law: program.fmap(|x| x) == program
    #[test]
    fn prop_state_program_functor_identity(initial_state in -1000i32..1000i32) {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        let mapped: StateProgram<i32, i32> =
            StateProgram::new(|s: i32| (s + 1, s * 2)).fmap(|x| x);

        let (final1, result1) = program.run(initial_state);
        let (final2, result2) = mapped.run(initial_state);

        prop_assert_eq!(final1, final2);
        prop_assert_eq!(result1, result2);
    }

    /// Functor Composition Law: program.fmap(f).fmap(g) == program.fmap(|x| g(f(x)))
    #[test]
    fn prop_state_program_functor_composition(initial_state in -100i32..100i32) {
        let function1 = |x: i32| x.wrapping_add(1);
        let function2 = |x: i32| x.wrapping_mul(2);

        let left = StateProgram::new(|s: i32| (s, s))
            .fmap(function1)
            .fmap(function2);
        let right = StateProgram::new(|s: i32| (s, s))
            .fmap(move |x| function2(function1(x)));

        let (final_left, result_left) = left.run(initial_state);
        let (final_right, result_right) = right.run(initial_state);

        prop_assert_eq!(final_left, final_right);
        prop_assert_eq!(result_left, result_right);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Monad Left Identity Law: pure(a).flat_map(f) == f(a)
    #[test]
    fn prop_state_program_monad_left_identity(
        value in -1000i32..1000i32,
        initial_state in -1000i32..1000i32,
    ) {
        let function =
            |a: i32| StateProgram::new(move |s: i32| (s.wrapping_add(1), a.wrapping_add(s)));

        let left: StateProgram<i32, i32> = StateProgram::pure(value).flat_map(function);
        let right: StateProgram<i32, i32> = function(value);

        let (final_left, result_left) = left.run(initial_state);
        let (final_right, result_right) = right.run(initial_state);

        prop_assert_eq!(final_left, final_right);
        prop_assert_eq!(result_left, result_right);
    }

    /// Monad Right Identity Law: m.flat_map(pure) == m
    #[test]
    fn prop_state_program_monad_right_identity(initial_state in -1000i32..1000i32) {
        let program: StateProgram<i32, i32> = StateProgram::new(|s: i32| (s + 1, s * 2));
        let chained: StateProgram<i32, i32> =
            StateProgram::new(|s: i32| (s + 1, s * 2)).flat_map(StateProgram::pure);

        let (final1, result1) = program.run(initial_state);
        let (final2, result2) = chained.run(initial_state);

        prop_assert_eq!(final1, final2);
        prop_assert_eq!(result1, result2);
    }

    /// Monad Associativity Law:
    /// m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_state_program_monad_associativity(initial_state in -100i32..100i32) {
        let function1 =
            |a: i32| StateProgram::new(move |s: i32| (s.wrapping_add(1), a.wrapping_add(s)));
        let function2 =
            |a: i32| StateProgram::new(move |s: i32| (s.wrapping_mul(2), a.wrapping_mul(s)));

        let left = StateProgram::new(|s: i32| (s, s))
            .flat_map(function1)
            .flat_map(function2);
        let right = StateProgram::new(|s: i32| (s, s))
            .flat_map(move |x| function1(x).flat_map(function2));

        let (final_left, result_left) = left.run(initial_state);
        let (final_right, result_right) = right.run(initial_state);

        prop_assert_eq!(final_left, final_right);
        prop_assert_eq!(result_left, result_right);
    }
}

// =============================================================================
// MonadState Laws
// =============================================================================

proptest! {
    /// Get Put Law: get().flat_map(|s| put(s)) == pure(())
    #[test]
    fn prop_state_program_get_put(initial_state in -1000i32..1000i32) {
        let left: StateProgram<i32, ()> =
            StateProgram::get().flat_map(StateProgram::put);
        let right: StateProgram<i32, ()> = StateProgram::pure(());

        prop_assert_eq!(left.run(initial_state), right.run(initial_state));
    }

    /// Put Get Law: put(s).then(get()) returns s
    #[test]
    fn prop_state_program_put_get(new_state in -1000i32..1000i32, initial_state in -1000i32..1000i32) {
        let program: StateProgram<i32, i32> =
            StateProgram::put(new_state).then(StateProgram::get());

        let (final_state, result) = program.run(initial_state);
        prop_assert_eq!(final_state, new_state);
        prop_assert_eq!(result, new_state);
    }

    /// Put Put Law: put(s1).then(put(s2)) == put(s2)
    #[test]
    fn prop_state_program_put_put(
        first in -1000i32..1000i32,
        second in -1000i32..1000i32,
        initial_state in -1000i32..1000i32,
    ) {
        let left: StateProgram<i32, ()> =
            StateProgram::put(first).then(StateProgram::put(second));
        let right: StateProgram<i32, ()> = StateProgram::put(second);

        prop_assert_eq!(left.run(initial_state), right.run(initial_state));
    }

    /// Modify Composition: modify(f).then(modify(g)) == modify(|s| g(f(s)))
    #[test]
    fn prop_state_program_modify_composition(initial_state in -100i32..100i32) {
        let function1 = |s: i32| s.wrapping_add(10);
        let function2 = |s: i32| s.wrapping_mul(3);

        let left: StateProgram<i32, ()> =
            StateProgram::modify(function1).then(StateProgram::modify(function2));
        let right: StateProgram<i32, ()> =
            StateProgram::modify(move |s| function2(function1(s)));

        prop_assert_eq!(left.run(initial_state), right.run(initial_state));
    }
}

// =============================================================================
// Purity
// =============================================================================

proptest! {
    /// Running the same program twice with the same initial state yields
    /// identical (state, result) pairs.
    #[test]
    fn prop_state_program_runs_are_idempotent(initial_state in -1000i32..1000i32) {
        let program: StateProgram<i32, i32> = StateProgram::get()
            .flat_map(|value| {
                StateProgram::modify(move |s: i32| s.wrapping_add(value))
                    .then(StateProgram::get())
            });

        prop_assert_eq!(program.run(initial_state), program.run(initial_state));
    }
}
