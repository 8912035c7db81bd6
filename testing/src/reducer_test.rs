//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use std::future::Future;
use std::pin::Pin;
use tasklist_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Type alias for feedback assertion functions
type FeedbackAssertion<A> = Box<dyn FnOnce(&[A])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use tasklist_testing::ReducerTest;
///
/// ReducerTest::new(TodolistsReducer)
///     .with_env(test_environment())
///     .given_state(TodolistsState::default())
///     .when_action(TodolistsAction::CreateTodolist { title: "Groceries".into() })
///     .then_state(|state| assert!(state.status.is_pending()))
///     .then_feedback(|actions| {
///         assert!(matches!(actions, [TodolistsAction::TodolistCreated { .. }]));
///     })
///     .run_async()
///     .await;
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
    feedback_assertions: Vec<FeedbackAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
    A: Clone,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
            feedback_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the actions the effects resolve to (Then)
    ///
    /// Requires [`run_async`](Self::run_async).
    #[must_use]
    pub fn then_feedback<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[A]) + 'static,
    {
        self.feedback_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce the action and run state and effect assertions
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    fn reduce(self) -> (Vec<Effect<A>>, Vec<FeedbackAssertion<A>>) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let effects = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }

        (effects.into_vec(), self.feedback_assertions)
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// if feedback assertions were added (use `run_async`),
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    pub fn run(self) {
        let (_, feedback) = self.reduce();
        assert!(
            feedback.is_empty(),
            "then_feedback() assertions need run_async()"
        );
    }

    /// Run the test, resolve the returned effects, and execute all assertions
    ///
    /// Effects are resolved in place without a store: futures are awaited in
    /// order and the actions they produce are collected, not reduced.
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    pub async fn run_async(self)
    where
        A: Send + 'static,
    {
        let (effects, feedback_assertions) = self.reduce();
        let actions = assertions::resolve_effects(effects).await;

        for assertion in feedback_assertions {
            assertion(&actions);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use super::{Effect, Future, Pin};

    /// Resolve effects into the actions they produce
    ///
    /// `Parallel` and `Sequential` children are resolved in order.
    pub fn resolve_effects<A>(effects: Vec<Effect<A>>) -> Pin<Box<dyn Future<Output = Vec<A>> + Send>>
    where
        A: Send + 'static,
    {
        Box::pin(async move {
            let mut actions = Vec::new();
            for effect in effects {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => actions.extend(fut.await),
                    Effect::Parallel(children) | Effect::Sequential(children) => {
                        actions.extend(resolve_effects(children).await);
                    },
                }
            }
            actions
        })
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, Default)]
    struct TitlesState {
        titles: Vec<String>,
        pending: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TitlesAction {
        Add(String),
        Clear,
        Fetch,
        Fetched(String),
    }

    struct TitlesReducer;

    struct NoEnv;

    impl Reducer for TitlesReducer {
        type State = TitlesState;
        type Action = TitlesAction;
        type Environment = NoEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TitlesAction::Add(title) => {
                    state.titles.push(title);
                    smallvec![Effect::None]
                },
                TitlesAction::Clear => {
                    state.titles.clear();
                    SmallVec::new()
                },
                TitlesAction::Fetch => {
                    state.pending = true;
                    smallvec![Effect::Parallel(vec![
                        Effect::Future(Box::pin(async { Some(TitlesAction::Fetched("Work".into())) })),
                        Effect::Future(Box::pin(async { None })),
                        Effect::Future(Box::pin(async { Some(TitlesAction::Fetched("Home".into())) })),
                    ])]
                },
                TitlesAction::Fetched(title) => {
                    state.pending = false;
                    state.titles.push(title);
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn test_state_assertions() {
        ReducerTest::new(TitlesReducer)
            .with_env(NoEnv)
            .given_state(TitlesState::default())
            .when_action(TitlesAction::Add("Groceries".to_string()))
            .then_state(|state| {
                assert_eq!(state.titles, ["Groceries"]);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_given_state_is_used() {
        ReducerTest::new(TitlesReducer)
            .with_env(NoEnv)
            .given_state(TitlesState {
                titles: vec!["Work".to_string()],
                pending: false,
            })
            .when_action(TitlesAction::Clear)
            .then_state(|state| assert!(state.titles.is_empty()))
            .run();
    }

    #[tokio::test]
    async fn test_feedback_resolves_nested_effects() {
        ReducerTest::new(TitlesReducer)
            .with_env(NoEnv)
            .given_state(TitlesState::default())
            .when_action(TitlesAction::Fetch)
            .then_state(|state| {
                assert!(state.pending);
                assert!(state.titles.is_empty());
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .then_feedback(|actions| {
                assert_eq!(
                    actions,
                    [
                        TitlesAction::Fetched("Work".to_string()),
                        TitlesAction::Fetched("Home".to_string())
                    ]
                );
            })
            .run_async()
            .await;
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TitlesAction>(&[Effect::None]);
        assertions::assert_no_effects::<TitlesAction>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TitlesAction>::None], 1);
        assertions::assert_effects_count::<TitlesAction>(&[], 0);
    }
}
