//! Reducer composition utilities
//!
//! The root state container is built out of independent slice reducers:
//!
//! - **`scope_reducer`**: Focus a slice reducer on its part of the root state
//!   and on the root action variant that carries its actions
//! - **`combine_reducers`**: Run several reducers over the same state and action
//!
//! Together they give single-slice routing: every scoped reducer ignores
//! actions that do not belong to it, so each root action reaches exactly one
//! slice.
//!
//! # Example
//!
//! ```
//! use tasklist_core::composition::{combine_reducers, scope_reducer, BoxedReducer};
//! use tasklist_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct TitlesState {
//!     titles: Vec<String>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TitlesAction {
//!     Added(String),
//! }
//!
//! struct TitlesReducer;
//!
//! impl Reducer for TitlesReducer {
//!     type State = TitlesState;
//!     type Action = TitlesAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TitlesState,
//!         action: TitlesAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TitlesAction>; 4]> {
//!         match action {
//!             TitlesAction::Added(title) => state.titles.push(title),
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct RootState {
//!     lists: TitlesState,
//!     films: TitlesState,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum RootAction {
//!     Lists(TitlesAction),
//!     Films(TitlesAction),
//! }
//!
//! fn lists(state: &mut RootState) -> &mut TitlesState {
//!     &mut state.lists
//! }
//!
//! fn films(state: &mut RootState) -> &mut TitlesState {
//!     &mut state.films
//! }
//!
//! fn lists_action(action: RootAction) -> Option<TitlesAction> {
//!     match action {
//!         RootAction::Lists(action) => Some(action),
//!         RootAction::Films(_) => None,
//!     }
//! }
//!
//! fn films_action(action: RootAction) -> Option<TitlesAction> {
//!     match action {
//!         RootAction::Films(action) => Some(action),
//!         RootAction::Lists(_) => None,
//!     }
//! }
//!
//! let slices: Vec<BoxedReducer<RootState, RootAction, ()>> = vec![
//!     Box::new(scope_reducer(TitlesReducer, lists, lists_action, RootAction::Lists)),
//!     Box::new(scope_reducer(TitlesReducer, films, films_action, RootAction::Films)),
//! ];
//! let root = combine_reducers(slices);
//!
//! let mut state = RootState::default();
//! let _ = root.reduce(&mut state, RootAction::Lists(TitlesAction::Added("Work".into())), &());
//! assert_eq!(state.lists.titles, ["Work"]);
//! assert!(state.films.titles.is_empty());
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A boxed reducer that can be shared with spawned effect tasks
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a child reducer to a part of the parent state and action.
///
/// - `state` borrows the child state out of the parent state
/// - `extract` returns the child action, or `None` when the parent action
///   belongs to another child (the reducer then does nothing)
/// - `embed` lifts the child's effect output back into the parent action
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
        _phantom: std::marker::PhantomData,
    }
}

/// A reducer focused on one child of a larger state and action.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
    _phantom: std::marker::PhantomData<fn() -> E>,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}
