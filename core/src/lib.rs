//! # Tasklist Core
//!
//! Core traits and types for the tasklist client.
//!
//! The client keeps todo lists, tasks and films in a single state tree and
//! only changes that tree through reducers. Everything that talks to the
//! network is described as an [`Effect`](effect::Effect) and executed by the
//! runtime crate.
//!
//! ## Core Concepts
//!
//! - **State**: One slice of client state (a collection plus its request status)
//! - **Action**: Every input a slice accepts: commands, fulfilled and rejected results
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of async work whose result is fed back as an action
//! - **Environment**: Injected dependencies (API modules, clock, notifier)
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct TodolistsState {
//!     items: Collection<Todolist>,
//!     status: RequestStatus,
//! }
//!
//! impl Reducer for TodolistsReducer {
//!     type State = TodolistsState;
//!     type Action = TodolistsAction;
//!     type Environment = AppEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TodolistsState,
//!         action: TodolistsAction,
//!         env: &AppEnvironment,
//!     ) -> SmallVec<[Effect<TodolistsAction>; 4]> {
//!         match action {
//!             TodolistsAction::FetchTodolists => {
//!                 state.status.begin();
//!                 let api = env.todolists.clone();
//!                 smallvec![async_effect! {
//!                     Some(match api.list().await {
//!                         Ok(todolists) => TodolistsAction::TodolistsFetched { todolists },
//!                         Err(error) => TodolistsAction::failed(Operation::FetchAll, &error),
//!                     })
//!                 }]
//!             }
//!             // ...
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub mod collection;
pub mod composition;
pub mod lifecycle;

mod effect_macros;

pub use collection::{Collection, Identified, Patchable};
pub use lifecycle::{ErrorKind, Operation, Phase, RequestError, RequestStatus};

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all merge logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The slice state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for FilmsReducer {
    ///     type State = FilmsState;
    ///     type Action = FilmsAction;
    ///     type Environment = AppEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut FilmsState,
    ///         action: FilmsAction,
    ///         env: &AppEnvironment,
    ///     ) -> SmallVec<[Effect<FilmsAction>; 4]> {
    ///         match action {
    ///             FilmsAction::FilmsFetched { films, .. } => {
    ///                 state.items.replace_all(films);
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe work to be performed by the runtime. They are values
/// (not execution) and compose through [`Effect::merge`], [`Effect::chain`]
/// and [`Effect::map`].
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Transform the action this effect feeds back
        ///
        /// Used to lift a slice effect into the root action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: Fn(Action) -> B + Clone + Send + Sync + 'static,
            Action: Send + 'static,
            B: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects.into_iter().map(|effect| effect.map(f.clone())).collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects.into_iter().map(|effect| effect.map(f.clone())).collect(),
                ),
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// A user-facing notice, raised when something needs the user's attention
    /// right away (for example a response that failed schema validation).
    #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
    pub struct Notice {
        /// Short headline
        pub title: String,
        /// One line per detail (validation issues, server messages)
        pub details: Vec<String>,
        /// When the notice was raised
        pub raised_at: DateTime<Utc>,
    }

    /// Notifier trait - delivers intrusive notices to the user
    pub trait Notifier: Send + Sync {
        /// Deliver a notice
        fn notify(&self, notice: &Notice);
    }
}
