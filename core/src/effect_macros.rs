//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block evaluates to `Option<Action>`; `Some` is fed back to the store.
///
/// # Example
///
/// ```rust,ignore
/// use tasklist_core::async_effect;
///
/// let api = env.todolists.clone();
/// async_effect! {
///     let todolists = api.list().await.ok()?;
///     Some(TodolistsAction::TodolistsFetched { todolists })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
