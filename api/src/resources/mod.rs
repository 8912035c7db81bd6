//! Resource API modules
//!
//! Each module maps an operation to exactly one HTTP request and decodes the
//! typed result. No caching, no batching.

pub mod films;
pub mod tasks;
pub mod todolists;

pub use films::FilmsApi;
pub use tasks::TasksApi;
pub use todolists::TodolistsApi;
