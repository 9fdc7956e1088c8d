//! Hosting-surface adapters.
//!
//! A hosting surface translates its native request into a
//! [`ResolveRequest`](crate::resolver::ResolveRequest), hands it to the
//! resolver, and translates the [`Resolution`](crate::resolver::Resolution)
//! back. The axum preview server lives in [`crate::http`]; this module holds
//! the callback-style surface used by embedding toolkits.

pub mod callback;

pub use callback::{CallbackAdapter, TaskId};
