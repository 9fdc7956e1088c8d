//! Callback-style hosting surface.
//!
//! Embedding toolkits typically hand over a "task" object, expect the response
//! through a callback, and may withdraw the task at any time. [`CallbackAdapter`]
//! keeps a registry of in-flight tasks so a withdrawn task is cancelled and
//! never answered.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::observability::metrics;
use crate::resolver::{RequestResolver, Resolution, ResolveRequest};

/// Identifier the hosting surface uses for one task.
pub type TaskId = Uuid;

/// Answers tasks through callbacks, with cancellation.
#[derive(Clone)]
pub struct CallbackAdapter {
    resolver: RequestResolver,
    pending: Arc<DashMap<TaskId, oneshot::Sender<()>>>,
}

impl CallbackAdapter {
    pub fn new(resolver: RequestResolver) -> Self {
        Self {
            resolver,
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Begin resolving `request` for task `id`.
    ///
    /// `responder` is called exactly once with the outcome, unless the task is
    /// stopped first, in which case it is never called. Resolution failures are
    /// delivered as a 500 response. Returns `false` (and drops `responder`) if a
    /// task with the same id is already in flight.
    pub fn start<F>(&self, id: TaskId, request: ResolveRequest, responder: F) -> bool
    where
        F: FnOnce(Resolution) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        match self.pending.entry(id) {
            Entry::Occupied(_) => {
                tracing::warn!(task_id = %id, "Task already in flight");
                return false;
            }
            Entry::Vacant(slot) => {
                slot.insert(cancel_tx);
            }
        }

        let resolver = self.resolver.clone();
        let pending = Arc::clone(&self.pending);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                result = resolver.resolve(request) => result,
                _ = cancel_rx => {
                    tracing::debug!(task_id = %id, "Task stopped before completion");
                    return;
                }
            };

            // A concurrent stop may have won after resolution finished.
            if pending.remove(&id).is_none() {
                tracing::debug!(task_id = %id, "Task stopped, discarding response");
                return;
            }

            let resolution = outcome.unwrap_or_else(|e| {
                tracing::error!(task_id = %id, error = %e, "Resolution failed");
                Resolution::Response(e.into_response())
            });
            responder(resolution);
        });

        true
    }

    /// Withdraw task `id`. Returns `true` if it was still in flight, in which
    /// case its responder will not be called.
    pub fn stop(&self, id: &TaskId) -> bool {
        match self.pending.remove(id) {
            Some((_, cancel)) => {
                let _ = cancel.send(());
                metrics::record_cancelled();
                tracing::debug!(task_id = %id, "Task stopped");
                true
            }
            None => false,
        }
    }

    /// Number of tasks still in flight.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn resolver(&self) -> &RequestResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::ReservedOrigin;
    use crate::providers::MemoryAssetStore;
    use axum::http::StatusCode;
    use std::time::Duration;

    fn adapter() -> CallbackAdapter {
        let resolver = RequestResolver::builder(ReservedOrigin::default())
            .assets(MemoryAssetStore::new().with_file("index.html", "home"))
            .build();
        CallbackAdapter::new(resolver)
    }

    #[tokio::test]
    async fn test_responder_receives_response() {
        let adapter = adapter();
        let (tx, rx) = oneshot::channel();

        assert!(adapter.start(Uuid::new_v4(), ResolveRequest::get("https://0.0.0.0/"), move |r| {
            let _ = tx.send(r);
        }));

        let resolution = tokio::time::timeout(Duration::from_secs(1), rx).await.unwrap().unwrap();
        let response = resolution.into_response().unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(adapter.pending(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let adapter = adapter();
        let id = Uuid::new_v4();
        adapter.pending.insert(id, oneshot::channel().0);

        assert!(!adapter.start(id, ResolveRequest::get("https://0.0.0.0/"), |_| {
            panic!("must not be called");
        }));
    }

    #[tokio::test]
    async fn test_stop_unknown_task() {
        assert!(!adapter().stop(&Uuid::new_v4()));
    }
}
