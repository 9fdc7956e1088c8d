//! Diagnostic dispatcher that describes each proxy call back to the caller.

use async_trait::async_trait;
use serde::Serialize;

use crate::headers::HeaderMapping;
use crate::origin::query::QueryParams;
use crate::proxy::dispatcher::{DispatchError, DispatchResult, ProxyDispatcher};
use crate::proxy::request::{HttpMethod, ProxyRequest};
use crate::proxy::response::ProxyResponse;

/// JSON document returned by [`EchoDispatcher`].
#[derive(Debug, Serialize)]
pub struct EchoReport {
    pub method: HttpMethod,
    pub url: String,
    pub query: QueryParams,
    pub headers: HeaderMapping,
    pub body_length: usize,
    /// Request body, when it is valid UTF-8.
    pub body: Option<String>,
}

/// Answers every proxy call with an `application/json` [`EchoReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoDispatcher;

#[async_trait]
impl ProxyDispatcher for EchoDispatcher {
    async fn dispatch(&self, mut request: ProxyRequest) -> DispatchResult {
        let body = match request.take_body() {
            Some(stream) => stream
                .into_bytes()
                .await
                .map_err(|e| DispatchError::Other(Box::new(e)))?
                .to_vec(),
            None => Vec::new(),
        };

        let report = EchoReport {
            method: request.method(),
            url: request.url().to_string(),
            query: request.query_params().clone(),
            headers: request.headers().clone(),
            body_length: body.len(),
            body: String::from_utf8(body).ok(),
        };

        ProxyResponse::json(&report)
            .map(Some)
            .map_err(|e| DispatchError::Other(Box::new(e)))
    }
}
