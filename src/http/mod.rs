//! HTTP hosting surface (the preview server).
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, timeout, body limit)
//!     → request.rs (target mapped onto the reserved origin, body buffered)
//!     → RequestResolver::resolve
//!     → response.rs (headers copied, body streamed)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, TranslateError, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
