//! Client for the origin-resolver preview surface.

mod client;

pub use client::{FetchedResponse, OriginClient};
