//! HTTP front end for the DDNS update endpoint
//!
//! One route, method-agnostic: parse the query, check the password,
//! reconcile, map the outcome to a response. The router is built here so
//! integration tests can drive it without a socket; `main.rs` adds only
//! configuration loading, tracing setup, and the listener.

pub mod handler;

use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use ddns_core::{DdnsConfig, Reconciler};

/// Shared state behind the handler
#[derive(Clone)]
pub struct AppState {
    /// The lookup → create/update/ambiguous driver
    pub reconciler: Arc<Reconciler>,

    /// Endpoint configuration (shared password lives here)
    pub config: Arc<DdnsConfig>,
}

/// Build the endpoint router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handler::update))
        .with_state(state)
}
