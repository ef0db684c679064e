//! Core library for the DDNS update endpoint.
//!
//! This crate holds everything that is independent of the HTTP front end
//! and of any concrete provider:
//!
//! - **ReconciliationRequest**: per-request parameters with the
//!   documented defaults (random label, absent-password sentinel)
//! - **RecordClient**: trait for the provider's record API
//! - **Reconciler**: the lookup → create/update/ambiguous decision
//! - **DdnsConfig**: explicit configuration passed into every operation
//!
//! The binary wires a concrete [`RecordClient`] implementation into the
//! [`Reconciler`] and maps [`ReconcileOutcome`] values to HTTP responses.

pub mod auth;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod request;
pub mod traits;

pub use config::{DdnsConfig, ProviderConfig};
pub use error::{Error, Result};
pub use reconcile::{ReconcileOutcome, Reconciler};
pub use request::ReconciliationRequest;
pub use traits::{DnsRecord, ProviderResponse, RecordClient};
