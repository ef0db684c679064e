// # Record Client Trait
//
// Defines the interface the reconciler uses to talk to a DNS provider's
// record API. The Cloudflare implementation lives in the
// `ddns-provider-cloudflare` crate; tests substitute mocks.

use std::net::Ipv6Addr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One provider-side DNS record, as returned by the record listing.
///
/// Only the fields reconciliation needs are named; everything else the
/// provider returns (proxy flags, timestamps, tags, ...) is carried
/// opaquely in `extra` and never interpreted. Records are read-only
/// snapshots — any change is a new provider API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Opaque provider identifier, required for updates
    pub id: String,

    /// Fully-qualified record name
    pub name: String,

    /// Current address value
    pub content: String,

    /// Record kind ("AAAA" for everything this system writes)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Remaining provider fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A provider's raw reply to a mutation.
///
/// Create and update responses are proxied back to the caller verbatim,
/// so the body is kept as the undecoded string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status the provider answered with
    pub status: u16,

    /// Response body, verbatim
    pub body: String,
}

/// Trait for a DNS provider's record API
///
/// Implementations are stateless and single-shot: one method call is one
/// provider API call, with no retries, caching, or background work.
/// Failures surface as [`crate::Error`] values for the caller to map.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// List the records whose name contains `label`, within the
    /// configured zone.
    ///
    /// Returns the provider's first result page verbatim.
    async fn list_records(&self, label: &str) -> Result<Vec<DnsRecord>>;

    /// Point an existing record at `ipv6`.
    ///
    /// The record's name is preserved from the matched record; only the
    /// content changes (plus the fixed ttl/proxied values).
    async fn update_record(&self, record: &DnsRecord, ipv6: Ipv6Addr) -> Result<ProviderResponse>;

    /// Create a new record `name` pointing at `ipv6`.
    async fn create_record(&self, name: &str, ipv6: Ipv6Addr) -> Result<ProviderResponse>;
}
