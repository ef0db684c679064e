//! Trait seams between the reconciliation logic and provider crates

pub mod record_client;

pub use record_client::{DnsRecord, ProviderResponse, RecordClient};
