//! Test doubles shared by the reconciliation contract tests

use std::net::Ipv6Addr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsRecord, ProviderResponse, RecordClient};

/// A `RecordClient` that serves a fixed record list and counts calls
pub struct MockRecordClient {
    /// Records returned by every `list_records` call
    records: Vec<DnsRecord>,
    /// Provider status to fail the lookup with, if set
    fail_lookup_status: Option<u16>,
    list_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    /// `(record id, record name, ipv6)` per update call
    updates: Arc<Mutex<Vec<(String, String, Ipv6Addr)>>>,
    /// `(name, ipv6)` per create call
    creates: Arc<Mutex<Vec<(String, Ipv6Addr)>>>,
}

impl MockRecordClient {
    pub fn returning(records: Vec<DnsRecord>) -> Self {
        Self {
            records,
            fail_lookup_status: None,
            list_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
            creates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client whose lookup fails with the given provider status
    pub fn failing_lookup(status: u16) -> Self {
        let mut client = Self::returning(Vec::new());
        client.fail_lookup_status = Some(status);
        client
    }

    /// Create a new mock that shares counters with an existing one
    pub fn sharing_counters_with(&self, records: Vec<DnsRecord>) -> Self {
        Self {
            records,
            fail_lookup_status: self.fail_lookup_status,
            list_calls: Arc::clone(&self.list_calls),
            update_calls: Arc::clone(&self.update_calls),
            create_calls: Arc::clone(&self.create_calls),
            updates: Arc::clone(&self.updates),
            creates: Arc::clone(&self.creates),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<(String, String, Ipv6Addr)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<(String, Ipv6Addr)> {
        self.creates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecordClient for MockRecordClient {
    async fn list_records(&self, _label: &str) -> Result<Vec<DnsRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_lookup_status {
            return Err(Error::provider(status, "mock lookup failure"));
        }
        Ok(self.records.clone())
    }

    async fn update_record(&self, record: &DnsRecord, ipv6: Ipv6Addr) -> Result<ProviderResponse> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updates
            .lock()
            .unwrap()
            .push((record.id.clone(), record.name.clone(), ipv6));
        Ok(ProviderResponse {
            status: 200,
            body: format!(r#"{{"success":true,"result":{{"id":"{}"}}}}"#, record.id),
        })
    }

    async fn create_record(&self, name: &str, ipv6: Ipv6Addr) -> Result<ProviderResponse> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.creates
            .lock()
            .unwrap()
            .push((name.to_string(), ipv6));
        Ok(ProviderResponse {
            status: 200,
            body: r#"{"success":true}"#.to_string(),
        })
    }
}

/// Build a record snapshot the way the provider would return it
pub fn record(id: &str, name: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        record_type: "AAAA".to_string(),
        extra: serde_json::Map::new(),
    }
}
