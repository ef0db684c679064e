// # Cloudflare Record Client
//
// `RecordClient` implementation against the Cloudflare API v4:
//
// - List DNS Records:  GET  `/zones/:zone_id/dns_records?name.contains=...`
// - Update DNS Record: PUT  `/zones/:zone_id/dns_records/:record_id`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
//
// Every request is authenticated with the `X-Auth-Email` / `X-Auth-Key`
// header pair. One method call is one API call: no retries, no caching.
// Non-success statuses become `Error::Provider` with the status attached;
// create/update success bodies are handed back raw, undecoded, because
// the endpoint proxies them to the caller verbatim.
//
// API reference: https://developers.cloudflare.com/api/

use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

use async_trait::async_trait;
use ddns_core::config::ProviderConfig;
use ddns_core::traits::{DnsRecord, ProviderResponse, RecordClient};
use ddns_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The only record kind this system reads or writes
const RECORD_KIND: &str = "AAAA";

/// Cloudflare reads ttl=1 as "automatic" (shortest propagation)
const TTL_AUTOMATIC: u32 = 1;

/// Cloudflare record API client
///
/// Stateless across calls; safe to share behind an `Arc`.
pub struct CloudflareClient {
    api_email: String,
    /// Never logged; `Debug` redacts it
    api_key: String,
    zone_id: String,
    base_url: String,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_email", &self.api_email)
            .field("api_key", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareClient {
    /// Create a new client.
    ///
    /// # Parameters
    ///
    /// - `api_email`: account email, sent as `X-Auth-Email`
    /// - `api_key`: API key with DNS edit permission, sent as `X-Auth-Key`
    /// - `zone_id`: zone the managed records live in
    pub fn new(
        api_email: impl Into<String>,
        api_key: impl Into<String>,
        zone_id: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Cloudflare API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;

        Ok(Self {
            api_email: api_email.into(),
            api_key,
            zone_id: zone_id.into(),
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
        })
    }

    /// Create a client from the endpoint's provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let ProviderConfig::Cloudflare {
            zone_id,
            api_email,
            api_key,
        } = config;
        Self::new(api_email, api_key, zone_id)
    }

    /// Point the client at a different API root. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, self.zone_id)
    }

    fn record_url(&self, record_id: &str) -> String {
        format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, self.zone_id, record_id
        )
    }

    /// Send one authenticated request and read the full reply
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(reqwest::StatusCode, String)> {
        let response = request
            .header("X-Auth-Email", &self.api_email)
            .header("X-Auth-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        Ok((status, body))
    }

    /// Run a create/update call, passing the success reply through raw
    async fn mutate(&self, request: reqwest::RequestBuilder) -> Result<ProviderResponse> {
        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            return Err(Error::provider(status.as_u16(), body));
        }
        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Body shared by the record create and update calls.
///
/// `ttl` and `proxied` are fixed: this is a direct-address DDNS record,
/// so it is never proxied, and the TTL stays on Cloudflare's automatic
/// setting.
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    content: String,
    ttl: u32,
    proxied: bool,
}

impl<'a> RecordPayload<'a> {
    fn new(name: &'a str, ipv6: Ipv6Addr) -> Self {
        Self {
            record_type: RECORD_KIND,
            name,
            content: ipv6.to_string(),
            ttl: TTL_AUTOMATIC,
            proxied: false,
        }
    }
}

/// Envelope of the record-listing endpoint; only `result` is consumed
#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    result: Vec<DnsRecord>,
}

#[async_trait]
impl RecordClient for CloudflareClient {
    async fn list_records(&self, label: &str) -> Result<Vec<DnsRecord>> {
        debug!(label, "listing records");

        let request = self
            .client
            .get(self.records_url())
            .query(&[("name.contains", label)]);
        let (status, body) = self.execute(request).await?;

        if !status.is_success() {
            return Err(Error::provider(status.as_u16(), body));
        }

        let decoded: ListRecordsResponse = serde_json::from_str(&body)
            .map_err(|e| Error::parse(format!("record list: {e}")))?;
        Ok(decoded.result)
    }

    async fn update_record(&self, record: &DnsRecord, ipv6: Ipv6Addr) -> Result<ProviderResponse> {
        debug!(id = %record.id, name = %record.name, "updating record");

        let payload = RecordPayload::new(&record.name, ipv6);
        self.mutate(self.client.put(self.record_url(&record.id)).json(&payload))
            .await
    }

    async fn create_record(&self, name: &str, ipv6: Ipv6Addr) -> Result<ProviderResponse> {
        debug!(name, "creating record");

        let payload = RecordPayload::new(name, ipv6);
        self.mutate(self.client.post(self.records_url()).json(&payload))
            .await
    }
}
