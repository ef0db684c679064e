//! Per-request types for the update endpoint
//!
//! A [`ReconciliationRequest`] is derived from one incoming request and
//! discarded with the response. Defaults follow the endpoint contract:
//! an omitted (or empty) `name` gets a random throwaway label, and an
//! omitted (or empty) `pwd` gets a sentinel that authentication can
//! never accept.

use std::net::Ipv6Addr;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Substituted for an absent `pwd` parameter.
///
/// [`crate::DdnsConfig::validate`] rejects a secret equal to this value,
/// so a request without a password always fails authentication.
pub const PASSWORD_ABSENT: &str = "_EMPTY_";

/// Length of the generated label, before the suffix
const RANDOM_LABEL_LEN: usize = 8;

/// Suffix marking labels nobody asked for by name
const RANDOM_LABEL_SUFFIX: &str = ".random";

/// Parameters of one reconciliation, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRequest {
    /// Address the record should point to
    pub ipv6: Ipv6Addr,

    /// Label to look up and create/update
    pub name: String,

    /// Password as supplied, or [`PASSWORD_ABSENT`]
    pub password: String,
}

impl ReconciliationRequest {
    /// Build a request from decoded query parameters.
    ///
    /// Empty strings count as absent: a `?name=&pwd=` request gets a
    /// random label and fails authentication.
    pub fn from_query(ipv6: Ipv6Addr, name: Option<String>, pwd: Option<String>) -> Self {
        Self {
            ipv6,
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(random_label),
            password: pwd
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| PASSWORD_ABSENT.to_string()),
        }
    }
}

/// Generate a `{8 alphanumeric chars}.random` label.
///
/// Uniform over the 62-character alphanumeric alphabet; not
/// cryptographic, and does not need to be.
pub fn random_label() -> String {
    let label: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(RANDOM_LABEL_LEN)
        .map(char::from)
        .collect();
    format!("{label}{RANDOM_LABEL_SUFFIX}")
}
