//! Reconciliation of a requested address against provider records
//!
//! The only decision logic in the system:
//!
//! 1. Look up all records whose name contains the requested label.
//! 2. Branch on the match count:
//!    - exactly one → update that record in place
//!    - none → create a record under the requested label
//!    - more than one → report the ambiguity, mutate nothing
//!
//! Correct operation keeps at most one AAAA record per name per zone.
//! When that invariant is already violated the reconciler cannot tell
//! which record is canonical, so it hands the matched names back to the
//! caller instead of guessing.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::request::ReconciliationRequest;
use crate::traits::{ProviderResponse, RecordClient};

/// Outcome of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The single matched record was updated; provider's raw reply
    Updated(ProviderResponse),

    /// No match existed, a record was created; provider's raw reply
    Created(ProviderResponse),

    /// Multiple records matched; nothing was mutated
    Ambiguous {
        /// Names of every matched record, in provider order
        names: Vec<String>,
    },
}

/// Drives the lookup → create/update/ambiguous sequence
///
/// Stateless across requests: every reconciliation fetches a fresh
/// record snapshot and runs its provider calls strictly in sequence.
pub struct Reconciler {
    client: Box<dyn RecordClient>,
}

impl Reconciler {
    /// Create a reconciler over the given record client
    pub fn new(client: Box<dyn RecordClient>) -> Self {
        Self { client }
    }

    /// Reconcile one request against the provider.
    ///
    /// Errors from any of the provider calls propagate unchanged; the
    /// lookup is read-only, so a failed mutation needs no compensation.
    pub async fn reconcile(&self, request: &ReconciliationRequest) -> Result<ReconcileOutcome> {
        let matches = self.client.list_records(&request.name).await?;
        debug!(name = %request.name, matches = matches.len(), "record lookup complete");

        match matches.as_slice() {
            [record] => {
                info!(
                    name = %record.name,
                    id = %record.id,
                    ipv6 = %request.ipv6,
                    "updating existing record"
                );
                let response = self.client.update_record(record, request.ipv6).await?;
                Ok(ReconcileOutcome::Updated(response))
            }
            [] => {
                info!(name = %request.name, ipv6 = %request.ipv6, "creating record");
                let response = self
                    .client
                    .create_record(&request.name, request.ipv6)
                    .await?;
                Ok(ReconcileOutcome::Created(response))
            }
            records => {
                let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
                warn!(
                    name = %request.name,
                    matches = names.len(),
                    "multiple records match, refusing to guess"
                );
                Ok(ReconcileOutcome::Ambiguous { names })
            }
        }
    }
}
