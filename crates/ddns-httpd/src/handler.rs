//! The update endpoint handler
//!
//! Response contract:
//!
//! | condition            | status            | body                          |
//! |----------------------|-------------------|-------------------------------|
//! | missing `ipv6`       | 400               | usage text                    |
//! | unparseable `ipv6`   | 400               | short diagnostic              |
//! | password mismatch    | 401               | `Invalid password`            |
//! | one match / no match | provider's status | provider's raw JSON           |
//! | more than one match  | 200               | `More than one record, ...`   |
//! | provider failure     | 502               | diagnostic with the status    |

use std::net::Ipv6Addr;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use ddns_core::reconcile::ReconcileOutcome;
use ddns_core::traits::ProviderResponse;
use ddns_core::{Error, ReconciliationRequest, auth};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;

/// Raw query parameters of the update endpoint
#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub ipv6: Option<String>,
    pub name: Option<String>,
    pub pwd: Option<String>,
}

const USAGE: &str = concat!(
    "Please provide an IPv6 address.\n\n",
    "Example:\n",
    "curl \"http://<host>/?ipv6=fe80::2265:9293:b395:59b7&name=example&pwd=1234\"\n",
);

/// Handle one update request
pub async fn update(State(state): State<AppState>, Query(query): Query<UpdateQuery>) -> Response {
    let Some(raw_ipv6) = query.ipv6 else {
        return (StatusCode::BAD_REQUEST, USAGE).into_response();
    };

    let ipv6: Ipv6Addr = match raw_ipv6.parse() {
        Ok(ipv6) => ipv6,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("invalid 'ipv6' parameter: {raw_ipv6}"),
            )
                .into_response();
        }
    };

    let request = ReconciliationRequest::from_query(ipv6, query.name, query.pwd);

    // Reject before any provider traffic.
    if !auth::password_matches(&request.password, &state.config.password) {
        return (StatusCode::UNAUTHORIZED, "Invalid password").into_response();
    }

    info!(name = %request.name, ipv6 = %request.ipv6, "handling update");

    match state.reconciler.reconcile(&request).await {
        Ok(ReconcileOutcome::Updated(reply) | ReconcileOutcome::Created(reply)) => {
            provider_reply(reply)
        }
        Ok(ReconcileOutcome::Ambiguous { names }) => (
            StatusCode::OK,
            format!("More than one record, {}", names.join(", ")),
        )
            .into_response(),
        Err(err) => failure_response(&err),
    }
}

/// Proxy the provider's create/update reply back verbatim
fn provider_reply(reply: ProviderResponse) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Map a reconciliation fault to a structured 5xx.
///
/// Provider failures keep the provider's original status visible in the
/// body so callers can tell them apart from faults in this service.
fn failure_response(err: &Error) -> Response {
    error!(error = %err, "reconciliation failed");
    match err {
        Error::Provider { status, .. } => (
            StatusCode::BAD_GATEWAY,
            format!("DNS provider request failed with status {status}"),
        )
            .into_response(),
        Error::Parse(_) => (
            StatusCode::BAD_GATEWAY,
            "DNS provider returned an unexpected response".to_string(),
        )
            .into_response(),
        Error::Http(_) => (
            StatusCode::BAD_GATEWAY,
            "DNS provider is unreachable".to_string(),
        )
            .into_response(),
        Error::Config(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal configuration error".to_string(),
        )
            .into_response(),
    }
}
