//! Shared-secret check for the update endpoint

/// Compare the supplied password against the configured secret.
///
/// Plain equality. Timing-attack resistance is out of scope for this
/// endpoint; the secret gates a DNS record update, not account access.
pub fn password_matches(supplied: &str, secret: &str) -> bool {
    supplied == secret
}
