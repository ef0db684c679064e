//! Configuration types for the DDNS update endpoint
//!
//! Configuration is built once at startup and passed explicitly into
//! every operation; nothing in this crate reads the environment.

use serde::{Deserialize, Serialize};

use crate::request::PASSWORD_ABSENT;

/// Main endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// Shared secret required in the `pwd` query parameter
    pub password: String,
}

impl DdnsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;

        if self.password.is_empty() {
            return Err(crate::Error::config("DDNS password cannot be empty"));
        }

        // An absent `pwd` parameter is substituted with this sentinel
        // before comparison, so the secret may never equal it.
        if self.password == PASSWORD_ABSENT {
            return Err(crate::Error::config(format!(
                "DDNS password may not be the reserved value {PASSWORD_ABSENT:?}"
            )));
        }

        Ok(())
    }
}

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Cloudflare provider
    Cloudflare {
        /// Zone the managed records live in
        zone_id: String,
        /// Account email, sent as the `X-Auth-Email` header
        api_email: String,
        /// API key, sent as the `X-Auth-Key` header
        api_key: String,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudflare {
                zone_id,
                api_email,
                api_key,
            } => {
                if zone_id.is_empty() {
                    return Err(crate::Error::config("Cloudflare zone ID cannot be empty"));
                }
                if api_email.is_empty() {
                    return Err(crate::Error::config(
                        "Cloudflare account email cannot be empty",
                    ));
                }
                if api_key.is_empty() {
                    return Err(crate::Error::config("Cloudflare API key cannot be empty"));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cloudflare { .. } => "cloudflare",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DdnsConfig {
        DdnsConfig {
            provider: ProviderConfig::Cloudflare {
                zone_id: "023e105f4ecef8ad9ca31a8372d0c353".to_string(),
                api_email: "ops@example.com".to_string(),
                api_key: "test-api-key".to_string(),
            },
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn empty_password_rejected() {
        let mut config = valid_config();
        config.password = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn sentinel_password_rejected() {
        let mut config = valid_config();
        config.password = PASSWORD_ABSENT.to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_provider_fields_rejected() {
        let mut config = valid_config();
        config.provider = ProviderConfig::Cloudflare {
            zone_id: String::new(),
            api_email: "ops@example.com".to_string(),
            api_key: "test-api-key".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn provider_type_name() {
        assert_eq!(valid_config().provider.type_name(), "cloudflare");
    }
}
