use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::types::ServiceCode;

/// Configuration for a banklink integration using the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Service codes this integration accepts. Defaults to every known code.
    pub enabled_services: Vec<ServiceCode>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl RegistryConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.enabled_services.is_empty() {
            return Err(RegistryError::InvalidConfig(
                "enabled_services must list at least one service code".into(),
            ));
        }
        Ok(())
    }

    /// Whether messages with this code are accepted.
    pub fn is_enabled(&self, code: impl AsRef<str>) -> bool {
        ServiceCode::parse(code.as_ref())
            .map(|service| self.enabled_services.contains(&service))
            .unwrap_or(false)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled_services: ServiceCode::all().to_vec(),
            log_level: "info".into(),
        }
    }
}
