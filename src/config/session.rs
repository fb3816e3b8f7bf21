//! Session lifecycle configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session lifecycle configuration.
///
/// The upstream design leaves sessions alive forever; the idle TTL plus
/// the periodic sweep bound memory in production.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds a session may stay idle before eviction
    #[serde(default = "default_ttl")]
    pub ttl_secs: i64,

    /// Seconds between eviction sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs <= 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> i64 {
    3600
}

fn default_sweep_interval() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_ttl_is_invalid() {
        let config = SessionConfig {
            ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionTtl)
        ));
    }
}
