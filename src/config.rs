//! Laboratory configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Tunables for a laboratory session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Per-subscriber change stream buffer. Events beyond it are dropped.
    pub notification_capacity: usize,
    /// Also log each link-restore diagnostic at `info`.
    pub log_restore_issues: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            notification_capacity: 256,
            log_restore_issues: true,
        }
    }
}

impl LabConfig {
    /// Validate the configuration.
    ///
    /// This must be called before constructing a `Session`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.notification_capacity == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "notification_capacity must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_is_valid() {
        LabConfig::default().validate().unwrap();
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let c = LabConfig {
            notification_capacity: 0,
            ..LabConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_config_fills_missing_fields_from_default() {
        let c: LabConfig = serde_json::from_str(r#"{"log_restore_issues": false}"#).unwrap();
        assert_eq!(c.notification_capacity, 256);
        assert!(!c.log_restore_issues);
    }
}
