//! Router configuration: the two knobs fixed at construction time,
//! `poison_mode` and `timer_interval`.

use crate::dv_error::ConfigError;
use std::time::Duration;

/// Immutable-after-construction router configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DVRouterConfig {
    pub poison_mode: bool,
    pub timer_interval: Duration,
}

impl DVRouterConfig {
    pub fn new(poison_mode: bool, timer_interval: Duration) -> Self {
        DVRouterConfig {
            poison_mode,
            timer_interval,
        }
    }

    /// Validates the configuration, catching the one constructor-time
    /// mistake that isn't a pure precondition bug: a zero timer interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer_interval.is_zero() {
            return Err(ConfigError::ZeroTimerInterval);
        }
        Ok(())
    }
}

impl Default for DVRouterConfig {
    fn default() -> Self {
        DVRouterConfig {
            poison_mode: false,
            timer_interval: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        let cfg = DVRouterConfig::new(false, Duration::from_secs(0));
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimerInterval));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(DVRouterConfig::default().validate().is_ok());
    }
}
