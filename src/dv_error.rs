//! Typed errors at the one real validation boundary: router construction.
//!
//! Everything else that amounts to a precondition violation (unknown port,
//! duplicate `link_up`, time running backwards) fails fast via `assert!`
//! rather than a `Result` — those indicate a bug in the environment driving
//! the router, not a recoverable runtime condition.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timer_interval must be nonzero (a zero interval makes expiry at 2x it a no-op)")]
    ZeroTimerInterval,
}
