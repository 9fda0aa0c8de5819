//! Runtime settings, read from the environment (and a `.env` file when `main` loads one).
//!
//! | Variable | Default |
//! |---|---|
//! | `ACTOR_BUFFER_SIZE` | 32 |
//! | `DEFAULT_PAYMENT_METHOD_ID` | 5 (cash) |
//! | `LOG_FILTER` | `info`, ignored when `RUST_LOG` is set |
use crate::model::PaymentMethodId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Mailbox size of every resource actor.
    pub actor_buffer: usize,
    pub default_payment_method: PaymentMethodId,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            default_payment_method: PaymentMethodId::CASH,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let actor_buffer = std::env::var("ACTOR_BUFFER_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.actor_buffer);
        let default_payment_method = std::env::var("DEFAULT_PAYMENT_METHOD_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(PaymentMethodId)
            .unwrap_or(defaults.default_payment_method);
        let log_filter = std::env::var("LOG_FILTER").unwrap_or(defaults.log_filter);

        Self {
            actor_buffer,
            default_payment_method,
            log_filter,
        }
    }
}
