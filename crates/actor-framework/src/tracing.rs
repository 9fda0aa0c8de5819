//! # Observability & Tracing
//!
//! Structured logging for actor systems built on this crate.
//!
//! The actor loop logs with an `entity_type` field and the entity `id`, so the subscriber
//! hides module paths (`with_target(false)`) and uses the compact formatter, which renders
//! spans inline (`checkout:create_order: Created id=order_3`).
//!
//! ```bash
//! RUST_LOG=info cargo run                  # lifecycle events
//! RUST_LOG=debug cargo run                 # request payloads
//! RUST_LOG=actor_framework=warn cargo run  # failures only from the runtime
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"`) applies. Calling it
/// again after a subscriber is installed is a no-op, so tests may call it freely.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type field replaces the module path
        .compact()
        .try_init();
}
