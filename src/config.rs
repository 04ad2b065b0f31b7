use std::str::FromStr;
use std::time::Duration;

/// Storefront core configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ORDER_ID_PREFIX | CC | Prefix of minted order ids |
/// | ORDER_ID_SUFFIX_DIGITS | 3 | Width of the numeric order id suffix |
/// | ORDER_ID_MAX_ATTEMPTS | 1000 | Probes before reporting the id space exhausted |
/// | ACTOR_BUFFER_SIZE | 32 | Mailbox capacity of each store actor |
/// | REQUEST_TIMEOUT_MS | 5000 | Upper bound on waiting for a store |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Upper bound on draining actors at shutdown |
///
/// Unset or unparsable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub order_id_prefix: String,
    pub order_id_suffix_digits: u32,
    pub order_id_max_attempts: u32,
    pub actor_buffer_size: usize,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            order_id_prefix: std::env::var("ORDER_ID_PREFIX")
                .ok()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.order_id_prefix),
            order_id_suffix_digits: env_or("ORDER_ID_SUFFIX_DIGITS", defaults.order_id_suffix_digits),
            order_id_max_attempts: env_or("ORDER_ID_MAX_ATTEMPTS", defaults.order_id_max_attempts),
            actor_buffer_size: env_or("ACTOR_BUFFER_SIZE", defaults.actor_buffer_size),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", defaults.shutdown_timeout_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            order_id_prefix: "CC".to_string(),
            order_id_suffix_digits: 3,
            order_id_max_attempts: 1000,
            actor_buffer_size: 32,
            request_timeout_ms: 5000,
            shutdown_timeout_ms: 10000,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
