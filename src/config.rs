//! Runtime configuration.
//!
//! Defaults match the deployed seatbelt rig. Each field can be overridden
//! through a `SEATBELT_*` environment variable.

use std::str::FromStr;
use std::time::Duration;

use crate::controller::BEST_EFFORT_REMOTE_SYNC;

/// Base URL of the seatbelt service.
pub const DEFAULT_BASE_URL: &str = "http://91.134.196.77:8101/";
/// Identifier of this device on the seatbelt service.
pub const DEFAULT_DEVICE_ID: &str = "5a180c10857aba0001b937f4";
/// BCM pin of the belt switch.
pub const DEFAULT_BUTTON_PIN: u8 = 5;
/// BCM pin of the indicator LED.
pub const DEFAULT_LED_PIN: u8 = 6;
/// Switch debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Configuration for the seatbelt client.
///
/// Use the builder methods to customise it.
///
/// # Example
///
/// ```
/// use seatbelt::config::BeltConfig;
///
/// let config = BeltConfig::default()
///     .with_base_url("http://localhost:8101")
///     .with_device_id("bench-rig");
/// assert_eq!(config.base_url, "http://localhost:8101/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BeltConfig {
    /// Service base URL, always ending in `/`
    pub base_url: String,
    /// Device identifier sent as the `id` query parameter
    pub device_id: String,
    /// Input pin of the belt switch
    pub button_pin: u8,
    /// Output pin of the indicator LED
    pub led_pin: u8,
    /// Minimum time between accepted edges
    pub debounce: Duration,
    /// Push edge updates in a detached task instead of awaiting them
    pub best_effort_remote_sync: bool,
    /// Append each request URL to the status transcript
    pub echo_requests: bool,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
            button_pin: DEFAULT_BUTTON_PIN,
            led_pin: DEFAULT_LED_PIN,
            debounce: DEFAULT_DEBOUNCE,
            best_effort_remote_sync: BEST_EFFORT_REMOTE_SYNC,
            echo_requests: true,
            request_timeout: None,
        }
    }
}

impl BeltConfig {
    /// Set the service base URL. A trailing `/` is added if missing.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_device_id(mut self, id: impl Into<String>) -> Self {
        self.device_id = id.into();
        self
    }

    pub fn with_button_pin(mut self, pin: u8) -> Self {
        self.button_pin = pin;
        self
    }

    pub fn with_led_pin(mut self, pin: u8) -> Self {
        self.led_pin = pin;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_best_effort_remote_sync(mut self, enabled: bool) -> Self {
        self.best_effort_remote_sync = enabled;
        self
    }

    pub fn with_echo_requests(mut self, enabled: bool) -> Self {
        self.echo_requests = enabled;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overridden by `SEATBELT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SEATBELT_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(id) = lookup("SEATBELT_DEVICE_ID") {
            config = config.with_device_id(id);
        }
        if let Some(pin) = parse_var(&lookup, "SEATBELT_BUTTON_PIN") {
            config.button_pin = pin;
        }
        if let Some(pin) = parse_var(&lookup, "SEATBELT_LED_PIN") {
            config.led_pin = pin;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SEATBELT_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(echo) = parse_var(&lookup, "SEATBELT_ECHO_REQUESTS") {
            config.echo_requests = echo;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SEATBELT_TIMEOUT_SECS") {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}
