//! Ordering configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MAKCIK_DELIVERY_FEE` - Flat delivery fee in whole units (default: 50)
//! - `MAKCIK_HANDOFF_DELAY_MS` - Delay before the order form is shown after
//!   registration (default: 1500)
//! - `MAKCIK_NOTICE_DURATION_MS` - How long the "added to order" notice stays
//!   up (default: 3000)
//! - `MAKCIK_MAX_QUANTITY` - Largest quantity accepted on one line (default: 99)
//! - `MAKCIK_CURRENCY_SYMBOL` - Symbol prefixed to amounts (default: ₱)

use std::str::FromStr;
use std::time::Duration;

use makcik_core::{Amount, CURRENCY_SYMBOL, DEFAULT_DELIVERY_FEE, DEFAULT_MAX_QUANTITY};
use thiserror::Error;

const DEFAULT_HANDOFF_DELAY_MS: u64 = 1500;
const DEFAULT_NOTICE_DURATION_MS: u64 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ordering session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingConfig {
    /// Flat fee added to delivery orders
    pub delivery_fee: Amount,
    /// Delay between a successful registration and the order form appearing
    pub handoff_delay: Duration,
    /// Lifetime of the "added to order" notice
    pub notice_duration: Duration,
    /// Upper bound on a line's quantity
    pub max_quantity: u32,
    /// Currency symbol for rendered amounts
    pub currency_symbol: String,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            delivery_fee: DEFAULT_DELIVERY_FEE,
            handoff_delay: Duration::from_millis(DEFAULT_HANDOFF_DELAY_MS),
            notice_duration: Duration::from_millis(DEFAULT_NOTICE_DURATION_MS),
            max_quantity: DEFAULT_MAX_QUANTITY,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl OrderingConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// `MAKCIK_MAX_QUANTITY` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`OrderingConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let delivery_fee = parse_or("MAKCIK_DELIVERY_FEE", &lookup)?
            .map_or(defaults.delivery_fee, Amount::new);
        let handoff_delay = parse_or("MAKCIK_HANDOFF_DELAY_MS", &lookup)?
            .map_or(defaults.handoff_delay, Duration::from_millis);
        let notice_duration = parse_or("MAKCIK_NOTICE_DURATION_MS", &lookup)?
            .map_or(defaults.notice_duration, Duration::from_millis);
        let max_quantity: u32 =
            parse_or("MAKCIK_MAX_QUANTITY", &lookup)?.unwrap_or(defaults.max_quantity);
        if max_quantity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MAKCIK_MAX_QUANTITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let currency_symbol = lookup("MAKCIK_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol);

        Ok(Self {
            delivery_fee,
            handoff_delay,
            notice_duration,
            max_quantity,
            currency_symbol,
        })
    }

    /// Format an amount with the configured currency symbol.
    #[must_use]
    pub fn format_amount(&self, amount: Amount) -> String {
        amount.display_with(&self.currency_symbol)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, failing only when it is set but malformed.
fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
