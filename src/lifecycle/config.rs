//! Runtime configuration, read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `COBRA_DATABASE_URL` | `sqlite://cobra.db` |
//! | `COBRA_DB_MAX_CONNECTIONS` | `4` |
//! | `COBRA_DB_ACQUIRE_TIMEOUT_MS` | `3000` |
//! | `COBRA_ALLOW_NEGATIVE_STOCK` | `false` |
//! | `COBRA_ALLOW_UNKNOWN_PRODUCT` | `false` |
//! | `COBRA_SEED_DEMO` | `true` |
//!
//! Unparsable values fall back to the default with a warning.

use crate::gateway::GatewayConfig;
use crate::model::AdjustmentPolicy;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cobra.db";

/// Everything needed to start a [`StockSystem`](crate::lifecycle::StockSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockConfig {
    pub gateway: GatewayConfig,
    pub policy: AdjustmentPolicy,
    /// Seed a small demo catalog when the products table is empty.
    pub seed_demo: bool,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::new(DEFAULT_DATABASE_URL),
            policy: AdjustmentPolicy::guarded(),
            seed_demo: true,
        }
    }
}

impl StockConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut gateway = GatewayConfig::new(
            lookup("COBRA_DATABASE_URL").unwrap_or(defaults.gateway.database_url),
        );
        gateway.max_connections = parse_or(
            &lookup,
            "COBRA_DB_MAX_CONNECTIONS",
            defaults.gateway.max_connections,
        )
        .max(1);
        gateway.acquire_timeout = Duration::from_millis(parse_or(
            &lookup,
            "COBRA_DB_ACQUIRE_TIMEOUT_MS",
            defaults.gateway.acquire_timeout.as_millis() as u64,
        ));

        let policy = AdjustmentPolicy {
            reject_negative_stock: !parse_or(&lookup, "COBRA_ALLOW_NEGATIVE_STOCK", false),
            reject_unknown_product: !parse_or(&lookup, "COBRA_ALLOW_UNKNOWN_PRODUCT", false),
        };

        Self {
            gateway,
            policy,
            seed_demo: parse_or(&lookup, "COBRA_SEED_DEMO", defaults.seed_demo),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, ?default, "Invalid configuration value; using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = StockConfig::from_lookup(|_| None);
        assert_eq!(config, StockConfig::default());
        assert_eq!(config.gateway.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.policy, AdjustmentPolicy::guarded());
    }

    #[test]
    fn reads_every_variable() {
        let config = StockConfig::from_lookup(lookup_from(&[
            ("COBRA_DATABASE_URL", "sqlite::memory:"),
            ("COBRA_DB_MAX_CONNECTIONS", "8"),
            ("COBRA_DB_ACQUIRE_TIMEOUT_MS", "250"),
            ("COBRA_ALLOW_NEGATIVE_STOCK", "true"),
            ("COBRA_ALLOW_UNKNOWN_PRODUCT", "true"),
            ("COBRA_SEED_DEMO", "false"),
        ]));
        assert_eq!(config.gateway.database_url, "sqlite::memory:");
        assert_eq!(config.gateway.max_connections, 8);
        assert_eq!(config.gateway.acquire_timeout, Duration::from_millis(250));
        assert_eq!(config.policy, AdjustmentPolicy::legacy());
        assert!(!config.seed_demo);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = StockConfig::from_lookup(lookup_from(&[
            ("COBRA_DB_MAX_CONNECTIONS", "lots"),
            ("COBRA_ALLOW_NEGATIVE_STOCK", "yes please"),
        ]));
        assert_eq!(config.gateway.max_connections, 4);
        assert!(config.policy.reject_negative_stock);
    }

    #[test]
    fn zero_connections_is_raised_to_one() {
        let config = StockConfig::from_lookup(lookup_from(&[("COBRA_DB_MAX_CONNECTIONS", "0")]));
        assert_eq!(config.gateway.max_connections, 1);
    }
}
