//! # Configuration
//!
//! [`LedgerConfig`] selects the ledger variant and the policies the order
//! contract applies. It can be built from defaults, from a JSON document, or
//! from `PARTS_LEDGER_*` environment variables layered over the defaults.
//!
//! | Variable | Field | Values |
//! |----------|-------|--------|
//! | `PARTS_LEDGER_VARIANT` | `variant` | `orders`, `products` |
//! | `PARTS_LEDGER_CREATE_POLICY` | `create_policy` | `overwrite`, `reject_if_exists` |
//! | `PARTS_LEDGER_SENTINEL` | `sentinel` | any non-empty string |
//! | `PARTS_LEDGER_INITIAL_CUSTODIAN` | `initial_custodian` | any non-empty string |
//! | `PARTS_LEDGER_CHANNEL_CAPACITY` | `channel_capacity` | integer > 0 |

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const ENV_VARIANT: &str = "PARTS_LEDGER_VARIANT";
pub const ENV_CREATE_POLICY: &str = "PARTS_LEDGER_CREATE_POLICY";
pub const ENV_SENTINEL: &str = "PARTS_LEDGER_SENTINEL";
pub const ENV_INITIAL_CUSTODIAN: &str = "PARTS_LEDGER_INITIAL_CUSTODIAN";
pub const ENV_CHANNEL_CAPACITY: &str = "PARTS_LEDGER_CHANNEL_CAPACITY";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("channel_capacity must be greater than zero")]
    ZeroCapacity,
}

/// Which record layout the ledger keeps.
///
/// - `Orders`: the basic tracker. `ChainOfCustody` doubles as the event log.
/// - `Products`: adds secondary identifiers, a separate `Events` log, and
///   custodian tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Orders,
    Products,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Orders => "orders",
            Variant::Products => "products",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" => Ok(Variant::Orders),
            "products" => Ok(Variant::Products),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_VARIANT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// What `CreateOrder` does when the id is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatePolicy {
    /// Replace the stored record.
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists` and leave the stored record alone.
    RejectIfExists,
}

impl FromStr for CreatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "overwrite" => Ok(CreatePolicy::Overwrite),
            "reject_if_exists" | "reject" => Ok(CreatePolicy::RejectIfExists),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_CREATE_POLICY.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub variant: Variant,
    pub create_policy: CreatePolicy,
    /// Placeholder written into fields that have not been set yet.
    pub sentinel: String,
    /// First custodian of a freshly created products record.
    pub initial_custodian: String,
    /// Capacity of the runtime's request channel.
    pub channel_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Orders,
            create_policy: CreatePolicy::Overwrite,
            sentinel: "NA".to_string(),
            initial_custodian: "SDLC parts".to_string(),
            channel_capacity: 32,
        }
    }
}

impl LedgerConfig {
    /// Parses a JSON document. Missing fields take their default values.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()
    }

    /// Defaults overlaid with `PARTS_LEDGER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays values returned by `lookup` (keyed by the `PARTS_LEDGER_*` names).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_VARIANT) {
            self.variant = value.parse()?;
        }
        if let Some(value) = lookup(ENV_CREATE_POLICY) {
            self.create_policy = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SENTINEL) {
            self.sentinel = value;
        }
        if let Some(value) = lookup(ENV_INITIAL_CUSTODIAN) {
            self.initial_custodian = value;
        }
        if let Some(value) = lookup(ENV_CHANNEL_CAPACITY) {
            self.channel_capacity =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_CHANNEL_CAPACITY.to_string(),
                    value: value.clone(),
                })?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.sentinel.is_empty() {
            return Err(ConfigError::Empty("sentinel"));
        }
        if self.initial_custodian.is_empty() {
            return Err(ConfigError::Empty("initial_custodian"));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(self)
    }
}
