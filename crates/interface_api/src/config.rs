//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use core_kernel::CoreError;
use domain_booking::SettlementRates;
use infra_db::DatabaseConfig;

/// Where bookings are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL via `infra_db`
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// API configuration
///
/// Every field can be set through a `LEDGER_`-prefixed environment variable,
/// e.g. `LEDGER_PORT=9000` or `LEDGER_STORAGE=memory`. Unset fields keep
/// their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Storage backend
    pub storage: StorageBackend,
    /// Maximum pool connections
    pub db_max_connections: u32,
    /// Minimum pool connections
    pub db_min_connections: u32,
    /// Pool acquire timeout in seconds
    pub db_acquire_timeout_secs: u64,
    /// GST rate applied to the platform margin
    pub gst_rate: Decimal,
    /// Insurance rate applied to host payout plus margin
    pub insurance_rate: Decimal,
    /// Flat delivery surcharge
    pub delivery_charge: Decimal,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let rates = SettlementRates::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/ledger".to_string(),
            log_level: "info".to_string(),
            storage: StorageBackend::Postgres,
            db_max_connections: 10,
            db_min_connections: 2,
            db_acquire_timeout_secs: 30,
            gst_rate: rates.gst_rate,
            insurance_rate: rates.insurance_rate,
            delivery_charge: rates.delivery_charge,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?
            .try_deserialize()
    }

    /// Rejects rates outside `[0, 1]` and negative surcharges
    pub fn validate(&self) -> Result<(), CoreError> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if !unit.contains(&self.gst_rate) {
            return Err(CoreError::configuration(format!(
                "gst_rate must be between 0 and 1, got {}",
                self.gst_rate
            )));
        }
        if !unit.contains(&self.insurance_rate) {
            return Err(CoreError::configuration(format!(
                "insurance_rate must be between 0 and 1, got {}",
                self.insurance_rate
            )));
        }
        if self.delivery_charge.is_sign_negative() {
            return Err(CoreError::configuration(format!(
                "delivery_charge must not be negative, got {}",
                self.delivery_charge
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn settlement_rates(&self) -> SettlementRates {
        SettlementRates {
            gst_rate: self.gst_rate,
            insurance_rate: self.insurance_rate,
            delivery_charge: self.delivery_charge,
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }
}
