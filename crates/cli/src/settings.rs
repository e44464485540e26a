//! Handles settings for the command layer. Configuration is written in
//! `settings.toml`; every key has a default so the file is optional.

use config::{Config, Environment, File};
use ledger::EconomyConfig;
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    pub path: String,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: "data/balances.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Currency {
    pub name: String,
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            name: "Stars".to_string(),
            symbol: "⭐".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Formatting {
    pub use_separators: bool,
    pub decimal_places: usize,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            use_separators: true,
            decimal_places: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Baltop {
    pub top_count: usize,
    /// Seconds a ranking snapshot would be reused. Kept so existing settings
    /// files parse; the ledger recomputes rankings on every call.
    pub cache_duration: u64,
}

impl Default for Baltop {
    fn default() -> Self {
        Self {
            top_count: 10,
            cache_duration: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Security {
    pub starting_balance: f64,
    pub max_balance: f64,
    pub max_transaction: f64,
    pub min_transaction: f64,
    pub log_transactions: bool,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            starting_balance: 0.0,
            max_balance: 1_000_000_000.0,
            max_transaction: 100_000_000.0,
            min_transaction: 0.01,
            log_transactions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prefix: String,
    pub app: App,
    pub store: Store,
    pub currency: Currency,
    pub formatting: Formatting,
    pub baltop: Baltop,
    pub security: Security,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: "&8[&6Stelline&8]&r".to_string(),
            app: App::default(),
            store: Store::default(),
            currency: Currency::default(),
            formatting: Formatting::default(),
            baltop: Baltop::default(),
            security: Security::default(),
        }
    }
}

impl Settings {
    pub fn new(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("STELLINE"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The knobs the ledger consults.
    pub fn economy(&self) -> EconomyConfig {
        EconomyConfig {
            starting_balance: self.security.starting_balance,
            max_balance: self.security.max_balance,
            min_transaction: self.security.min_transaction,
            max_transaction: self.security.max_transaction,
            decimal_places: self.formatting.decimal_places,
            use_separators: self.formatting.use_separators,
            log_transactions: self.security.log_transactions,
            top_count: self.baltop.top_count,
            cache_duration: self.baltop.cache_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::new("does/not/exist/settings").unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.security.max_balance, 1_000_000_000.0);
        assert_eq!(settings.baltop.top_count, 10);
    }

    #[test]
    fn economy_mapping_carries_every_knob() {
        let mut settings = Settings::default();
        settings.security.max_balance = 500.0;
        settings.formatting.decimal_places = 1;

        let economy = settings.economy();

        assert_eq!(economy.max_balance, 500.0);
        assert_eq!(economy.decimal_places, 1);
        assert_eq!(economy.cache_duration, 300);
    }
}
