//! Layered configuration: built-in defaults, then `shop-rs.toml`, then
//! `SHOP_`-prefixed environment variables (`SHOP_API__BASE_URL=...`).

use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "shop-rs.toml";
const ENV_PREFIX: &str = "SHOP_";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    const BASE_URL: &str = "http://localhost:3001/api";
    const TIMEOUT_SECS: u64 = 15;

    fn default() -> Self {
        ApiConfig {
            base_url: Self::BASE_URL.to_string(),
            timeout_secs: Self::TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn ensure_valid(&mut self) {
        if self.timeout_secs == 0 {
            eprintln!(
                "Config error: api timeout of 0s is invalid - using default of {}s",
                Self::TIMEOUT_SECS
            );
            self.timeout_secs = Self::TIMEOUT_SECS;
        }
        self.base_url = self.base_url.trim().to_string();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Jpy,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub sibling_count: u32,
    pub cell_width_px: u32,
    currency: String,
}

impl DisplayConfig {
    const CURRENCIES: [&str; 2] = ["usd", "jpy"];
    const CURRENCY_USD: &str = "usd";
    const CURRENCY_JPY: &str = "jpy";
    const CELL_WIDTH_PX: u32 = 8;
    const MAX_SIBLING_COUNT: u32 = 5;

    fn default() -> Self {
        DisplayConfig {
            sibling_count: crate::model::DEFAULT_SIBLING_COUNT,
            cell_width_px: Self::CELL_WIDTH_PX,
            currency: Self::CURRENCY_USD.to_string(),
        }
    }

    pub fn currency(&self) -> Currency {
        match self.currency.as_str() {
            Self::CURRENCY_JPY => Currency::Jpy,
            _ => Currency::Usd,
        }
    }

    fn ensure_valid(&mut self) {
        let original = self.currency.clone();
        self.currency = self.currency.trim().to_ascii_lowercase();
        if !Self::CURRENCIES.contains(&self.currency.as_str()) {
            eprintln!(
                "Config error: currency '{}' is invalid - using default of '{}'",
                original,
                Self::CURRENCY_USD
            );
            self.currency = Self::CURRENCY_USD.to_string();
        }

        if self.cell_width_px == 0 {
            eprintln!(
                "Config error: cell width of 0px is invalid - using default of {}px",
                Self::CELL_WIDTH_PX
            );
            self.cell_width_px = Self::CELL_WIDTH_PX;
        }

        // The page strip has to fit a terminal row
        if self.sibling_count > Self::MAX_SIBLING_COUNT {
            eprintln!(
                "Config error: sibling count {} is too large - using {}",
                self.sibling_count,
                Self::MAX_SIBLING_COUNT
            );
            self.sibling_count = Self::MAX_SIBLING_COUNT;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CartConfig {
    pub path: String,
}

impl CartConfig {
    fn default() -> Self {
        CartConfig {
            path: ".cache/cart.json".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShopConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub cart: CartConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
            cart: CartConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load defaults merged with the TOML file (if present) and the environment.
    /// Any extraction failure falls back to the defaults.
    pub fn load(config_path: &Path) -> Self {
        let default_config = ShopConfig::default();

        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: ShopConfig = figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load configuration from {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        });

        config.ensure_valid();
        config
    }

    fn ensure_valid(&mut self) {
        self.api.ensure_valid();
        self.display.ensure_valid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = ShopConfig::load(Path::new(CONFIG_FILE));
            assert_eq!(config, ShopConfig::default());
            assert_eq!(config.display.currency(), Currency::Usd);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [api]
                base_url = "https://shop.example.test/api"

                [display]
                currency = "JPY"
                sibling_count = 2
                "#,
            )?;
            jail.set_env("SHOP_API__TIMEOUT_SECS", "3");

            let config = ShopConfig::load(Path::new(CONFIG_FILE));
            assert_eq!(config.api.base_url, "https://shop.example.test/api");
            assert_eq!(config.api.timeout(), Duration::from_secs(3));
            assert_eq!(config.display.currency(), Currency::Jpy);
            assert_eq!(config.display.sibling_count, 2);
            assert_eq!(config.cart.path, ".cache/cart.json");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_repaired() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [api]
                timeout_secs = 0

                [display]
                currency = "eur"
                cell_width_px = 0
                sibling_count = 40
                "#,
            )?;

            let config = ShopConfig::load(Path::new(CONFIG_FILE));
            assert_eq!(config.api.timeout_secs, 15);
            assert_eq!(config.display.currency(), Currency::Usd);
            assert_eq!(config.display.cell_width_px, 8);
            assert_eq!(config.display.sibling_count, 5);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[api\nbase_url = ")?;
            let config = ShopConfig::load(Path::new(CONFIG_FILE));
            assert_eq!(config, ShopConfig::default());
            Ok(())
        });
    }
}
