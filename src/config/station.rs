//! Station configuration structures.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, FuelType};

/// Environment variable naming a JSON station config file.
pub const CONFIG_ENV_VAR: &str = "GAS_STATION_CONFIG";

/// One pump to install.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpConfig {
    /// Fuel type held by the pump.
    pub fuel_type: FuelType,
    /// Initial stock in liters.
    pub liters: f64,
}

/// Unit price of one fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// Fuel type.
    pub fuel_type: FuelType,
    /// Price per liter.
    pub price: f64,
}

/// Root station configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Pumps in registration order.
    pub pumps: Vec<PumpConfig>,
    /// Initial price table.
    pub prices: Vec<PriceConfig>,
}

impl Default for StationConfig {
    /// Two pumps per fuel type: regular 1000 L at 1.00, super 2000 L at 2.00,
    /// diesel 3000 L at 3.00.
    fn default() -> Self {
        let stock = [
            (FuelType::Regular, 1000.0, 1.0),
            (FuelType::Super, 2000.0, 2.0),
            (FuelType::Diesel, 3000.0, 3.0),
        ];
        Self {
            pumps: stock
                .iter()
                .flat_map(|&(fuel_type, liters, _)| [PumpConfig { fuel_type, liters }; 2])
                .collect(),
            prices: stock
                .iter()
                .map(|&(fuel_type, _, price)| PriceConfig { fuel_type, price })
                .collect(),
        }
    }
}

impl PumpConfig {
    /// Validate pump values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.liters.is_finite() || self.liters < 0.0 {
            return Err(format!("liters must be finite and non-negative, got {}", self.liters));
        }
        Ok(())
    }
}

impl StationConfig {
    /// Validate pumps and prices and ensure every pump has a price.
    pub fn validate(&self) -> Result<(), String> {
        if self.pumps.is_empty() {
            return Err("at least one pump must be defined".into());
        }
        for (index, pump) in self.pumps.iter().enumerate() {
            pump.validate()
                .map_err(|e| format!("pump {index} ({}) invalid: {e}", pump.fuel_type))?;
        }

        let mut priced = HashSet::new();
        for entry in &self.prices {
            if !entry.price.is_finite() || entry.price <= 0.0 {
                return Err(format!(
                    "price of {} must be finite and positive, got {}",
                    entry.fuel_type, entry.price
                ));
            }
            if !priced.insert(entry.fuel_type) {
                return Err(format!("duplicate price for {}", entry.fuel_type));
            }
        }

        if let Some(pump) = self.pumps.iter().find(|p| !priced.contains(&p.fuel_type)) {
            return Err(format!("no price defined for {} pump", pump.fuel_type));
        }
        Ok(())
    }

    /// Parse station configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading station config {}", path.display()))?;
        Self::from_json_str(&input)
            .map_err(|e| anyhow::anyhow!("station config {}: {e}", path.display()))
    }

    /// Load from the file named by `GAS_STATION_CONFIG`, after reading `.env`
    /// if present. Falls back to [`StationConfig::default`] when unset.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()),
            _ => {
                tracing::debug!("{} not set, using default station", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = StationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.pumps.len(), 6);
        assert_eq!(cfg.prices.len(), 3);
        assert_eq!(cfg.pumps[1].fuel_type, FuelType::Regular);
        assert_eq!(cfg.pumps[2].fuel_type, FuelType::Super);
    }

    #[test]
    fn test_unpriced_pump_rejected() {
        let mut cfg = StationConfig::default();
        cfg.prices.retain(|p| p.fuel_type != FuelType::Diesel);
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("diesel"));
    }
}
