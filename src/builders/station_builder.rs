//! Builders to construct a [`GasStation`] from configuration.

use crate::config::{PriceConfig, PumpConfig, StationConfig};
use crate::core::{AuditSink, FuelType, GasStation, Pump, StationError};

/// Fluent builder for a station.
pub struct StationBuilder {
    config: StationConfig,
    audit: Option<Box<dyn AuditSink>>,
}

impl Default for StationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StationBuilder {
    /// Start with no pumps and no prices.
    pub const fn new() -> Self {
        Self {
            config: StationConfig {
                pumps: Vec::new(),
                prices: Vec::new(),
            },
            audit: None,
        }
    }

    /// Start from an existing configuration.
    pub const fn from_config(config: StationConfig) -> Self {
        Self {
            config,
            audit: None,
        }
    }

    /// Add a pump holding `liters` of `fuel_type`.
    #[must_use]
    pub fn with_pump(mut self, fuel_type: FuelType, liters: f64) -> Self {
        self.config.pumps.push(PumpConfig { fuel_type, liters });
        self
    }

    /// Set the price of `fuel_type`, replacing any earlier entry.
    #[must_use]
    pub fn with_price(mut self, fuel_type: FuelType, price: f64) -> Self {
        self.config.prices.retain(|p| p.fuel_type != fuel_type);
        self.config.prices.push(PriceConfig { fuel_type, price });
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Configuration collected so far.
    pub const fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Validate and build the station.
    pub fn build(self) -> Result<GasStation, StationError> {
        let station = build_station(&self.config)?;
        Ok(match self.audit {
            Some(audit) => station.with_audit(audit),
            None => station,
        })
    }
}

/// Build a station from configuration: prices first, then pumps in order.
pub fn build_station(cfg: &StationConfig) -> Result<GasStation, StationError> {
    cfg.validate().map_err(StationError::Config)?;

    let station = GasStation::new();
    for entry in &cfg.prices {
        station.set_price(entry.fuel_type, entry.price)?;
    }
    for pump in &cfg.pumps {
        station.add_pump(Pump::new(pump.fuel_type, pump.liters)?);
    }
    tracing::info!(
        "station built with {} pumps and {} prices",
        cfg.pumps.len(),
        cfg.prices.len()
    );
    Ok(station)
}
