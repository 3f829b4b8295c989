//! Station configuration: pumps, prices, and where to load them from.

pub mod station;

pub use station::{CONFIG_ENV_VAR, PriceConfig, PumpConfig, StationConfig};
