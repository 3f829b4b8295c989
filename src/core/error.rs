//! Error types for station setup and dispensing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::FuelType;

/// Coarse category of a failed fuel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed request; not counted in the ledger.
    InvalidRequest,
    /// Price ceiling below the current unit price.
    PriceTooHigh,
    /// No pump of the requested type held enough fuel.
    OutOfStock,
}

/// Terminal failure of a fuel request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispenseError {
    /// Unknown fuel type, non-positive amount or non-positive price ceiling.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The customer's ceiling is below the price read for this request.
    #[error("price too high: {fuel_type} costs {current_price} per liter, ceiling was {max_price_per_liter}")]
    PriceTooHigh {
        /// Requested fuel type.
        fuel_type: FuelType,
        /// Unit price in effect when the request was validated.
        current_price: f64,
        /// Customer's ceiling.
        max_price_per_liter: f64,
    },
    /// Every matching pump had less than the requested amount.
    #[error("out of stock: no {fuel_type} pump holds {requested} liters")]
    OutOfStock {
        /// Requested fuel type.
        fuel_type: FuelType,
        /// Requested liters.
        requested: f64,
    },
}

impl DispenseError {
    /// Category used by callers to pick a retry policy.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
            Self::PriceTooHigh { .. } => FailureKind::PriceTooHigh,
            Self::OutOfStock { .. } => FailureKind::OutOfStock,
        }
    }
}

/// Errors produced while setting up or configuring a station.
#[derive(Debug, Error)]
pub enum StationError {
    /// No price has been set for this fuel type.
    #[error("unknown fuel type: {0}")]
    UnknownFuelType(FuelType),
    /// Prices must be finite.
    #[error("invalid price for {fuel_type}: {price}")]
    InvalidPrice {
        /// Fuel type being priced.
        fuel_type: FuelType,
        /// Rejected price.
        price: f64,
    },
    /// Pump capacity must be finite and non-negative.
    #[error("invalid pump capacity: {0}")]
    InvalidCapacity(f64),
    /// Configuration failed validation or could not be loaded.
    #[error("config error: {0}")]
    Config(String),
    /// A fuel request failed.
    #[error(transparent)]
    Dispense(#[from] DispenseError),
}

/// Returned when a string does not name a fuel type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fuel type name `{0}`")]
pub struct ParseFuelTypeError(pub String);

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
