//! API-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{
    DispenseError, FailureKind, FuelType, GasStation, LedgerSnapshot, PriceEntry, PumpSnapshot,
};

/// Fuel purchase payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelRequest {
    /// Requested fuel type. Missing means the request is invalid.
    pub fuel_type: Option<FuelType>,
    /// Requested liters.
    pub liters: f64,
    /// Highest acceptable price per liter.
    pub max_price_per_liter: f64,
}

/// Outcome category of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Fuel dispensed.
    Fulfilled,
    /// Request failed.
    Failed(FailureKind),
}

/// Purchase response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelResponse {
    /// Outcome.
    pub status: PurchaseStatus,
    /// Amount paid, if fulfilled.
    pub total_paid: Option<f64>,
    /// Pump that served the request, if fulfilled.
    pub pump_index: Option<usize>,
    /// Failure message.
    pub reason: Option<String>,
}

/// Station state for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    /// Pump stock.
    pub pumps: Vec<PumpSnapshot>,
    /// Price table.
    pub prices: Vec<PriceEntry>,
    /// Ledger counters.
    pub ledger: LedgerSnapshot,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Registered pumps.
    pub pumps: usize,
}

impl From<DispenseError> for FuelResponse {
    fn from(err: DispenseError) -> Self {
        Self {
            status: PurchaseStatus::Failed(err.kind()),
            total_paid: None,
            pump_index: None,
            reason: Some(err.to_string()),
        }
    }
}

/// Serve a purchase request against `station`.
pub fn handle_request(station: &GasStation, req: &FuelRequest) -> FuelResponse {
    let Some(fuel_type) = req.fuel_type else {
        return DispenseError::InvalidRequest("fuel type is required".into()).into();
    };
    match station.dispense(fuel_type, req.liters, req.max_price_per_liter) {
        Ok(outcome) => FuelResponse {
            status: PurchaseStatus::Fulfilled,
            total_paid: Some(outcome.total_paid),
            pump_index: Some(outcome.pump_index),
            reason: None,
        },
        Err(err) => err.into(),
    }
}

/// Build a report of pumps, prices and ledger.
pub fn station_report(station: &GasStation) -> StationReport {
    StationReport {
        pumps: station.pump_snapshot(),
        prices: station.prices(),
        ledger: station.ledger_snapshot(),
    }
}

/// Return a health payload.
pub fn health(station: &GasStation) -> Health {
    Health {
        ok: true,
        pumps: station.list_pumps().len(),
    }
}
