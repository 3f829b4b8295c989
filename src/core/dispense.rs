//! Pump selection and consumption.
//!
//! A request is validated, checked against the current price, and then served
//! by the first pump of its fuel type that still holds enough fuel. The stock
//! check is repeated under that pump's reservation, and the debit plus the
//! ledger entry happen before the reservation is released. Scanning itself is
//! not exclusive, so requests on different pumps proceed in parallel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{DispenseError, FuelType, PricingTable, PumpRegistry, SalesLedger};

/// Result of a fulfilled request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleOutcome {
    /// Registration index of the pump that served the request.
    pub pump_index: usize,
    /// Fuel type sold.
    pub fuel_type: FuelType,
    /// Liters dispensed.
    pub liters: f64,
    /// Unit price charged.
    pub unit_price: f64,
    /// `liters * unit_price`.
    pub total_paid: f64,
}

/// Runs fuel requests against shared pumps, prices and ledger.
///
/// Holds only handles to the shared structures; any number of coordinators may
/// serve the same station.
#[derive(Debug, Clone)]
pub struct DispenseCoordinator {
    pumps: Arc<PumpRegistry>,
    prices: Arc<PricingTable>,
    ledger: Arc<SalesLedger>,
}

impl DispenseCoordinator {
    /// Create a coordinator over the given shared structures.
    pub const fn new(
        pumps: Arc<PumpRegistry>,
        prices: Arc<PricingTable>,
        ledger: Arc<SalesLedger>,
    ) -> Self {
        Self {
            pumps,
            prices,
            ledger,
        }
    }

    /// Buy `liters` of `fuel_type` at no more than `max_price_per_liter`.
    /// Returns the amount paid.
    pub fn request_fuel(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
    ) -> Result<f64, DispenseError> {
        self.dispense(fuel_type, liters, max_price_per_liter)
            .map(|outcome| outcome.total_paid)
    }

    /// Same as [`request_fuel`](Self::request_fuel) but returns the full outcome.
    pub fn dispense(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
    ) -> Result<SaleOutcome, DispenseError> {
        let unit_price = self.validate(fuel_type, liters, max_price_per_liter)?;

        if max_price_per_liter < unit_price {
            self.ledger.record_too_expensive();
            tracing::warn!(
                "{} request cancelled: price {} above ceiling {}",
                fuel_type,
                unit_price,
                max_price_per_liter
            );
            return Err(DispenseError::PriceTooHigh {
                fuel_type,
                current_price: unit_price,
                max_price_per_liter,
            });
        }

        tracing::debug!("scanning pumps for {} liters of {}", liters, fuel_type);

        for (pump_index, pump) in self.pumps.all().iter().enumerate() {
            if pump.fuel_type() != fuel_type {
                continue;
            }

            // Ledger entry is written before the reservation drops.
            let left = {
                let mut reservation = pump.reserve();
                reservation
                    .debit(liters)
                    .inspect(|_| self.ledger.record_sale(liters * unit_price))
            };

            let Some(left) = left else {
                tracing::debug!("pump {} cannot supply {} liters", pump_index, liters);
                continue;
            };

            let outcome = SaleOutcome {
                pump_index,
                fuel_type,
                liters,
                unit_price,
                total_paid: liters * unit_price,
            };
            tracing::info!(
                "pump {} sold {} liters of {} for {} ({} left)",
                pump_index,
                liters,
                fuel_type,
                outcome.total_paid,
                left
            );
            return Ok(outcome);
        }

        self.ledger.record_no_stock();
        tracing::warn!("{} request cancelled: no pump holds {} liters", fuel_type, liters);
        Err(DispenseError::OutOfStock {
            fuel_type,
            requested: liters,
        })
    }

    /// Input checks, in order. Returns the price read for this request.
    fn validate(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
    ) -> Result<f64, DispenseError> {
        let unit_price = self.prices.get_price(fuel_type).map_err(|_| {
            DispenseError::InvalidRequest(format!("no price set for {fuel_type}"))
        })?;
        if !liters.is_finite() || liters <= 0.0 {
            return Err(DispenseError::InvalidRequest(format!(
                "amount must be positive, got {liters}"
            )));
        }
        if max_price_per_liter.is_nan() || max_price_per_liter <= 0.0 {
            return Err(DispenseError::InvalidRequest(format!(
                "price ceiling must be positive, got {max_price_per_liter}"
            )));
        }
        Ok(unit_price)
    }
}
