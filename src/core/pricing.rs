//! Unit prices per fuel type.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::{FuelType, StationError};

/// One row of the price table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Fuel type.
    pub fuel_type: FuelType,
    /// Price per liter.
    pub price: f64,
}

/// Operator-managed price table, readable from many threads.
#[derive(Debug, Default)]
pub struct PricingTable {
    prices: RwLock<HashMap<FuelType, f64>>,
}

impl PricingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price of `fuel_type` and return the previous one.
    ///
    /// Any finite value is stored; sign checks belong to whoever loads prices.
    pub fn set_price(&self, fuel_type: FuelType, price: f64) -> Result<Option<f64>, StationError> {
        if !price.is_finite() {
            return Err(StationError::InvalidPrice { fuel_type, price });
        }
        let previous = self.prices.write().insert(fuel_type, price);
        tracing::debug!("price of {} set to {} (was {:?})", fuel_type, price, previous);
        Ok(previous)
    }

    /// Current price of `fuel_type`.
    pub fn get_price(&self, fuel_type: FuelType) -> Result<f64, StationError> {
        self.prices
            .read()
            .get(&fuel_type)
            .copied()
            .ok_or(StationError::UnknownFuelType(fuel_type))
    }

    /// Whether a price exists for `fuel_type`.
    pub fn contains(&self, fuel_type: FuelType) -> bool {
        self.prices.read().contains_key(&fuel_type)
    }

    /// All prices, ordered by fuel type.
    pub fn snapshot(&self) -> Vec<PriceEntry> {
        let mut entries: Vec<PriceEntry> = self
            .prices
            .read()
            .iter()
            .map(|(&fuel_type, &price)| PriceEntry { fuel_type, price })
            .collect();
        entries.sort_by_key(|e| e.fuel_type);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fuel_type() {
        let table = PricingTable::new();
        assert!(matches!(
            table.get_price(FuelType::Diesel),
            Err(StationError::UnknownFuelType(FuelType::Diesel))
        ));
    }

    #[test]
    fn test_set_returns_previous() {
        let table = PricingTable::new();
        assert_eq!(table.set_price(FuelType::Super, 2.0).unwrap(), None);
        assert_eq!(table.set_price(FuelType::Super, 2.5).unwrap(), Some(2.0));
        assert_eq!(table.get_price(FuelType::Super).unwrap(), 2.5);
    }

    #[test]
    fn test_rejects_non_finite() {
        let table = PricingTable::new();
        assert!(table.set_price(FuelType::Regular, f64::NAN).is_err());
        assert!(table.set_price(FuelType::Regular, f64::INFINITY).is_err());
        assert!(!table.contains(FuelType::Regular));
        // The table itself does not enforce positivity.
        assert!(table.set_price(FuelType::Regular, -1.0).is_ok());
    }

    #[test]
    fn test_snapshot_sorted() {
        let table = PricingTable::new();
        table.set_price(FuelType::Diesel, 3.0).unwrap();
        table.set_price(FuelType::Regular, 1.0).unwrap();
        let snapshot = table.snapshot();
        assert_eq!(snapshot[0].fuel_type, FuelType::Regular);
        assert_eq!(snapshot[1].fuel_type, FuelType::Diesel);
    }
}
