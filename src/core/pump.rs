//! Pumps and the registry that holds them.
//!
//! A [`Pump`] keeps its remaining stock behind its own `parking_lot::Mutex`, so
//! reserving one pump never blocks requests served by another. The
//! [`PumpRegistry`] hands out snapshots of its pump list; a pump added while a
//! scan is running is simply not seen by that scan.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};
use serde::{Deserialize, Serialize};

use crate::core::{FuelType, StationError};

/// A single dispenser holding one fuel type.
#[derive(Debug)]
pub struct Pump {
    fuel_type: FuelType,
    /// Liters left. Only changed through a [`PumpReservation`].
    remaining: Mutex<f64>,
}

impl Pump {
    /// Create a pump holding `liters` of `fuel_type`.
    pub fn new(fuel_type: FuelType, liters: f64) -> Result<Self, StationError> {
        if !liters.is_finite() || liters < 0.0 {
            return Err(StationError::InvalidCapacity(liters));
        }
        Ok(Self {
            fuel_type,
            remaining: Mutex::new(liters),
        })
    }

    /// Fuel type this pump dispenses.
    pub const fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    /// Liters currently left. May be stale as soon as it returns.
    pub fn remaining(&self) -> f64 {
        *self.remaining.lock()
    }

    /// Take exclusive access to this pump's stock.
    ///
    /// Blocks while another request holds the reservation.
    pub fn reserve(&self) -> PumpReservation<'_> {
        PumpReservation {
            remaining: self.remaining.lock(),
        }
    }
}

/// Exclusive access to one pump's stock, released on drop.
pub struct PumpReservation<'a> {
    remaining: MutexGuard<'a, f64>,
}

impl PumpReservation<'_> {
    /// Liters left in the reserved pump.
    pub fn remaining(&self) -> f64 {
        *self.remaining
    }

    /// Whether the pump can supply `liters` right now.
    pub fn can_supply(&self, liters: f64) -> bool {
        *self.remaining >= liters
    }

    /// Remove `liters` from the pump. Returns the liters left, or `None`
    /// without touching the stock if there is not enough.
    pub fn debit(&mut self, liters: f64) -> Option<f64> {
        if !self.can_supply(liters) {
            return None;
        }
        *self.remaining -= liters;
        Some(*self.remaining)
    }
}

/// Point-in-time view of a registered pump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpSnapshot {
    /// Registration index.
    pub index: usize,
    /// Fuel type.
    pub fuel_type: FuelType,
    /// Liters left when the snapshot was taken.
    pub remaining: f64,
}

/// Ordered, append-only collection of pumps.
#[derive(Debug, Default)]
pub struct PumpRegistry {
    pumps: RwLock<Vec<Arc<Pump>>>,
}

impl PumpRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pump and return its registration index.
    pub fn add(&self, pump: Pump) -> usize {
        let mut pumps = self.pumps.write();
        pumps.push(Arc::new(pump));
        pumps.len() - 1
    }

    /// Snapshot of all pumps in registration order.
    pub fn all(&self) -> Vec<Arc<Pump>> {
        self.pumps.read().clone()
    }

    /// Pump registered at `index`.
    pub fn get(&self, index: usize) -> Option<Arc<Pump>> {
        self.pumps.read().get(index).cloned()
    }

    /// Number of registered pumps.
    pub fn len(&self) -> usize {
        self.pumps.read().len()
    }

    /// Whether no pump has been registered.
    pub fn is_empty(&self) -> bool {
        self.pumps.read().is_empty()
    }

    /// Current stock of every pump.
    pub fn snapshot(&self) -> Vec<PumpSnapshot> {
        self.all()
            .iter()
            .enumerate()
            .map(|(index, pump)| PumpSnapshot {
                index,
                fuel_type: pump.fuel_type(),
                remaining: pump.remaining(),
            })
            .collect()
    }
}
