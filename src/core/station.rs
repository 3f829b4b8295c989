//! The station facade shared by all customers.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::audit::build_dispense_event;
use crate::core::{
    AuditSink, DispenseCoordinator, DispenseError, FuelType, LedgerSnapshot, PriceEntry,
    PricingTable, Pump, PumpRegistry, PumpSnapshot, SaleOutcome, SalesLedger, StationError,
};

/// A gas station: pumps, prices and a sales ledger behind one handle.
///
/// Cloning is cheap and every clone refers to the same station.
#[derive(Clone)]
pub struct GasStation {
    pumps: Arc<PumpRegistry>,
    prices: Arc<PricingTable>,
    ledger: Arc<SalesLedger>,
    coordinator: DispenseCoordinator,
    audit: Option<Arc<Mutex<Box<dyn AuditSink>>>>,
}

impl Default for GasStation {
    fn default() -> Self {
        Self::new()
    }
}

impl GasStation {
    /// Create a station with no pumps and no prices.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(PumpRegistry::new()),
            Arc::new(PricingTable::new()),
            Arc::new(SalesLedger::new()),
        )
    }

    /// Create a station over existing shared structures.
    pub fn from_parts(
        pumps: Arc<PumpRegistry>,
        prices: Arc<PricingTable>,
        ledger: Arc<SalesLedger>,
    ) -> Self {
        let coordinator =
            DispenseCoordinator::new(Arc::clone(&pumps), Arc::clone(&prices), Arc::clone(&ledger));
        Self {
            pumps,
            prices,
            ledger,
            coordinator,
            audit: None,
        }
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Arc::new(Mutex::new(audit)));
        self
    }

    /// Register a pump and return its index.
    pub fn add_pump(&self, pump: Pump) -> usize {
        let fuel_type = pump.fuel_type();
        let liters = pump.remaining();
        let index = self.pumps.add(pump);
        tracing::info!("pump {} added: {} liters of {}", index, liters, fuel_type);
        index
    }

    /// Set the unit price of a fuel type.
    pub fn set_price(&self, fuel_type: FuelType, price: f64) -> Result<Option<f64>, StationError> {
        self.prices.set_price(fuel_type, price)
    }

    /// Buy fuel and return the amount paid.
    pub fn request_fuel(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
    ) -> Result<f64, DispenseError> {
        self.dispense(fuel_type, liters, max_price_per_liter)
            .map(|outcome| outcome.total_paid)
    }

    /// Buy fuel and return the full sale outcome.
    pub fn dispense(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
    ) -> Result<SaleOutcome, DispenseError> {
        let result = self.coordinator.dispense(fuel_type, liters, max_price_per_liter);
        self.record_audit(fuel_type, liters, max_price_per_liter, &result);
        result
    }

    fn record_audit(
        &self,
        fuel_type: FuelType,
        liters: f64,
        max_price_per_liter: f64,
        result: &Result<SaleOutcome, DispenseError>,
    ) {
        if let Some(audit) = &self.audit {
            let event = build_dispense_event(fuel_type, liters, max_price_per_liter, result);
            audit.lock().record(event);
        }
    }

    /// Current unit price of a fuel type.
    pub fn get_price(&self, fuel_type: FuelType) -> Result<f64, StationError> {
        self.prices.get_price(fuel_type)
    }

    /// All prices.
    pub fn prices(&self) -> Vec<PriceEntry> {
        self.prices.snapshot()
    }

    /// Registered pumps in registration order.
    pub fn list_pumps(&self) -> Vec<Arc<Pump>> {
        self.pumps.all()
    }

    /// Current stock of every pump.
    pub fn pump_snapshot(&self) -> Vec<PumpSnapshot> {
        self.pumps.snapshot()
    }

    /// Completed sales.
    pub fn sales_count(&self) -> u64 {
        self.ledger.sales_count()
    }

    /// Total revenue.
    pub fn revenue(&self) -> f64 {
        self.ledger.revenue()
    }

    /// Cancellations for lack of stock.
    pub fn no_stock_cancellations(&self) -> u64 {
        self.ledger.no_stock_cancellations()
    }

    /// Cancellations for an exceeded price ceiling.
    pub fn too_expensive_cancellations(&self) -> u64 {
        self.ledger.too_expensive_cancellations()
    }

    /// All ledger counters at once.
    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }
}
