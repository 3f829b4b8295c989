//! Pumps, prices, the sales ledger and the dispensing algorithm.

pub mod audit;
pub mod dispense;
pub mod error;
pub mod fuel;
pub mod ledger;
pub mod pricing;
pub mod pump;
pub mod station;

pub use audit::{AuditSink, DispenseAction, DispenseEvent, InMemoryAuditSink, build_dispense_event};
pub use dispense::{DispenseCoordinator, SaleOutcome};
pub use error::{AppResult, DispenseError, FailureKind, ParseFuelTypeError, StationError};
pub use fuel::FuelType;
pub use ledger::{LedgerSnapshot, SalesLedger};
pub use pricing::{PriceEntry, PricingTable};
pub use pump::{Pump, PumpRegistry, PumpReservation, PumpSnapshot};
pub use station::GasStation;
