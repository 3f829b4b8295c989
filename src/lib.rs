//! # Gas Station
//!
//! A fuel station shared by many concurrent customers.
//!
//! The station owns a fixed set of pumps, each holding a finite stock of one
//! fuel type, a price table, and a sales ledger. Customers call
//! [`GasStation::request_fuel`](core::GasStation::request_fuel) from any
//! number of threads; each request is served by the first pump of its fuel
//! type that still holds enough fuel, or fails with a typed error.
//!
//! ## Guarantees
//!
//! - **No overdraft**: a pump's stock is re-checked and debited under that
//!   pump's own lock, so two customers never receive the same liters
//! - **Independent pumps**: a reservation blocks only its own pump
//! - **Consistent ledger**: a sale's count and revenue are written inside the
//!   same reservation as the debit
//! - **Attributed failures**: [`DispenseError`](core::DispenseError) tells an
//!   invalid request, an exceeded price ceiling, and missing stock apart
//!
//! ## Example
//!
//! ```
//! use gas_station::builders::StationBuilder;
//! use gas_station::core::{FailureKind, FuelType};
//!
//! let station = StationBuilder::new()
//!     .with_pump(FuelType::Regular, 1000.0)
//!     .with_price(FuelType::Regular, 1.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(station.request_fuel(FuelType::Regular, 100.0, 1.0).unwrap(), 100.0);
//!
//! let err = station.request_fuel(FuelType::Regular, 100.0, 0.5).unwrap_err();
//! assert_eq!(err.kind(), FailureKind::PriceTooHigh);
//! assert_eq!(station.too_expensive_cancellations(), 1);
//! ```
//!
//! For many customers at once, see [`runtime::CustomerPool`] (OS threads) and
//! `runtime::serve_customers_async` (tokio, behind the `tokio-runtime` feature).

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Pumps, prices, the sales ledger and the dispensing algorithm.
pub mod core;
/// Configuration models for pumps and prices.
pub mod config;
/// Builders to construct stations from configuration.
pub mod builders;
/// Runtime adapters (worker threads, async) and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
