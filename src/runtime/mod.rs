//! Runtime adapters: worker threads, async serving, and the API surface.

pub mod api;
pub mod customers;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_customers;

pub use api::{FuelRequest, FuelResponse, PurchaseStatus, StationReport, handle_request, station_report};
pub use customers::{Customer, CustomerPool, CustomerPoolError, CustomerReceipt, serve_all};
#[cfg(feature = "tokio-runtime")]
pub use tokio_customers::{serve_customer_async, serve_customers_async};
