//! Customers served by a fixed set of OS worker threads.
//!
//! Each worker pulls [`Customer`]s from a bounded channel and calls
//! [`GasStation::dispense`] directly; there is no queueing inside the station
//! itself. Receipts flow back over an unbounded channel so workers never block
//! on a slow reader.
//!
//! ```rust,ignore
//! let pool = CustomerPool::new(station.clone(), 4, 64)?;
//! pool.submit(Customer::new(1, FuelType::Regular, 100.0, 1.0))?;
//! let receipts = pool.shutdown();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{DispenseError, FuelType, GasStation, SaleOutcome};

/// A caller wanting fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Caller-chosen identifier, echoed in the receipt.
    pub id: u64,
    /// Requested fuel type.
    pub fuel_type: FuelType,
    /// Requested liters.
    pub liters: f64,
    /// Highest acceptable price per liter.
    pub max_price_per_liter: f64,
}

impl Customer {
    /// Create a customer.
    pub const fn new(id: u64, fuel_type: FuelType, liters: f64, max_price_per_liter: f64) -> Self {
        Self {
            id,
            fuel_type,
            liters,
            max_price_per_liter,
        }
    }
}

/// What a customer got.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerReceipt {
    /// Customer identifier.
    pub customer_id: u64,
    /// Sale or failure.
    pub result: Result<SaleOutcome, DispenseError>,
}

/// Errors from the customer pool itself, as opposed to failed purchases.
#[derive(Debug, Error)]
pub enum CustomerPoolError {
    /// The pool has been shut down.
    #[error("customer pool has been shut down")]
    PoolShutdown,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A worker thread could not be started.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Fixed set of threads serving customers against one station.
pub struct CustomerPool {
    customer_tx: Mutex<Option<Sender<Customer>>>,
    receipt_rx: Receiver<CustomerReceipt>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
    served: Arc<AtomicU64>,
}

impl CustomerPool {
    /// Start `worker_count` threads with room for `queue_depth` waiting customers.
    pub fn new(
        station: GasStation,
        worker_count: usize,
        queue_depth: usize,
    ) -> Result<Self, CustomerPoolError> {
        if worker_count == 0 {
            return Err(CustomerPoolError::InvalidConfig(
                "worker_count must be greater than 0".into(),
            ));
        }
        if queue_depth == 0 {
            return Err(CustomerPoolError::InvalidConfig(
                "queue_depth must be greater than 0".into(),
            ));
        }

        let (customer_tx, customer_rx) = bounded::<Customer>(queue_depth);
        let (receipt_tx, receipt_rx) = unbounded::<CustomerReceipt>();
        let served = Arc::new(AtomicU64::new(0));

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let station = station.clone();
            let customer_rx = customer_rx.clone();
            let receipt_tx = receipt_tx.clone();
            let served = Arc::clone(&served);
            let handle = thread::Builder::new()
                .name(format!("customer-worker-{worker_id}"))
                .spawn(move || worker_loop(worker_id, &station, &customer_rx, &receipt_tx, &served))
                .map_err(|e| CustomerPoolError::Internal(format!("spawn worker: {e}")))?;
            workers.push(handle);
        }

        info!("customer pool started with {} workers", worker_count);
        Ok(Self {
            customer_tx: Mutex::new(Some(customer_tx)),
            receipt_rx,
            workers: Mutex::new(workers),
            worker_count,
            served,
        })
    }

    /// One worker per CPU.
    pub fn with_default_workers(
        station: GasStation,
        queue_depth: usize,
    ) -> Result<Self, CustomerPoolError> {
        Self::new(station, num_cpus::get().max(1), queue_depth)
    }

    /// Number of worker threads.
    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Customers served so far.
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Acquire)
    }

    /// Queue a customer, blocking while the queue is full.
    pub fn submit(&self, customer: Customer) -> Result<(), CustomerPoolError> {
        let tx = self
            .customer_tx
            .lock()
            .clone()
            .ok_or(CustomerPoolError::PoolShutdown)?;
        tx.send(customer).map_err(|_| CustomerPoolError::PoolShutdown)
    }

    /// Receipts available right now, without waiting.
    pub fn drain_receipts(&self) -> Vec<CustomerReceipt> {
        self.receipt_rx.try_iter().collect()
    }

    /// Stop accepting customers, wait for queued ones, and return every
    /// receipt not yet drained.
    pub fn shutdown(self) -> Vec<CustomerReceipt> {
        self.customer_tx.lock().take();
        for handle in self.workers.lock().drain(..) {
            if handle.join().is_err() {
                warn!("customer worker panicked");
            }
        }
        info!("customer pool stopped after serving {}", self.served());
        self.receipt_rx.try_iter().collect()
    }
}

fn worker_loop(
    worker_id: usize,
    station: &GasStation,
    customers: &Receiver<Customer>,
    receipts: &Sender<CustomerReceipt>,
    served: &AtomicU64,
) {
    debug!("customer worker {} started", worker_id);
    for customer in customers {
        let result = station.dispense(customer.fuel_type, customer.liters, customer.max_price_per_liter);
        served.fetch_add(1, Ordering::AcqRel);
        if receipts
            .send(CustomerReceipt {
                customer_id: customer.id,
                result,
            })
            .is_err()
        {
            break;
        }
    }
    debug!("customer worker {} exiting", worker_id);
}

/// Serve every customer on `worker_count` threads and return receipts
/// ordered by customer id.
pub fn serve_all(
    station: &GasStation,
    customers: impl IntoIterator<Item = Customer>,
    worker_count: usize,
) -> Result<Vec<CustomerReceipt>, CustomerPoolError> {
    let pool = CustomerPool::new(station.clone(), worker_count, worker_count.saturating_mul(4))?;
    for customer in customers {
        pool.submit(customer)?;
    }
    let mut receipts = pool.shutdown();
    receipts.sort_by_key(|r| r.customer_id);
    Ok(receipts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pump;

    #[test]
    fn test_rejects_zero_workers() {
        assert!(matches!(
            CustomerPool::new(GasStation::new(), 0, 1),
            Err(CustomerPoolError::InvalidConfig(_))
        ));
        assert!(matches!(
            CustomerPool::new(GasStation::new(), 1, 0),
            Err(CustomerPoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_shutdown_returns_all_receipts() {
        let station = GasStation::new();
        station.add_pump(Pump::new(FuelType::Regular, 1000.0).unwrap());
        station.set_price(FuelType::Regular, 1.0).unwrap();

        let pool = CustomerPool::new(station.clone(), 3, 2).unwrap();
        for id in 0..12 {
            pool.submit(Customer::new(id, FuelType::Regular, 100.0, 1.0)).unwrap();
        }
        let receipts = pool.shutdown();

        assert_eq!(receipts.len(), 12);
        assert_eq!(receipts.iter().filter(|r| r.result.is_ok()).count(), 10);
        assert_eq!(station.sales_count(), 10);
        assert_eq!(station.no_stock_cancellations(), 2);
    }
}
