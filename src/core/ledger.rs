//! Sales and cancellation counters.
//!
//! Sale count and revenue live together under one mutex so a reader never sees
//! a sale without its revenue. Cancellation counters are independent atomics.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct SalesTotals {
    count: u64,
    revenue: f64,
}

/// Consistent view of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Completed sales.
    pub sales_count: u64,
    /// Sum of all amounts paid.
    pub revenue: f64,
    /// Requests cancelled because no pump had enough fuel.
    pub no_stock_cancellations: u64,
    /// Requests cancelled because the price exceeded the ceiling.
    pub too_expensive_cancellations: u64,
}

/// Running totals for a station.
#[derive(Debug, Default)]
pub struct SalesLedger {
    totals: Mutex<SalesTotals>,
    no_stock: AtomicU64,
    too_expensive: AtomicU64,
}

impl SalesLedger {
    /// Create a ledger with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sale and add its amount to revenue.
    pub fn record_sale(&self, total_paid: f64) {
        let mut totals = self.totals.lock();
        totals.count += 1;
        totals.revenue += total_paid;
    }

    /// Count a cancellation for lack of stock.
    pub fn record_no_stock(&self) {
        self.no_stock.fetch_add(1, Ordering::AcqRel);
    }

    /// Count a cancellation for an exceeded price ceiling.
    pub fn record_too_expensive(&self) {
        self.too_expensive.fetch_add(1, Ordering::AcqRel);
    }

    /// Completed sales.
    pub fn sales_count(&self) -> u64 {
        self.totals.lock().count
    }

    /// Total revenue at full precision.
    pub fn revenue(&self) -> f64 {
        self.totals.lock().revenue
    }

    /// Cancellations for lack of stock.
    pub fn no_stock_cancellations(&self) -> u64 {
        self.no_stock.load(Ordering::Acquire)
    }

    /// Cancellations for an exceeded price ceiling.
    pub fn too_expensive_cancellations(&self) -> u64 {
        self.too_expensive.load(Ordering::Acquire)
    }

    /// All four counters. Sales count and revenue are read together.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let (sales_count, revenue) = {
            let totals = self.totals.lock();
            (totals.count, totals.revenue)
        };
        LedgerSnapshot {
            sales_count,
            revenue,
            no_stock_cancellations: self.no_stock_cancellations(),
            too_expensive_cancellations: self.too_expensive_cancellations(),
        }
    }
}
