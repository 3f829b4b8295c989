//! Serving customers from async code.
//!
//! Pump reservations block, so each purchase runs on tokio's blocking pool
//! rather than on a runtime worker.

use crate::core::GasStation;
use crate::runtime::customers::{Customer, CustomerPoolError, CustomerReceipt};

/// Serve one customer without blocking the async runtime.
pub async fn serve_customer_async(
    station: &GasStation,
    customer: Customer,
) -> Result<CustomerReceipt, CustomerPoolError> {
    let station = station.clone();
    tokio::task::spawn_blocking(move || CustomerReceipt {
        customer_id: customer.id,
        result: station.dispense(customer.fuel_type, customer.liters, customer.max_price_per_liter),
    })
    .await
    .map_err(|e| CustomerPoolError::Internal(format!("purchase task failed: {e}")))
}

/// Serve all customers concurrently and return receipts ordered by customer id.
pub async fn serve_customers_async(
    station: &GasStation,
    customers: impl IntoIterator<Item = Customer>,
) -> Result<Vec<CustomerReceipt>, CustomerPoolError> {
    let mut set = tokio::task::JoinSet::new();
    for customer in customers {
        let station = station.clone();
        set.spawn_blocking(move || CustomerReceipt {
            customer_id: customer.id,
            result: station.dispense(customer.fuel_type, customer.liters, customer.max_price_per_liter),
        });
    }

    let mut receipts = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        let receipt =
            joined.map_err(|e| CustomerPoolError::Internal(format!("purchase task failed: {e}")))?;
        receipts.push(receipt);
    }
    receipts.sort_by_key(|r| r.customer_id);
    Ok(receipts)
}
