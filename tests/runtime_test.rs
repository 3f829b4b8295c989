//! Integration tests for the runtime adapters: API models, the customer
//! worker pool, and async serving.

use gas_station::builders::build_station;
use gas_station::config::StationConfig;
use gas_station::core::{FailureKind, FuelType, GasStation};
use gas_station::runtime::api::health;
use gas_station::runtime::{
    Customer, CustomerPool, FuelRequest, PurchaseStatus, handle_request, serve_all,
    serve_customer_async, serve_customers_async, station_report,
};

fn standard_station() -> GasStation {
    build_station(&StationConfig::default()).unwrap()
}

#[test]
fn test_handle_request_fulfilled() {
    let station = standard_station();
    let response = handle_request(
        &station,
        &FuelRequest {
            fuel_type: Some(FuelType::Super),
            liters: 50.0,
            max_price_per_liter: 2.0,
        },
    );

    assert_eq!(response.status, PurchaseStatus::Fulfilled);
    assert_eq!(response.total_paid, Some(100.0));
    assert_eq!(response.pump_index, Some(2));
    assert!(response.reason.is_none());
}

#[test]
fn test_handle_request_missing_fuel_type() {
    let station = standard_station();
    let response = handle_request(
        &station,
        &FuelRequest {
            fuel_type: None,
            liters: 50.0,
            max_price_per_liter: 2.0,
        },
    );

    assert_eq!(response.status, PurchaseStatus::Failed(FailureKind::InvalidRequest));
    assert_eq!(station.ledger_snapshot().sales_count, 0);
}

#[test]
fn test_fuel_request_json_roundtrip_through_station() {
    let station = standard_station();
    let request: FuelRequest = serde_json::from_str(
        r#"{ "fuel_type": "diesel", "liters": 4000.0, "max_price_per_liter": 3.0 }"#,
    )
    .unwrap();

    let response = handle_request(&station, &request);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"]["failed"], "out_of_stock");
    assert_eq!(station.no_stock_cancellations(), 1);
}

#[test]
fn test_station_report() {
    let station = standard_station();
    station.request_fuel(FuelType::Regular, 10.0, 1.0).unwrap();

    let report = station_report(&station);
    assert_eq!(report.pumps.len(), 6);
    assert_eq!(report.pumps[0].remaining, 990.0);
    assert_eq!(report.prices.len(), 3);
    assert_eq!(report.ledger.sales_count, 1);
    assert!(health(&station).ok);
}

#[test]
fn test_serve_all_matches_ledger() {
    let station = standard_station();
    let customers = (0..40).map(|id| {
        let fuel_type = FuelType::ALL[id as usize % 3];
        Customer::new(id, fuel_type, 150.0, 3.0)
    });

    let receipts = serve_all(&station, customers, 4).unwrap();

    assert_eq!(receipts.len(), 40);
    assert!(receipts.windows(2).all(|w| w[0].customer_id < w[1].customer_id));
    let ok = receipts.iter().filter(|r| r.result.is_ok()).count() as u64;
    let paid: f64 = receipts
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .map(|o| o.total_paid)
        .sum();
    assert_eq!(station.sales_count(), ok);
    assert!((station.revenue() - paid).abs() < 1e-9);
    // 14 regular customers want 2100 L, two 1000 L pumps fit 12 of them.
    assert_eq!(station.no_stock_cancellations(), 2);
}

#[test]
fn test_customer_pool_counts_served() {
    let station = standard_station();
    let pool = CustomerPool::new(station.clone(), 2, 8).unwrap();
    assert_eq!(pool.worker_count(), 2);

    for id in 0..5 {
        pool.submit(Customer::new(id, FuelType::Diesel, 1.0, 3.0)).unwrap();
    }
    let receipts = pool.shutdown();

    assert_eq!(receipts.len(), 5);
    assert_eq!(station.sales_count(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serve_customers_async() {
    let station = standard_station();
    let customers = (0..30).map(|id| Customer::new(id, FuelType::Regular, 100.0, 1.0));

    let receipts = serve_customers_async(&station, customers).await.unwrap();

    assert_eq!(receipts.len(), 30);
    let ok = receipts.iter().filter(|r| r.result.is_ok()).count();
    assert_eq!(ok, 20);
    assert_eq!(station.sales_count(), 20);
    assert_eq!(station.no_stock_cancellations(), 10);
    assert_eq!(station.revenue(), 2000.0);
}

#[test]
fn test_default_workers_and_drain() {
    let station = standard_station();
    let pool = CustomerPool::with_default_workers(station.clone(), 4).unwrap();
    assert!(pool.worker_count() >= 1);

    pool.submit(Customer::new(7, FuelType::Super, 10.0, 1.0)).unwrap();
    let mut receipts = Vec::new();
    while receipts.is_empty() {
        receipts = pool.drain_receipts();
        std::thread::yield_now();
    }
    assert_eq!(receipts[0].customer_id, 7);
    assert_eq!(
        receipts[0].result.as_ref().unwrap_err().kind(),
        FailureKind::PriceTooHigh
    );
    assert_eq!(pool.served(), 1);
    assert!(pool.shutdown().is_empty());
}

#[tokio::test]
async fn test_serve_customer_async() {
    let station = standard_station();
    let receipt = serve_customer_async(&station, Customer::new(1, FuelType::Diesel, 2.0, 3.0))
        .await
        .unwrap();
    assert_eq!(receipt.result.unwrap().total_paid, 6.0);
}
