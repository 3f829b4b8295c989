//! Tests for configuration validation and loading

use std::io::Write;

use gas_station::builders::build_station;
use gas_station::config::{CONFIG_ENV_VAR, PriceConfig, PumpConfig, StationConfig};
use gas_station::core::FuelType;

fn single_pump(liters: f64, price: f64) -> StationConfig {
    StationConfig {
        pumps: vec![PumpConfig {
            fuel_type: FuelType::Regular,
            liters,
        }],
        prices: vec![PriceConfig {
            fuel_type: FuelType::Regular,
            price,
        }],
    }
}

#[test]
fn test_station_config_validation() {
    assert!(single_pump(500.0, 1.0).validate().is_ok());
    assert!(single_pump(0.0, 1.0).validate().is_ok());
}

#[test]
fn test_station_config_invalid_liters() {
    assert!(single_pump(-1.0, 1.0).validate().is_err());
    assert!(single_pump(f64::NAN, 1.0).validate().is_err());
}

#[test]
fn test_station_config_invalid_price() {
    assert!(single_pump(500.0, 0.0).validate().is_err());
    assert!(single_pump(500.0, -2.0).validate().is_err());
    assert!(single_pump(500.0, f64::INFINITY).validate().is_err());
}

#[test]
fn test_station_config_empty_pumps() {
    let config = StationConfig {
        pumps: Vec::new(),
        prices: Vec::new(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_station_config_duplicate_price() {
    let mut config = single_pump(500.0, 1.0);
    config.prices.push(PriceConfig {
        fuel_type: FuelType::Regular,
        price: 1.1,
    });
    assert!(config.validate().unwrap_err().contains("duplicate"));
}

#[test]
fn test_station_config_from_json() {
    let json = r#"{
        "pumps": [
            { "fuel_type": "regular", "liters": 1000.0 },
            { "fuel_type": "diesel", "liters": 250.5 }
        ],
        "prices": [
            { "fuel_type": "regular", "price": 1.0 },
            { "fuel_type": "diesel", "price": 1.4 }
        ]
    }"#;

    let config = StationConfig::from_json_str(json).unwrap();
    assert_eq!(config.pumps.len(), 2);
    assert_eq!(config.pumps[1].liters, 250.5);

    let station = build_station(&config).unwrap();
    assert_eq!(station.get_price(FuelType::Diesel).unwrap(), 1.4);
    assert!(station.get_price(FuelType::Super).is_err());
}

#[test]
fn test_station_config_from_json_rejects_unknown_fuel() {
    let json = r#"{
        "pumps": [{ "fuel_type": "kerosene", "liters": 10.0 }],
        "prices": []
    }"#;
    assert!(StationConfig::from_json_str(json).unwrap_err().starts_with("parse error"));
}

#[test]
fn test_station_config_from_file_and_env() {
    let config = single_pump(42.0, 1.5);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = StationConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);

    std::env::set_var(CONFIG_ENV_VAR, file.path());
    let from_env = StationConfig::from_env().unwrap();
    std::env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(from_env, config);

    assert!(StationConfig::from_json_file(file.path().with_extension("missing")).is_err());
}
