//! Builders to construct stations from configuration.

pub mod station_builder;

pub use station_builder::{StationBuilder, build_station};
