//! Builders to construct scheduler components from configuration.

pub mod station_builder;

pub use station_builder::{build_router, build_stations};
