//! Builders to construct stations and routing from configuration.

use crate::config::SchedulerConfig;
use crate::core::{Router, SchedulerError, Station};
use crate::infra::queue::queue_for;

/// Build one station per configured domain, each with its discipline's queue.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
pub fn build_stations(cfg: &SchedulerConfig) -> Result<Vec<Station>, SchedulerError> {
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;

    let mut stations = Vec::with_capacity(cfg.stations.len());
    for (domain, station_cfg) in &cfg.stations {
        let discipline = station_cfg.discipline;
        stations.push(Station::new(
            station_cfg.name.clone(),
            domain.clone(),
            discipline,
            queue_for(discipline),
        ));
    }
    Ok(stations)
}

/// Build the domain router for all configured stations.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
pub fn build_router(cfg: &SchedulerConfig) -> Result<Router, SchedulerError> {
    Ok(Router::new(build_stations(cfg)?, cfg.max_queue_depth))
}
