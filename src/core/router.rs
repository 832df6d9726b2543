//! Domain-keyed routing of work items to stations.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::{SchedulerError, Station, StationStats, WorkItem};

/// Maps routing domains to the stations that serve them.
#[derive(Debug)]
pub struct Router {
    stations: HashMap<String, Arc<Station>>,
    max_queue_depth: usize,
}

impl Router {
    /// Create a router over `stations`, keyed by each station's domain.
    #[must_use]
    pub fn new(stations: impl IntoIterator<Item = Station>, max_queue_depth: usize) -> Self {
        let stations = stations
            .into_iter()
            .map(|s| (s.domain().to_string(), Arc::new(s)))
            .collect();
        Self {
            stations,
            max_queue_depth,
        }
    }

    /// Validate `item` and enqueue it at the station serving `domain`.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidWorkItem` for zero service time or an unknown domain
    /// - `SchedulerError::QueueFull` if the station queue is at its depth limit
    pub fn route(&self, domain: &str, item: WorkItem) -> Result<(), SchedulerError> {
        let result = self.try_route(domain, item);
        if let Err(e) = &result {
            warn!(domain, error = %e, "work item rejected");
        }
        result
    }

    fn try_route(&self, domain: &str, item: WorkItem) -> Result<(), SchedulerError> {
        item.validate()?;
        let station = self
            .stations
            .get(domain)
            .ok_or_else(|| SchedulerError::InvalidWorkItem {
                id: item.id().to_string(),
                reason: format!("unknown domain `{domain}`"),
            })?;
        if station.queue().len() >= self.max_queue_depth {
            return Err(SchedulerError::QueueFull(domain.to_string()));
        }
        info!(domain, station = station.name(), item = %item, "new work item");
        station.enqueue(item);
        Ok(())
    }

    /// Station serving `domain`.
    #[must_use]
    pub fn station(&self, domain: &str) -> Option<&Arc<Station>> {
        self.stations.get(domain)
    }

    /// All stations, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = &Arc<Station>> {
        self.stations.values()
    }

    /// Known domains, sorted.
    #[must_use]
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<_> = self.stations.keys().cloned().collect();
        domains.sort();
        domains
    }

    /// Close every station queue, waking idle stations so they can exit.
    pub fn close_all(&self) {
        for station in self.stations.values() {
            station.queue().close();
        }
    }

    /// Per-station snapshots sorted by domain.
    #[must_use]
    pub fn stats(&self) -> Vec<StationStats> {
        let mut stats: Vec<_> = self.stations.values().map(|s| s.stats()).collect();
        stats.sort_by(|a, b| a.domain.cmp(&b.domain));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Discipline;
    use crate::infra::queue::queue_for;

    fn router(max_depth: usize) -> Router {
        Router::new(
            [
                Station::new("Airport", "airport", Discipline::Priority, queue_for(Discipline::Priority)),
                Station::new("Bus", "bus", Discipline::Fifo, queue_for(Discipline::Fifo)),
            ],
            max_depth,
        )
    }

    #[test]
    fn test_routes_to_matching_station() {
        let router = router(10);
        router.route("bus", WorkItem::new("Bus 77#1", 3, 2)).unwrap();
        assert_eq!(router.station("bus").unwrap().queue().len(), 1);
        assert_eq!(router.station("airport").unwrap().queue().len(), 0);
    }

    #[test]
    fn test_unknown_domain_rejected() {
        let router = router(10);
        let err = router.route("harbour", WorkItem::new("Ferry#1", 3, 2)).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidWorkItem { ref reason, .. } if reason.contains("harbour")));
    }

    #[test]
    fn test_zero_service_time_rejected() {
        let router = router(10);
        assert!(router.route("bus", WorkItem::new("Bus 77#1", 0, 2)).is_err());
        assert!(router.station("bus").unwrap().queue().is_empty());
    }

    #[test]
    fn test_queue_depth_enforced() {
        let router = router(1);
        router.route("airport", WorkItem::new("AI999#1", 2, 1)).unwrap();
        let err = router.route("airport", WorkItem::new("AI999#2", 2, 1)).unwrap_err();
        assert!(matches!(err, SchedulerError::QueueFull(ref d) if d == "airport"));
    }

    #[test]
    fn test_domains_sorted() {
        assert_eq!(router(1).domains(), ["airport", "bus"]);
    }
}
