//! Randomized arrivals across the configured stations.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::{DispatcherConfig, SchedulerConfig};
use crate::core::{Arrival, ArrivalSource, WorkItem};

/// Generates work items with random domain, label, service time and priority,
/// spaced by a random pause. Never runs dry unless it has no domains.
pub struct RandomArrivalSource {
    domains: Vec<String>,
    cfg: DispatcherConfig,
    rng: StdRng,
}

impl RandomArrivalSource {
    /// Create a source spreading arrivals over `domains`.
    ///
    /// Seeded from `cfg.seed` when set, otherwise from the OS.
    #[must_use]
    pub fn new(domains: Vec<String>, cfg: DispatcherConfig) -> Self {
        let rng = cfg
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { domains, cfg, rng }
    }

    /// Source over every station in `cfg`, in sorted domain order.
    #[must_use]
    pub fn from_config(cfg: &SchedulerConfig) -> Self {
        let mut domains: Vec<_> = cfg.stations.keys().cloned().collect();
        domains.sort();
        Self::new(domains, cfg.dispatcher.clone())
    }
}

impl ArrivalSource for RandomArrivalSource {
    fn next_arrival(&mut self) -> Option<Arrival> {
        let domain = self.domains.choose(&mut self.rng)?.clone();
        let name = self.cfg.labels.choose(&mut self.rng)?;
        let label = format!("{name}#{}", self.rng.random_range(1..=100));
        let service_time = self
            .rng
            .random_range(self.cfg.min_service_time..=self.cfg.max_service_time);
        let priority = self
            .rng
            .random_range(self.cfg.min_priority..=self.cfg.max_priority);
        let delay_ms = self
            .rng
            .random_range(self.cfg.min_interval_ms..self.cfg.max_interval_ms);
        Some(Arrival {
            domain,
            item: WorkItem::new(label, service_time, priority),
            delay: Duration::from_millis(delay_ms),
        })
    }
}
