//! Tests for arrival sources

use std::time::Duration;

use tasksched::config::SchedulerConfig;
use tasksched::core::{Arrival, ArrivalSource, WorkItem};
use tasksched::infra::{RandomArrivalSource, ScriptedArrivalSource};

#[test]
fn test_scripted_source_replays_in_order() {
    let mut source = ScriptedArrivalSource::new(["bus", "ride"].map(|domain| Arrival {
        domain: domain.to_string(),
        item: WorkItem::new("x", 1, 1),
        delay: Duration::ZERO,
    }));
    assert_eq!(source.remaining(), 2);
    assert_eq!(source.next_arrival().unwrap().domain, "bus");
    assert_eq!(source.next_arrival().unwrap().domain, "ride");
    assert!(source.next_arrival().is_none());
}

#[test]
fn test_random_source_covers_configured_domains() {
    let mut config = SchedulerConfig::default();
    config.dispatcher.seed = Some(2024);
    let mut source = RandomArrivalSource::from_config(&config);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let arrival = source.next_arrival().unwrap();
        assert!(config.stations.contains_key(&arrival.domain));
        seen.insert(arrival.domain);
    }
    assert_eq!(seen.len(), 4);
}
