//! Tests for configuration validation

use std::collections::HashMap;
use std::num::NonZeroU32;

use tasksched::config::{DispatcherConfig, SchedulerConfig, StationConfig};
use tasksched::core::Discipline;

fn single_station(discipline: Discipline) -> SchedulerConfig {
    let mut stations = HashMap::new();
    stations.insert("gate".to_string(), StationConfig::new("Gate", discipline));
    SchedulerConfig {
        stations,
        ..SchedulerConfig::default()
    }
}

#[test]
fn test_default_config_is_valid() {
    assert!(SchedulerConfig::default().validate().is_ok());
}

#[test]
fn test_empty_stations_rejected() {
    let config = SchedulerConfig {
        stations: HashMap::new(),
        ..SchedulerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_blank_station_name_rejected() {
    let mut config = single_station(Discipline::Fifo);
    config.stations.get_mut("gate").unwrap().name = "  ".into();
    let err = config.validate().unwrap_err();
    assert!(err.contains("gate"));
}

#[test]
fn test_zero_time_unit_rejected() {
    let config = SchedulerConfig {
        time_unit_ms: 0,
        ..single_station(Discipline::Priority)
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_inverted_service_range_rejected() {
    let config = SchedulerConfig {
        dispatcher: DispatcherConfig {
            min_service_time: 6,
            max_service_time: 2,
            ..DispatcherConfig::default()
        },
        ..single_station(Discipline::Fifo)
    };
    assert!(config.validate().unwrap_err().contains("dispatcher"));
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "stations": {
            "amusement": {
                "name": "Amusement",
                "discipline": { "kind": "round_robin", "quantum": 3 }
            },
            "ride": {
                "name": "Ride Share",
                "discipline": { "kind": "shortest_job_first" }
            }
        },
        "time_unit_ms": 10
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.time_unit_ms, 10);
    assert_eq!(config.idle_wait_ms, 50);
    assert_eq!(
        config.stations["amusement"].discipline,
        Discipline::RoundRobin {
            quantum: NonZeroU32::new(3).unwrap()
        }
    );
    assert_eq!(config.dispatcher, DispatcherConfig::default());
}

#[test]
fn test_zero_quantum_fails_to_parse() {
    let json = r#"{
        "stations": {
            "amusement": {
                "name": "Amusement",
                "discipline": { "kind": "round_robin", "quantum": 0 }
            }
        }
    }"#;
    let err = SchedulerConfig::from_json_str(json).unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_from_file_reports_path() {
    let err = SchedulerConfig::from_file("/nonexistent/tasksched.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/tasksched.json"));
}
