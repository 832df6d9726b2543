//! Station and scheduler configuration structures.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, Discipline, Priority};

/// Configuration of one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Display name written to ledger records.
    pub name: String,
    /// Scheduling discipline.
    pub discipline: Discipline,
}

impl StationConfig {
    /// Create a station configuration.
    pub fn new(name: impl Into<String>, discipline: Discipline) -> Self {
        Self {
            name: name.into(),
            discipline,
        }
    }

    /// Validate station configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        Ok(())
    }
}

/// Settings for the random arrival source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Smallest generated service time (units).
    pub min_service_time: u32,
    /// Largest generated service time (units).
    pub max_service_time: u32,
    /// Most urgent generated priority.
    pub min_priority: Priority,
    /// Least urgent generated priority.
    pub max_priority: Priority,
    /// Shortest pause between arrivals (ms).
    pub min_interval_ms: u64,
    /// Longest pause between arrivals (ms, exclusive).
    pub max_interval_ms: u64,
    /// Name pool for generated labels.
    pub labels: Vec<String>,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            min_service_time: 2,
            max_service_time: 6,
            min_priority: 1,
            max_priority: 5,
            min_interval_ms: 500,
            max_interval_ms: 1500,
            labels: [
                "AI999",
                "BG321",
                "EK202",
                "Bus 102",
                "Bus 77",
                "Ride A",
                "Ride C",
                "Visitor Anna",
                "Visitor Lee",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            seed: None,
        }
    }
}

impl DispatcherConfig {
    /// Validate generator ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_service_time == 0 {
            return Err("min_service_time must be greater than 0".into());
        }
        if self.min_service_time > self.max_service_time {
            return Err("min_service_time must not exceed max_service_time".into());
        }
        if self.min_priority > self.max_priority {
            return Err("min_priority must not exceed max_priority".into());
        }
        if self.min_interval_ms >= self.max_interval_ms {
            return Err("min_interval_ms must be less than max_interval_ms".into());
        }
        if self.labels.is_empty() {
            return Err("at least one label must be defined".into());
        }
        Ok(())
    }
}

/// Root scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Map of routing domain to station configuration.
    pub stations: HashMap<String, StationConfig>,
    /// Wall-clock length of one service unit in milliseconds.
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,
    /// Upper bound on one idle wait before a station rechecks its queue.
    #[serde(default = "default_idle_wait_ms")]
    pub idle_wait_ms: u64,
    /// How long `stop` waits for activities to exit.
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
    /// Ingress rejects items once a station queue holds this many.
    #[serde(default = "default_max_queue_depth")]
    pub max_queue_depth: usize,
    /// Random arrival source settings.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
}

const fn default_time_unit_ms() -> u64 {
    1000
}

const fn default_idle_wait_ms() -> u64 {
    50
}

const fn default_shutdown_timeout_ms() -> u64 {
    10_000
}

const fn default_max_queue_depth() -> usize {
    1024
}

impl Default for SchedulerConfig {
    /// Airport (priority), bus stop (FIFO), amusement ride (round-robin,
    /// quantum 3) and ride share (shortest job first).
    fn default() -> Self {
        let quantum = NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN);
        let stations = [
            ("airport", StationConfig::new("Airport", Discipline::Priority)),
            ("bus", StationConfig::new("Bus", Discipline::Fifo)),
            ("amusement", StationConfig::new("Amusement", Discipline::RoundRobin { quantum })),
            ("ride", StationConfig::new("Ride Share", Discipline::ShortestJobFirst)),
        ]
        .into_iter()
        .map(|(domain, cfg)| (domain.to_string(), cfg))
        .collect();
        Self {
            stations,
            time_unit_ms: default_time_unit_ms(),
            idle_wait_ms: default_idle_wait_ms(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
            max_queue_depth: default_max_queue_depth(),
            dispatcher: DispatcherConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Validate all stations and global settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.stations.is_empty() {
            return Err("at least one station must be defined".into());
        }
        for (domain, station) in &self.stations {
            if domain.trim().is_empty() {
                return Err("station domain must not be empty".into());
            }
            station
                .validate()
                .map_err(|e| format!("station `{domain}` invalid: {e}"))?;
        }
        if self.time_unit_ms == 0 {
            return Err("time_unit_ms must be greater than 0".into());
        }
        if self.idle_wait_ms == 0 {
            return Err("idle_wait_ms must be greater than 0".into());
        }
        if self.shutdown_timeout_ms == 0 {
            return Err("shutdown_timeout_ms must be greater than 0".into());
        }
        if self.max_queue_depth == 0 {
            return Err("max_queue_depth must be greater than 0".into());
        }
        self.dispatcher
            .validate()
            .map_err(|e| format!("dispatcher invalid: {e}"))
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed, or validated.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scheduler config {}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading scheduler config {}", path.display()))
    }

    /// Defaults overridden by `TASKSCHED_*` environment variables, after
    /// loading a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Fails if a variable is not a number or the result does not validate.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply `TASKSCHED_*` overrides from `lookup`, then validate.
    ///
    /// # Errors
    ///
    /// Fails if a value is not a number or the result does not validate.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T>
        where
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            raw.trim()
                .parse()
                .with_context(|| format!("{key} must be a number, got `{raw}`"))
        }

        if let Some(raw) = lookup("TASKSCHED_TIME_UNIT_MS") {
            self.time_unit_ms = parse("TASKSCHED_TIME_UNIT_MS", &raw)?;
        }
        if let Some(raw) = lookup("TASKSCHED_IDLE_WAIT_MS") {
            self.idle_wait_ms = parse("TASKSCHED_IDLE_WAIT_MS", &raw)?;
        }
        if let Some(raw) = lookup("TASKSCHED_SHUTDOWN_TIMEOUT_MS") {
            self.shutdown_timeout_ms = parse("TASKSCHED_SHUTDOWN_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("TASKSCHED_MAX_QUEUE_DEPTH") {
            self.max_queue_depth = parse("TASKSCHED_MAX_QUEUE_DEPTH", &raw)?;
        }
        if let Some(raw) = lookup("TASKSCHED_SEED") {
            self.dispatcher.seed = Some(parse("TASKSCHED_SEED", &raw)?);
        }
        self.validate().map_err(anyhow::Error::msg)
    }

    /// Length of one service unit.
    #[must_use]
    pub const fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// Bounded idle wait.
    #[must_use]
    pub const fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms)
    }

    /// Shutdown bound.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reproduces_four_stations() {
        let cfg = SchedulerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.stations.len(), 4);
        assert_eq!(cfg.stations["ride"].name, "Ride Share");
        assert_eq!(
            cfg.stations["amusement"].discipline,
            Discipline::RoundRobin {
                quantum: NonZeroU32::new(3).unwrap()
            }
        );
    }

    #[test]
    fn test_overrides_applied() {
        let mut cfg = SchedulerConfig::default();
        cfg.apply_overrides(|key| match key {
            "TASKSCHED_TIME_UNIT_MS" => Some("10".into()),
            "TASKSCHED_SEED" => Some(" 42 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.time_unit(), Duration::from_millis(10));
        assert_eq!(cfg.dispatcher.seed, Some(42));
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut cfg = SchedulerConfig::default();
        let err = cfg
            .apply_overrides(|key| (key == "TASKSCHED_IDLE_WAIT_MS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("TASKSCHED_IDLE_WAIT_MS"));
    }

    #[test]
    fn test_zero_override_fails_validation() {
        let mut cfg = SchedulerConfig::default();
        assert!(cfg
            .apply_overrides(|key| (key == "TASKSCHED_TIME_UNIT_MS").then(|| "0".to_string()))
            .is_err());
    }
}
