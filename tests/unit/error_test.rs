//! Tests for error types

use tasksched::core::SchedulerError;

#[test]
fn test_empty_error() {
    assert_eq!(SchedulerError::Empty.to_string(), "queue empty");
}

#[test]
fn test_invalid_work_item_error() {
    let err = SchedulerError::InvalidWorkItem {
        id: "w-1".into(),
        reason: "service time must be greater than 0".into(),
    };
    assert_eq!(
        err.to_string(),
        "invalid work item w-1: service time must be greater than 0"
    );
}

#[test]
fn test_queue_full_error() {
    let err = SchedulerError::QueueFull("bus".to_string());
    assert_eq!(format!("{err}"), "queue full: bus");
}

#[test]
fn test_service_failed_error() {
    let err = SchedulerError::ServiceFailed {
        station: "Airport".into(),
        reason: "gate closed".into(),
    };
    assert_eq!(err.to_string(), "service failed at Airport: gate closed");
}
