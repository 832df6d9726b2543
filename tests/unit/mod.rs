//! Unit tests for individual components

mod config_test;
mod error_test;
mod ledger_test;
mod source_test;
