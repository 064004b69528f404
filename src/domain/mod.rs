//! Core domain types and logic.

pub mod price_series;
pub mod timeline;
pub mod config;
pub mod config_validation;
pub mod indicator;
pub mod ranking;
pub mod decision;
pub mod simulate;
pub mod benchmark;
pub mod analytics;
pub mod orders;
pub mod universe;
pub mod error;
