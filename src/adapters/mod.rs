//! Concrete adapter implementations for ports.

pub mod csv_data_adapter;
pub mod dashboard;
pub mod export_adapter;
pub mod file_config_adapter;
pub mod paper_broker_adapter;
