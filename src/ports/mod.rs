//! Port traits decoupling the domain from infrastructure.

pub mod broker_port;
pub mod config_port;
pub mod data_port;
pub mod report_port;
