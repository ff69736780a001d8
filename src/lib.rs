//! Filtering and aggregation of UK railway ticket sales for the dashboard.

pub mod config;
pub mod data;
