pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod reporting;
