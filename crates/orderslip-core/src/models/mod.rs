//! Data models: output records and run configuration.

pub mod config;
pub mod document;
