//! Infrastructure - Adapters for persistence, time and configuration.

pub mod autosave;
pub mod character_store;
pub mod clock;
pub mod config;
pub mod ports;
