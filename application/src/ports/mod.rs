//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod activity;
pub mod audit_logger;
pub mod directory;
pub mod platform;
pub mod settings_repository;
