//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: platform identifiers (communities, members, channels, roles, messages)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
