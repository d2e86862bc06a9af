//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod accusation;
pub mod community_settings;
pub mod error_kind;
pub mod knockout;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
