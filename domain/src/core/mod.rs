//! Core domain concepts shared across all subdomains.
//!
//! - [`bounded_set::BoundedSet`]: uniqueness-enforcing collection with set algebra
//! - [`error::DomainError`]: domain-level errors
//! - [`validation::ConfigIssue`]: issues found while validating configuration

pub mod bounded_set;
pub mod error;
pub mod validation;
