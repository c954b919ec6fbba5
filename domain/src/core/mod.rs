//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — a model identifier as reported by the endpoint
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
