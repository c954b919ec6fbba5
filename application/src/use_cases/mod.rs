//! Use cases
//!
//! Application-level operations that orchestrate the API client.

pub mod fan_out;
