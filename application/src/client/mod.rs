//! API client
//!
//! Turns domain requests into gateway calls. Generation traffic goes through
//! the [`TaskQueue`](crate::queue::TaskQueue); model discovery and model
//! tests go straight to the gateway.

mod api_client;
mod builders;

pub use api_client::ApiClient;
