//! Gateway module - the backend seam and its HTTP implementation.

mod client;
mod gateway_traits;

pub use client::{ApiClient, ResponseBody};
pub use gateway_traits::BackendGateway;
