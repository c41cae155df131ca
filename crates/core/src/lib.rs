//! EasyFin Core - client-side logic for the EasyFin trading simulator.
//!
//! This crate holds the backend gateway, session and token persistence,
//! pre-trade validation and the view controller. Rendering is left to
//! implementations of [`controller::View`].

pub mod account;
pub mod auth;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod format;
pub mod gateway;
pub mod instruments;
pub mod portfolio;
pub mod session;
pub mod trading;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
