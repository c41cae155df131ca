//! Session module - the bearer token and its durable store.

mod session_context;
mod token_store;

pub use session_context::Session;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
