//! Account module - cash account DTOs and the dashboard projection.

mod account_model;

pub use account_model::{Account, CashMovement, DashboardSummary};
