//! Portfolio module - positions, totals and order history DTOs.

mod portfolio_model;

pub use portfolio_model::{
    find_position, Order, OrderSide, Portfolio, PortfolioTotals, Position, TradeRequest,
};
