//! Orders module — compose, inspect, relabel, list and delete orders

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
