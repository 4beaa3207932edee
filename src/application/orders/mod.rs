//! Orders module — composing, relabeling, listing and deleting orders

pub mod service;

pub use service::{CreateOrder, OrderService};
