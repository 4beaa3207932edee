//! Catalog module — product management

pub mod service;

pub use service::ProductService;
