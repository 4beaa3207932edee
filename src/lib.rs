//! # Shop Service
//!
//! REST backend for users, products and orders.
//!
//! ## Architecture
//!
//! - **domain**: entities, order status rules, repository traits
//! - **application**: use-case services (identity, catalog, orders)
//! - **infrastructure**: SeaORM entities, migrations, repositories, crypto
//! - **interfaces**: axum HTTP handlers, DTOs, middleware, router
//! - **shared**: error taxonomy, id parsing, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_router, AppState};
