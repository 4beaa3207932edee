pub mod auth;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;
pub mod request_id;
pub mod users;
