//! Application layer: use-case orchestration over the domain repositories.
//!
//! HTTP handlers are thin wrappers that delegate to these services.

pub mod catalog;
pub mod identity;
pub mod orders;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::ProductService;
pub use identity::{AuthResult, Caller, ProfileUpdate, UserService};
pub use orders::{CreateOrder, OrderService};
