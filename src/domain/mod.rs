//! Domain layer: entities, value types and repository interfaces.
//!
//! Each aggregate lives in its own module with a `model` and a
//! `repository` trait. Persistence implementations live in
//! `infrastructure::database::repositories`.

pub mod order;
pub mod product;
pub mod repositories;
pub mod user;

pub use order::{
    LineItem, NewOrder, Order, OrderDetails, OrderLine, OrderRepository, OrderStatus,
    OrderSummary, ProductQuantity, TransitionPolicy, UserSummary,
};
pub use product::{NewProduct, Product, ProductChanges, ProductRepository};
pub use repositories::RepositoryProvider;
pub use user::{NewUser, User, UserChanges, UserRepository, UserRole};

pub use crate::shared::errors::{DomainError, DomainResult};
