//! Database entities module

pub mod order;
pub mod order_product;
pub mod product;
pub mod user;

pub use order::Entity as Order;
pub use order_product::Entity as OrderProduct;
pub use product::Entity as Product;
pub use user::Entity as User;
