//! Product aggregate

pub mod model;
pub mod repository;

pub use model::{NewProduct, Product, ProductChanges};
pub use repository::ProductRepository;
