//! Product repository interface

use async_trait::async_trait;

use super::model::{NewProduct, Product, ProductChanges};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: NewProduct) -> DomainResult<Product>;
    async fn find_all(&self) -> DomainResult<Vec<Product>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>>;
    async fn update(&self, id: i32, changes: ProductChanges) -> DomainResult<Option<Product>>;
    /// Removes the product; returns `false` when no row matched.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
