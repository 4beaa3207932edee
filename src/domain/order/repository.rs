//! Order repository interface

use async_trait::async_trait;

use super::model::{NewOrder, Order, OrderDetails, OrderSummary};
use super::status::OrderStatus;
use crate::domain::DomainResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the header and all line items atomically; returns the new id.
    async fn create(&self, order: NewOrder) -> DomainResult<i32>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Order>>;
    async fn find_details(&self, id: i32) -> DomainResult<Option<OrderDetails>>;
    async fn update_status(&self, id: i32, status: OrderStatus) -> DomainResult<Option<Order>>;
    /// Removes line items and header atomically; `false` when no header matched.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
    /// Every order, newest first, with user and product summaries.
    async fn list_summaries(&self) -> DomainResult<Vec<OrderSummary>>;
    async fn count_by_user(&self, user_id: i32) -> DomainResult<u64>;
}
