use async_trait::async_trait;

use super::{NewUser, User, UserChanges};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn update(&self, id: i32, changes: UserChanges) -> DomainResult<Option<User>>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
