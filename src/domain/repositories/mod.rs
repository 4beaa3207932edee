//! Repository access for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories so services only ask for the one they need.

use super::order::OrderRepository;
use super::product::ProductRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
///     let user = repos.users().find_by_id(1).await?;
///     let order = repos.orders().find_details(3).await?;
///     Ok(())
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn products(&self) -> &dyn ProductRepository;
    fn orders(&self) -> &dyn OrderRepository;
}
