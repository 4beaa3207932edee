//! Product catalog service

use std::sync::Arc;

use tracing::info;

use crate::application::identity::Caller;
use crate::domain::{DomainError, DomainResult, NewProduct, Product, ProductChanges, RepositoryProvider};

pub struct ProductService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.repos.products().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Product> {
        self.repos
            .products()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    /// Only admins may add products to the catalog.
    pub async fn create(&self, caller: &Caller, product: NewProduct) -> DomainResult<Product> {
        if !caller.is_admin() {
            return Err(DomainError::Forbidden(
                "Only admins can create products".into(),
            ));
        }

        let product = self.repos.products().create(product).await?;
        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: i32, changes: ProductChanges) -> DomainResult<Product> {
        let product = self
            .repos
            .products()
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))?;

        info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// Line items referencing the product go with it.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.products().delete(id).await? {
            return Err(DomainError::not_found("Product", id));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing;
    use crate::domain::UserRole;

    const ADMIN: Caller = Caller {
        user_id: 1,
        role: UserRole::Admin,
    };

    fn lamp() -> NewProduct {
        NewProduct {
            name: "Lamp".into(),
            description: Some("Desk lamp".into()),
            price: 1999,
        }
    }

    #[tokio::test]
    async fn standard_users_cannot_create_products() {
        let svc = ProductService::new(testing::repos().await);
        let caller = Caller {
            user_id: 2,
            role: UserRole::User,
        };
        let err = svc.create(&caller, lamp()).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(ref m) if m == "Only admins can create products"));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_update_delete() {
        let svc = ProductService::new(testing::repos().await);
        let created = svc.create(&ADMIN, lamp()).await.unwrap();
        assert_eq!(created.price, 1999);

        let updated = svc
            .update(created.id, ProductChanges {
                price: Some(2499),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.price, 2499);
        assert_eq!(updated.name, "Lamp");

        svc.delete(created.id).await.unwrap();
        assert!(matches!(
            svc.get(created.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete(created.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
