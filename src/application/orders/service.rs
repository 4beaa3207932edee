//! Order service — composes orders from line items and drives their status

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info};

use crate::domain::{
    DomainError, DomainResult, LineItem, NewOrder, Order, OrderDetails, OrderStatus,
    OrderSummary, RepositoryProvider, TransitionPolicy,
};

/// Input for composing a new order.
#[derive(Debug, Clone, Default)]
pub struct CreateOrder {
    pub user_id: i32,
    /// Raw status literal; `None` means CONFIRMED.
    pub status: Option<String>,
    pub items: Vec<LineItem>,
}

pub struct OrderService {
    repos: Arc<dyn RepositoryProvider>,
    policy: TransitionPolicy,
}

impl OrderService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: TransitionPolicy) -> Self {
        Self { repos, policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Validate the whole request, write header and line items atomically,
    /// then re-read the composed view.
    pub async fn create(&self, input: CreateOrder) -> DomainResult<OrderDetails> {
        let status = match input.status.as_deref() {
            Some(raw) => raw.parse::<OrderStatus>()?,
            None => OrderStatus::default(),
        };
        let order = NewOrder::new(input.user_id, status, input.items)?;
        let item_count = order.items.len();

        let id = self.repos.orders().create(order).await?;
        counter!("orders_created_total").increment(1);
        info!(order_id = id, user_id = input.user_id, items = item_count, %status, "Order created");

        self.get_by_id(id).await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<OrderDetails> {
        self.repos
            .orders()
            .find_details(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    /// Relabel an order's status. The literal is checked before the store is touched.
    pub async fn set_status(&self, id: i32, raw_status: &str) -> DomainResult<Order> {
        let status: OrderStatus = raw_status.parse()?;

        let current = self
            .repos
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        self.policy.check(current.status, status)?;

        if current.status == status {
            debug!(order_id = id, %status, "Order status unchanged");
            return Ok(current);
        }

        let updated = self
            .repos
            .orders()
            .update_status(id, status)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        counter!("order_status_changes_total", "status" => status.as_str()).increment(1);
        info!(order_id = id, from = %current.status, to = %status, "Order status changed");
        Ok(updated)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<OrderSummary>> {
        self.repos.orders().list_summaries().await
    }

    /// Remove the order and its line items as one unit.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.orders().delete(id).await? {
            return Err(DomainError::not_found("Order", id));
        }
        counter!("orders_deleted_total").increment(1);
        info!(order_id = id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing;
    use crate::domain::{NewProduct, NewUser, UserRole};

    struct Fixture {
        repos: Arc<dyn RepositoryProvider>,
        user_id: i32,
        lamp: i32,
        desk: i32,
    }

    async fn fixture() -> Fixture {
        let repos = testing::repos().await;
        let user = repos
            .users()
            .create(NewUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password_hash: "x".into(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        let mut ids = Vec::new();
        for (name, price) in [("Lamp", 1999), ("Desk", 14900)] {
            let p = repos
                .products()
                .create(NewProduct {
                    name: name.into(),
                    description: None,
                    price,
                })
                .await
                .unwrap();
            ids.push(p.id);
        }
        Fixture {
            repos,
            user_id: user.id,
            lamp: ids[0],
            desk: ids[1],
        }
    }

    fn service(f: &Fixture, policy: TransitionPolicy) -> OrderService {
        OrderService::new(f.repos.clone(), policy)
    }

    #[tokio::test]
    async fn create_composes_lines_in_order() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);

        let details = svc
            .create(CreateOrder {
                user_id: f.user_id,
                status: None,
                items: vec![
                    LineItem { product_id: f.lamp, quantity: 2 },
                    LineItem { product_id: f.desk, quantity: 1 },
                ],
            })
            .await
            .unwrap();

        assert_eq!(details.order.status, OrderStatus::Confirmed);
        assert_eq!(details.user.as_ref().map(|u| u.id), Some(f.user_id));
        let quantities: Vec<_> = details.lines.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![2, 1]);
        assert_eq!(details.lines[0].product_name, "Lamp");
        assert_eq!(details.lines[1].price, 14900);
    }

    #[tokio::test]
    async fn duplicate_products_stay_separate_lines() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let details = svc
            .create(CreateOrder {
                user_id: f.user_id,
                status: Some("DELIVERED".into()),
                items: vec![
                    LineItem { product_id: f.lamp, quantity: 1 },
                    LineItem { product_id: f.lamp, quantity: 3 },
                ],
            })
            .await
            .unwrap();
        assert_eq!(details.order.status, OrderStatus::Delivered);
        assert_eq!(details.lines.len(), 2);
    }

    #[tokio::test]
    async fn invalid_status_on_create_writes_nothing() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let err = svc
            .create(CreateOrder {
                user_id: f.user_id,
                status: Some("confirmed".into()),
                items: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_rolls_back_header() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let err = svc
            .create(CreateOrder {
                user_id: f.user_id,
                status: None,
                items: vec![
                    LineItem { product_id: f.lamp, quantity: 1 },
                    LineItem { product_id: 9999, quantity: 1 },
                ],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_status_is_idempotent() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let id = svc
            .create(CreateOrder {
                user_id: f.user_id,
                ..Default::default()
            })
            .await
            .unwrap()
            .order
            .id;

        let first = svc.set_status(id, "CANCELED").await.unwrap();
        let second = svc.set_status(id, "CANCELED").await.unwrap();
        assert_eq!(first.status, OrderStatus::Canceled);
        assert_eq!(second.status, OrderStatus::Canceled);
        assert_eq!(first.user_id, second.user_id);

        // permissive: terminal states can still be relabeled
        let back = svc.set_status(id, "CONFIRMED").await.unwrap();
        assert_eq!(back.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn invalid_status_leaves_order_unchanged() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let id = svc
            .create(CreateOrder {
                user_id: f.user_id,
                ..Default::default()
            })
            .await
            .unwrap()
            .order
            .id;

        let err = svc.set_status(id, "SHIPPED").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be either of the options: CONFIRMED, CANCELED, DELIVERED"
        );
        assert_eq!(svc.get_by_id(id).await.unwrap().order.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn strict_policy_keeps_terminal_states() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Strict);
        let id = svc
            .create(CreateOrder {
                user_id: f.user_id,
                ..Default::default()
            })
            .await
            .unwrap()
            .order
            .id;

        svc.set_status(id, "DELIVERED").await.unwrap();
        let err = svc.set_status(id, "CANCELED").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(svc.get_by_id(id).await.unwrap().order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn set_status_on_missing_order_is_not_found() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let err = svc.set_status(42, "CANCELED").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_order_and_lines() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let id = svc
            .create(CreateOrder {
                user_id: f.user_id,
                status: None,
                items: vec![LineItem { product_id: f.desk, quantity: 4 }],
            })
            .await
            .unwrap()
            .order
            .id;

        svc.delete(id).await.unwrap();
        assert!(matches!(svc.get_by_id(id).await.unwrap_err(), DomainError::NotFound { .. }));
        assert!(matches!(svc.delete(id).await.unwrap_err(), DomainError::NotFound { .. }));
        assert_eq!(f.repos.orders().count_by_user(f.user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let f = fixture().await;
        let svc = service(&f, TransitionPolicy::Permissive);
        let mut ids = Vec::new();
        for qty in 1..=3 {
            let d = svc
                .create(CreateOrder {
                    user_id: f.user_id,
                    status: None,
                    items: vec![LineItem { product_id: f.lamp, quantity: qty }],
                })
                .await
                .unwrap();
            ids.push(d.order.id);
        }

        let listed = svc.list_all().await.unwrap();
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        ids.reverse();
        assert_eq!(listed.iter().map(|o| o.id).collect::<Vec<_>>(), ids);
        assert_eq!(listed[0].products[0].name, "Lamp");
        assert_eq!(listed[0].products[0].quantity, 3);
        assert_eq!(listed[0].user.as_ref().map(|u| u.email.as_str()), Some("ana@example.com"));
    }
}
