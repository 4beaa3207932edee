//! SeaORM implementation of OrderRepository
//!
//! Header and line items are written and removed inside one database
//! transaction; reads compose the header with its user and products.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    DomainResult, NewOrder, Order, OrderDetails, OrderLine, OrderRepository, OrderStatus,
    OrderSummary, ProductQuantity, UserSummary,
};
use crate::infrastructure::database::entities::{order, order_product, product, user};

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: OrderStatus) -> order::OrderStatus {
    match status {
        OrderStatus::Confirmed => order::OrderStatus::Confirmed,
        OrderStatus::Canceled => order::OrderStatus::Canceled,
        OrderStatus::Delivered => order::OrderStatus::Delivered,
    }
}

fn status_from_entity(status: order::OrderStatus) -> OrderStatus {
    match status {
        order::OrderStatus::Confirmed => OrderStatus::Confirmed,
        order::OrderStatus::Canceled => OrderStatus::Canceled,
        order::OrderStatus::Delivered => OrderStatus::Delivered,
    }
}

fn order_from_model(model: order::Model) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        status: status_from_entity(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn user_summary(model: user::Model) -> UserSummary {
    UserSummary {
        id: model.id,
        name: model.name,
        email: model.email,
    }
}

/// Line items of the given orders joined with their products, by line id.
async fn load_lines<C: ConnectionTrait>(
    db: &C,
    order_ids: &[i32],
) -> DomainResult<Vec<(order_product::Model, product::Model)>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = order_product::Entity::find()
        .find_also_related(product::Entity)
        .filter(order_product::Column::OrderId.is_in(order_ids.iter().copied()))
        .order_by_asc(order_product::Column::Id)
        .all(db)
        .await?;

    // Product rows cascade into line items, so a missing product means a
    // concurrent delete; the line is skipped.
    Ok(rows
        .into_iter()
        .filter_map(|(item, product)| product.map(|p| (item, p)))
        .collect())
}

// ── OrderRepository impl ────────────────────────────────────────

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn create(&self, new_order: NewOrder) -> DomainResult<i32> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let header = order::ActiveModel {
            id: NotSet,
            user_id: Set(new_order.user_id),
            status: Set(status_to_entity(new_order.status)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if !new_order.items.is_empty() {
            let rows = new_order.items.iter().map(|item| order_product::ActiveModel {
                id: NotSet,
                order_id: Set(header.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
            });
            order_product::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        debug!(order_id = header.id, items = new_order.items.len(), "Order committed");
        Ok(header.id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Order>> {
        let model = order::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(order_from_model))
    }

    async fn find_details(&self, id: i32) -> DomainResult<Option<OrderDetails>> {
        let Some((header, owner)) = order::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let lines = load_lines(&self.db, &[header.id])
            .await?
            .into_iter()
            .map(|(item, product)| OrderLine {
                line_item_id: item.id,
                product_id: product.id,
                product_name: product.name,
                price: product.price,
                quantity: item.quantity,
            })
            .collect();

        Ok(Some(OrderDetails {
            order: order_from_model(header),
            user: owner.map(user_summary),
            lines,
        }))
    }

    async fn update_status(&self, id: i32, status: OrderStatus) -> DomainResult<Option<Order>> {
        let Some(existing) = order::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(status_to_entity(status));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(order_from_model(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let txn = self.db.begin().await?;

        let items = order_product::Entity::delete_many()
            .filter(order_product::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        let header = order::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        debug!(
            order_id = id,
            items = items.rows_affected,
            "Order delete committed"
        );
        Ok(header.rows_affected > 0)
    }

    async fn list_summaries(&self) -> DomainResult<Vec<OrderSummary>> {
        let headers = order::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .all(&self.db)
            .await?;

        let ids: Vec<i32> = headers.iter().map(|(o, _)| o.id).collect();
        let mut products: HashMap<i32, Vec<ProductQuantity>> = HashMap::new();
        for (item, product) in load_lines(&self.db, &ids).await? {
            products
                .entry(item.order_id)
                .or_default()
                .push(ProductQuantity {
                    name: product.name,
                    quantity: item.quantity,
                });
        }

        Ok(headers
            .into_iter()
            .map(|(header, owner)| OrderSummary {
                id: header.id,
                status: status_from_entity(header.status),
                created_at: header.created_at,
                user: owner.map(user_summary),
                products: products.remove(&header.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn count_by_user(&self, user_id: i32) -> DomainResult<u64> {
        let count = order::Entity::find()
            .filter(order::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
