//! Orders placed against shops.

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, Order as SortOrder, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};

use crate::{
    EngineError, OrderStatus, ResultEngine, books, order_items, orders,
};

use super::{Engine, with_tx};

pub struct OrderItemNew {
    pub book_id: i64,
    pub quantity: i32,
}

#[derive(Debug)]
pub struct OrderOverview {
    pub order: orders::Model,
    pub items: Vec<order_items::Model>,
}

impl Engine {
    /// Place an order. Every item must reference an active, non-banned
    /// book of the ordered shop; order and items are written atomically.
    pub async fn place_order(
        &self,
        user_id: i64,
        shop_id: i64,
        items: Vec<OrderItemNew>,
    ) -> ResultEngine<OrderOverview> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let shop = self.require_active_shop(&db_tx, shop_id).await?;

            if items.is_empty() {
                return Err(EngineError::InvalidInput(
                    "order must contain at least one item".to_string(),
                ));
            }

            for item in &items {
                if item.quantity < 1 {
                    return Err(EngineError::InvalidInput(
                        "quantity must be at least 1".to_string(),
                    ));
                }
                let book = books::Entity::find_by_id(item.book_id)
                    .filter(books::Column::IsBanned.eq(false))
                    .filter(books::Column::IsActive.eq(true))
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("book".to_string()))?;
                if book.shop_id != Some(shop.id) {
                    return Err(EngineError::InvalidInput(format!(
                        "book {} is not sold by this shop",
                        book.id
                    )));
                }
            }

            let now = Utc::now();
            let order = orders::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                shop_id: ActiveValue::Set(shop.id),
                status: ActiveValue::Set(OrderStatus::Pending.as_str().to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            let order = order.insert(&db_tx).await?;

            let mut stored = Vec::with_capacity(items.len());
            for item in items {
                let row = order_items::ActiveModel {
                    order_id: ActiveValue::Set(order.id),
                    book_id: ActiveValue::Set(item.book_id),
                    quantity: ActiveValue::Set(item.quantity),
                    ..Default::default()
                };
                stored.push(row.insert(&db_tx).await?);
            }

            Ok(OrderOverview {
                order,
                items: stored,
            })
        })
    }

    /// Orders the caller placed, newest first.
    pub async fn user_orders(&self, user_id: i64) -> ResultEngine<Vec<OrderOverview>> {
        with_tx!(self, |db_tx| {
            let rows = orders::Entity::find()
                .filter(orders::Column::UserId.eq(user_id))
                .order_by(orders::Column::CreatedAt, SortOrder::Desc)
                .all(&db_tx)
                .await?;
            self.with_items(&db_tx, rows).await
        })
    }

    /// Orders of a shop, visible to its owner and active staff.
    pub async fn shop_orders(&self, shop_id: i64, actor_id: i64) -> ResultEngine<Vec<OrderOverview>> {
        with_tx!(self, |db_tx| {
            self.require_shop_member(&db_tx, shop_id, actor_id).await?;
            let rows = orders::Entity::find()
                .filter(orders::Column::ShopId.eq(shop_id))
                .order_by(orders::Column::CreatedAt, SortOrder::Desc)
                .all(&db_tx)
                .await?;
            self.with_items(&db_tx, rows).await
        })
    }

    /// Shop owner/staff move an order through its lifecycle. Buyers cannot
    /// change status.
    pub async fn set_order_status(
        &self,
        order_id: i64,
        actor_id: i64,
        status: OrderStatus,
    ) -> ResultEngine<orders::Model> {
        with_tx!(self, |db_tx| {
            let order = orders::Entity::find_by_id(order_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("order".to_string()))?;

            let role = self.require_shop_member(&db_tx, order.shop_id, actor_id).await?;
            if !role.can_manage_orders() {
                return Err(EngineError::Forbidden(
                    "you cannot manage orders of this shop".to_string(),
                ));
            }

            let mut active: orders::ActiveModel = order.into();
            active.status = ActiveValue::Set(status.as_str().to_string());
            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }

    async fn with_items(
        &self,
        db: &DatabaseTransaction,
        rows: Vec<orders::Model>,
    ) -> ResultEngine<Vec<OrderOverview>> {
        let mut out = Vec::with_capacity(rows.len());
        for order in rows {
            let items = order_items::Entity::find()
                .filter(order_items::Column::OrderId.eq(order.id))
                .all(db)
                .await?;
            out.push(OrderOverview { order, items });
        }
        Ok(out)
    }
}
