//! Shared lookup and permission helpers.
//!
//! Every `require_*` returns the model when access is granted and the
//! matching `EngineError` otherwise, so operation code stays linear.

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, ShopRole, books, shop_staff, shops, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_user(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .filter(users::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }

    pub(super) async fn require_user_by_telegram(
        &self,
        db: &DatabaseTransaction,
        telegram_id: &str,
    ) -> ResultEngine<users::Model> {
        users::Entity::find()
            .filter(users::Column::TelegramId.eq(telegram_id))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }

    pub(super) async fn require_active_shop(
        &self,
        db: &DatabaseTransaction,
        shop_id: i64,
    ) -> ResultEngine<shops::Model> {
        shops::Entity::find_by_id(shop_id)
            .filter(shops::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("shop".to_string()))
    }

    /// Relation of `user_id` to the shop: owner, active staff, or none.
    pub(super) async fn shop_role(
        &self,
        db: &DatabaseTransaction,
        shop_id: i64,
        user_id: i64,
    ) -> ResultEngine<Option<ShopRole>> {
        let shop = self.require_active_shop(db, shop_id).await?;
        if shop.owner_id == user_id {
            return Ok(Some(ShopRole::Owner));
        }
        let staffed = shop_staff::Entity::find()
            .filter(shop_staff::Column::ShopId.eq(shop_id))
            .filter(shop_staff::Column::UserId.eq(user_id))
            .filter(shop_staff::Column::IsActive.eq(true))
            .one(db)
            .await?
            .is_some();
        Ok(staffed.then_some(ShopRole::Staff))
    }

    pub(super) async fn require_shop_owner(
        &self,
        db: &DatabaseTransaction,
        shop_id: i64,
        user_id: i64,
    ) -> ResultEngine<shops::Model> {
        let shop = self.require_active_shop(db, shop_id).await?;
        if shop.owner_id != user_id {
            return Err(EngineError::Forbidden(
                "you are not the owner of this shop".to_string(),
            ));
        }
        Ok(shop)
    }

    pub(super) async fn require_shop_member(
        &self,
        db: &DatabaseTransaction,
        shop_id: i64,
        user_id: i64,
    ) -> ResultEngine<ShopRole> {
        self.shop_role(db, shop_id, user_id).await?.ok_or_else(|| {
            EngineError::Forbidden("you are not a member of this shop".to_string())
        })
    }

    /// The active shop a user posts for: an owned shop wins over a staffed
    /// one.
    pub(super) async fn user_active_shop(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<Option<shops::Model>> {
        if let Some(owned) = shops::Entity::find()
            .filter(shops::Column::OwnerId.eq(user_id))
            .filter(shops::Column::IsActive.eq(true))
            .one(db)
            .await?
        {
            return Ok(Some(owned));
        }

        let Some(staff_row) = shop_staff::Entity::find()
            .filter(shop_staff::Column::UserId.eq(user_id))
            .filter(shop_staff::Column::IsActive.eq(true))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        Ok(shops::Entity::find_by_id(staff_row.shop_id)
            .filter(shops::Column::IsActive.eq(true))
            .one(db)
            .await?)
    }

    pub(super) async fn require_book(
        &self,
        db: &DatabaseTransaction,
        book_id: i64,
    ) -> ResultEngine<books::Model> {
        books::Entity::find_by_id(book_id)
            .filter(books::Column::IsBanned.eq(false))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("book".to_string()))
    }

    /// A book may be edited by its poster or by the owner of the shop it is
    /// listed under.
    pub(super) async fn can_edit_book(
        &self,
        db: &DatabaseTransaction,
        book: &books::Model,
        user_id: i64,
    ) -> ResultEngine<bool> {
        if book.posted_by == user_id {
            return Ok(true);
        }
        let Some(shop_id) = book.shop_id else {
            return Ok(false);
        };
        let shop = shops::Entity::find_by_id(shop_id).one(db).await?;
        Ok(shop.is_some_and(|shop| shop.owner_id == user_id))
    }

    pub(super) async fn require_book_editable(
        &self,
        db: &DatabaseTransaction,
        book_id: i64,
        user_id: i64,
    ) -> ResultEngine<books::Model> {
        let book = self.require_book(db, book_id).await?;
        if !self.can_edit_book(db, &book, user_id).await? {
            return Err(EngineError::Forbidden(
                "you can only modify your own book".to_string(),
            ));
        }
        Ok(book)
    }
}
