//! Shops, their staff and moderated feedback.

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, Order, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Page, PageRequest, ResultEngine, search, shop_feedbacks, shop_staff, shops,
};

use super::{Engine, normalize_optional_text, with_tx};

#[derive(Default)]
pub struct ShopListFilter {
    pub region: Option<i64>,
    pub district: Option<i64>,
    pub q: Option<String>,
    pub page: PageRequest,
}

#[derive(Default)]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub phone_number: Option<String>,
    pub telegram: Option<String>,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub location_text: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Engine {
    pub async fn list_shops(&self, filter: ShopListFilter) -> ResultEngine<Page<shops::Model>> {
        with_tx!(self, |db_tx| {
            let mut select = shops::Entity::find().filter(shops::Column::IsActive.eq(true));

            if let Some(region) = filter.region {
                select = select.filter(shops::Column::RegionId.eq(region));
            }
            if let Some(district) = filter.district {
                select = select.filter(shops::Column::DistrictId.eq(district));
            }
            if let Some(q) = filter.q.as_deref() {
                let mut condition = Condition::any();
                for token in search::tokens(q) {
                    for variant in search::token_variants(&token) {
                        condition = condition
                            .add(shops::Column::Name.contains(variant.as_str()))
                            .add(shops::Column::PhoneNumber.contains(variant.as_str()));
                    }
                }
                select = select.filter(condition);
            }

            let select = select.order_by(shops::Column::CreatedAt, Order::Desc);
            let paginator = select.paginate(&db_tx, filter.page.page_size);
            let total = paginator.num_items().await?;
            let content = paginator.fetch_page(filter.page.page_number - 1).await?;
            Ok(Page::new(filter.page, total, content))
        })
    }

    /// Detail of an active shop; the flag tells the caller whether they may
    /// edit it.
    pub async fn shop_detail(
        &self,
        shop_id: i64,
        viewer_id: i64,
    ) -> ResultEngine<(shops::Model, bool)> {
        with_tx!(self, |db_tx| {
            let shop = self.require_active_shop(&db_tx, shop_id).await?;
            let can_update = shop.owner_id == viewer_id;
            Ok((shop, can_update))
        })
    }

    pub async fn update_shop(
        &self,
        shop_id: i64,
        user_id: i64,
        cmd: ShopUpdate,
    ) -> ResultEngine<shops::Model> {
        with_tx!(self, |db_tx| {
            let shop = self.require_shop_owner(&db_tx, shop_id, user_id).await?;
            let mut active: shops::ActiveModel = shop.into();

            if let Some(name) = normalize_optional_text(cmd.name.as_deref()) {
                active.name = ActiveValue::Set(name);
            }
            if let Some(bio) = cmd.bio {
                active.bio = ActiveValue::Set(bio);
            }
            if let Some(image) = cmd.image {
                active.image = ActiveValue::Set(Some(image));
            }
            if let Some(phone_number) = cmd.phone_number {
                active.phone_number = ActiveValue::Set(phone_number);
            }
            if let Some(telegram) = cmd.telegram {
                active.telegram = ActiveValue::Set(Some(telegram));
            }
            if let Some(region_id) = cmd.region_id {
                active.region_id = ActiveValue::Set(region_id);
            }
            if let Some(district_id) = cmd.district_id {
                active.district_id = ActiveValue::Set(district_id);
            }
            if let Some(location_text) = cmd.location_text {
                active.location_text = ActiveValue::Set(Some(location_text));
            }
            if let Some(latitude) = cmd.latitude {
                active.latitude = ActiveValue::Set(Some(latitude));
            }
            if let Some(longitude) = cmd.longitude {
                active.longitude = ActiveValue::Set(Some(longitude));
            }

            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Owner adds a staff member. Re-adding an inactive row reactivates it.
    pub async fn add_shop_staff(
        &self,
        owner_id: i64,
        shop_id: i64,
        user_id: i64,
    ) -> ResultEngine<shop_staff::Model> {
        with_tx!(self, |db_tx| {
            self.require_shop_owner(&db_tx, shop_id, owner_id).await?;
            self.require_user(&db_tx, user_id).await?;

            let existing = shop_staff::Entity::find()
                .filter(shop_staff::Column::ShopId.eq(shop_id))
                .filter(shop_staff::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(row) if row.is_active => {
                    Err(EngineError::ExistingKey("shop staff".to_string()))
                }
                Some(row) => {
                    let mut active: shop_staff::ActiveModel = row.into();
                    active.is_active = ActiveValue::Set(true);
                    Ok(active.update(&db_tx).await?)
                }
                None => {
                    let staff = shop_staff::ActiveModel {
                        shop_id: ActiveValue::Set(shop_id),
                        user_id: ActiveValue::Set(user_id),
                        is_active: ActiveValue::Set(true),
                        created_at: ActiveValue::Set(Utc::now()),
                        ..Default::default()
                    };
                    Ok(staff.insert(&db_tx).await?)
                }
            }
        })
    }

    /// Active staff of the shops the caller owns.
    pub async fn list_shop_staff(&self, owner_id: i64) -> ResultEngine<Vec<shop_staff::Model>> {
        with_tx!(self, |db_tx| {
            let owned: Vec<i64> = shops::Entity::find()
                .filter(shops::Column::OwnerId.eq(owner_id))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|shop| shop.id)
                .collect();

            Ok(shop_staff::Entity::find()
                .filter(shop_staff::Column::ShopId.is_in(owned))
                .filter(shop_staff::Column::IsActive.eq(true))
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn remove_shop_staff(&self, staff_id: i64, owner_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let staff = shop_staff::Entity::find_by_id(staff_id)
                .filter(shop_staff::Column::IsActive.eq(true))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("shop staff".to_string()))?;
            self.require_shop_owner(&db_tx, staff.shop_id, owner_id).await?;

            let mut active: shop_staff::ActiveModel = staff.into();
            active.is_active = ActiveValue::Set(false);
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Feedback lands inactive and becomes public after moderation.
    pub async fn create_shop_feedback(
        &self,
        shop_id: i64,
        user_id: i64,
        star: i32,
        message: Option<String>,
    ) -> ResultEngine<shop_feedbacks::Model> {
        with_tx!(self, |db_tx| {
            let shop = self.require_active_shop(&db_tx, shop_id).await?;
            if !(1..=5).contains(&star) {
                return Err(EngineError::InvalidInput(
                    "star must be between 1 and 5".to_string(),
                ));
            }

            let feedback = shop_feedbacks::ActiveModel {
                shop_id: ActiveValue::Set(shop.id),
                user_id: ActiveValue::Set(user_id),
                star: ActiveValue::Set(star),
                message: ActiveValue::Set(normalize_optional_text(message.as_deref())),
                is_active: ActiveValue::Set(false),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            Ok(feedback.insert(&db_tx).await?)
        })
    }

    pub async fn list_shop_feedback(
        &self,
        shop_id: i64,
    ) -> ResultEngine<Vec<shop_feedbacks::Model>> {
        with_tx!(self, |db_tx| {
            let shop = self.require_active_shop(&db_tx, shop_id).await?;
            Ok(shop_feedbacks::Entity::find()
                .filter(shop_feedbacks::Column::ShopId.eq(shop.id))
                .filter(shop_feedbacks::Column::IsActive.eq(true))
                .order_by(shop_feedbacks::Column::CreatedAt, Order::Desc)
                .all(&db_tx)
                .await?)
        })
    }
}
