//! Reference and static content: geography, categories, banners, FAQs,
//! privacy policies and contact messages.

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, Order, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};

use crate::{
    PolicyType, ResultEngine, banners, categories, contact_messages, districts, faqs,
    privacy_policies, regions, search, sub_categories,
};

use super::{Engine, normalize_required_text, with_tx};

/// The home page shows at most this many banners.
const BANNER_LIMIT: u64 = 7;

impl Engine {
    pub async fn regions(&self) -> ResultEngine<Vec<regions::Model>> {
        with_tx!(self, |db_tx| {
            Ok(regions::Entity::find()
                .order_by(regions::Column::Name, Order::Asc)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn districts(&self, region_id: i64) -> ResultEngine<Vec<districts::Model>> {
        with_tx!(self, |db_tx| {
            Ok(districts::Entity::find()
                .filter(districts::Column::RegionId.eq(region_id))
                .order_by(districts::Column::Name, Order::Asc)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn categories(&self) -> ResultEngine<Vec<categories::Model>> {
        with_tx!(self, |db_tx| {
            Ok(categories::Entity::find()
                .order_by(categories::Column::Name, Order::Asc)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn sub_categories(
        &self,
        category_id: Option<i64>,
        q: Option<&str>,
    ) -> ResultEngine<Vec<sub_categories::Model>> {
        with_tx!(self, |db_tx| {
            let mut select = sub_categories::Entity::find();
            if let Some(category_id) = category_id {
                select = select.filter(sub_categories::Column::CategoryId.eq(category_id));
            }
            if let Some(q) = q {
                let mut condition = Condition::any();
                for token in search::tokens(q) {
                    for variant in search::token_variants(&token) {
                        condition =
                            condition.add(sub_categories::Column::Name.contains(variant.as_str()));
                    }
                }
                select = select.filter(condition);
            }
            Ok(select
                .order_by(sub_categories::Column::Name, Order::Asc)
                .all(&db_tx)
                .await?)
        })
    }

    /// Newest active banners, capped for the home page.
    pub async fn banners(&self) -> ResultEngine<Vec<banners::Model>> {
        with_tx!(self, |db_tx| {
            Ok(banners::Entity::find()
                .filter(banners::Column::IsActive.eq(true))
                .order_by(banners::Column::CreatedAt, Order::Desc)
                .limit(BANNER_LIMIT)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn faqs(&self) -> ResultEngine<Vec<faqs::Model>> {
        with_tx!(self, |db_tx| {
            Ok(faqs::Entity::find()
                .filter(faqs::Column::IsActive.eq(true))
                .order_by(faqs::Column::CreatedAt, Order::Desc)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn privacy_policies(
        &self,
        policy_type: Option<PolicyType>,
    ) -> ResultEngine<Vec<privacy_policies::Model>> {
        with_tx!(self, |db_tx| {
            let mut select =
                privacy_policies::Entity::find().filter(privacy_policies::Column::IsActive.eq(true));
            if let Some(policy_type) = policy_type {
                select = select
                    .filter(privacy_policies::Column::PolicyType.eq(policy_type.as_str()));
            }
            Ok(select
                .order_by(privacy_policies::Column::CreatedAt, Order::Desc)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn submit_contact(
        &self,
        user_id: Option<i64>,
        message: &str,
        phone: Option<String>,
    ) -> ResultEngine<contact_messages::Model> {
        with_tx!(self, |db_tx| {
            let row = contact_messages::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                phone: ActiveValue::Set(phone),
                message: ActiveValue::Set(normalize_required_text(message, "message")?),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            Ok(row.insert(&db_tx).await?)
        })
    }
}
