//! Users table.
//!
//! Accounts are provisioned by the companion telegram bot, so
//! `telegram_id` is required while `phone_number` stays empty until the
//! user shares it. `login_time` is re-stamped on every login/refresh and
//! embedded in tokens; a mismatch invalidates older tokens.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub telegram_id: String,
    #[sea_orm(unique)]
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub language: String,
    pub picture: Option<String>,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_text: Option<String>,
    pub phone_is_visible: bool,
    pub location_is_visible: bool,
    pub is_active: bool,
    pub login_time: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::regions::Entity",
        from = "Column::RegionId",
        to = "super::regions::Column::Id"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::districts::Entity",
        from = "Column::DistrictId",
        to = "super::districts::Column::Id"
    )]
    District,
}

impl ActiveModelBehavior for ActiveModel {}
