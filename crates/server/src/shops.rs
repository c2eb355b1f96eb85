//! Shop endpoints: listing, detail, staff and feedback.

use api_types::shop::{
    FeedbackNew, FeedbackView, ShopDetail, ShopListParams, ShopUpdate, ShopView, StaffAdd,
    StaffView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use engine::filter::parse_param;
use engine::page::PageRequest;

use crate::{ServerError, books::page_view, created, server::ServerState, success};

fn shop_view(shop: engine::shops::Model) -> ShopView {
    ShopView {
        id: shop.id,
        name: shop.name,
        bio: shop.bio,
        image: shop.image,
        owner_id: shop.owner_id,
        phone_number: shop.phone_number,
        telegram: shop.telegram,
        region_id: shop.region_id,
        district_id: shop.district_id,
        location_text: shop.location_text,
        latitude: shop.latitude,
        longitude: shop.longitude,
        star: shop.star,
    }
}

fn staff_view(staff: engine::shop_staff::Model) -> StaffView {
    StaffView {
        id: staff.id,
        shop_id: staff.shop_id,
        user_id: staff.user_id,
        is_active: staff.is_active,
    }
}

pub async fn list(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Query(params): Query<ShopListParams>,
) -> Result<impl IntoResponse, ServerError> {
    let filter = engine::ShopListFilter {
        region: parse_param("region", params.region.as_deref())?,
        district: parse_param("district", params.district.as_deref())?,
        q: params.q.clone(),
        page: PageRequest::new(params.page_number, params.page_size)?,
    };
    let page = state.engine.list_shops(filter).await?;
    Ok(success(page_view(page, |shop| Ok(shop_view(shop)))?))
}

pub async fn detail(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let (shop, can_update) = state.engine.shop_detail(id, user.id).await?;
    Ok(success(ShopDetail {
        shop: shop_view(shop),
        can_update,
    }))
}

pub async fn update(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShopUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    let shop = state
        .engine
        .update_shop(
            id,
            user.id,
            engine::ShopUpdate {
                name: payload.name,
                bio: payload.bio,
                image: payload.image,
                phone_number: payload.phone_number,
                telegram: payload.telegram,
                region_id: payload.region_id,
                district_id: payload.district_id,
                location_text: payload.location_text,
                latitude: payload.latitude,
                longitude: payload.longitude,
            },
        )
        .await?;
    Ok(success(shop_view(shop)))
}

pub async fn staff_add(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<StaffAdd>,
) -> Result<impl IntoResponse, ServerError> {
    let staff = state
        .engine
        .add_shop_staff(user.id, payload.shop_id, payload.user_id)
        .await?;
    Ok(created(staff_view(staff)))
}

pub async fn staff_list(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.list_shop_staff(user.id).await?;
    let views: Vec<StaffView> = rows.into_iter().map(staff_view).collect();
    Ok(success(views))
}

pub async fn staff_remove(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.engine.remove_shop_staff(id, user.id).await?;
    Ok(success("Staff removed"))
}

pub async fn feedback_create(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FeedbackNew>,
) -> Result<impl IntoResponse, ServerError> {
    let feedback = state
        .engine
        .create_shop_feedback(id, user.id, payload.star, payload.message)
        .await?;
    Ok(created(FeedbackView {
        id: feedback.id,
        user_id: feedback.user_id,
        star: feedback.star,
        message: feedback.message,
        created_at: feedback.created_at,
    }))
}

pub async fn feedback_list(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.list_shop_feedback(id).await?;
    let views: Vec<FeedbackView> = rows
        .into_iter()
        .map(|row| FeedbackView {
            id: row.id,
            user_id: row.user_id,
            star: row.star,
            message: row.message,
            created_at: row.created_at,
        })
        .collect();
    Ok(success(views))
}
