//! Reference and static content endpoints.

use api_types::base::{
    BannerView, ContactNew, DistrictView, FaqView, PolicyParams, PolicyView, RegionView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{ServerError, created, server::ServerState, success};

fn map_policy_type(policy_type: engine::PolicyType) -> api_types::PolicyType {
    match policy_type {
        engine::PolicyType::Public => api_types::PolicyType::Public,
        engine::PolicyType::Bookshop => api_types::PolicyType::Bookshop,
        engine::PolicyType::Library => api_types::PolicyType::Library,
    }
}

pub async fn regions(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.regions().await?;
    let views: Vec<RegionView> = rows
        .into_iter()
        .map(|row| RegionView {
            id: row.id,
            name: row.name,
        })
        .collect();
    Ok(success(views))
}

pub async fn districts(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.districts(id).await?;
    let views: Vec<DistrictView> = rows
        .into_iter()
        .map(|row| DistrictView {
            id: row.id,
            name: row.name,
            region_id: row.region_id,
        })
        .collect();
    Ok(success(views))
}

pub async fn banners(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.banners().await?;
    let views: Vec<BannerView> = rows
        .into_iter()
        .map(|row| BannerView {
            id: row.id,
            title: row.title,
            picture: row.picture,
        })
        .collect();
    Ok(success(views))
}

pub async fn faqs(State(state): State<ServerState>) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.faqs().await?;
    let views: Vec<FaqView> = rows
        .into_iter()
        .map(|row| FaqView {
            id: row.id,
            question: row.question,
            answer: row.answer,
        })
        .collect();
    Ok(success(views))
}

pub async fn privacy_policies(
    State(state): State<ServerState>,
    Query(params): Query<PolicyParams>,
) -> Result<impl IntoResponse, ServerError> {
    let policy_type = match params.policy_type.as_deref() {
        Some(raw) => Some(engine::PolicyType::try_from(raw)?),
        None => None,
    };
    let rows = state.engine.privacy_policies(policy_type).await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(PolicyView {
            id: row.id,
            policy_type: map_policy_type(engine::PolicyType::try_from(row.policy_type.as_str())?),
            content: row.content,
        });
    }
    Ok(success(views))
}

pub async fn contact_us(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ContactNew>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .engine
        .submit_contact(Some(user.id), &payload.message, payload.phone)
        .await?;
    Ok(created("Message received"))
}
