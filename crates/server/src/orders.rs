//! Order endpoints.

use api_types::order::{OrderItemView, OrderNew, OrderStatusUpdate, OrderView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{ServerError, created, server::ServerState, success};

fn map_status(status: engine::OrderStatus) -> api_types::OrderStatus {
    match status {
        engine::OrderStatus::Pending => api_types::OrderStatus::Pending,
        engine::OrderStatus::Confirmed => api_types::OrderStatus::Confirmed,
        engine::OrderStatus::Rejected => api_types::OrderStatus::Rejected,
        engine::OrderStatus::Sold => api_types::OrderStatus::Sold,
    }
}

fn status_to_engine(status: api_types::OrderStatus) -> engine::OrderStatus {
    match status {
        api_types::OrderStatus::Pending => engine::OrderStatus::Pending,
        api_types::OrderStatus::Confirmed => engine::OrderStatus::Confirmed,
        api_types::OrderStatus::Rejected => engine::OrderStatus::Rejected,
        api_types::OrderStatus::Sold => engine::OrderStatus::Sold,
    }
}

fn order_view(overview: engine::OrderOverview) -> Result<OrderView, ServerError> {
    let status = engine::OrderStatus::try_from(overview.order.status.as_str())?;
    Ok(OrderView {
        id: overview.order.id,
        user_id: overview.order.user_id,
        shop_id: overview.order.shop_id,
        status: map_status(status),
        items: overview
            .items
            .into_iter()
            .map(|item| OrderItemView {
                book_id: item.book_id,
                quantity: item.quantity,
            })
            .collect(),
        created_at: overview.order.created_at,
    })
}

pub async fn place(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<OrderNew>,
) -> Result<impl IntoResponse, ServerError> {
    let items = payload
        .items
        .into_iter()
        .map(|item| engine::OrderItemNew {
            book_id: item.book_id,
            quantity: item.quantity.unwrap_or(1),
        })
        .collect();
    let overview = state
        .engine
        .place_order(user.id, payload.shop_id, items)
        .await?;
    Ok(created(order_view(overview)?))
}

pub async fn my_orders(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.user_orders(user.id).await?;
    let views: Vec<OrderView> = rows
        .into_iter()
        .map(order_view)
        .collect::<Result<_, _>>()?;
    Ok(success(views))
}

pub async fn shop_orders(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(shop_id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.shop_orders(shop_id, user.id).await?;
    let views: Vec<OrderView> = rows
        .into_iter()
        .map(order_view)
        .collect::<Result<_, _>>()?;
    Ok(success(views))
}

pub async fn set_status(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    let order = state
        .engine
        .set_order_status(id, user.id, status_to_engine(payload.status))
        .await?;
    let status = engine::OrderStatus::try_from(order.status.as_str())?;
    Ok(success(map_status(status)))
}
