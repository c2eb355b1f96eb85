//! Blog feed endpoints.

use api_types::book::LikeToggled;
use api_types::post::{
    PostCommentNew, PostDetail, PostListParams, PostNew, PostUpdate, PostView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use engine::filter::parse_bool;
use engine::page::PageRequest;

use crate::{ServerError, books::page_view, created, server::ServerState, success};

fn post_view(overview: engine::PostOverview) -> PostView {
    PostView {
        id: overview.post.id,
        user_id: overview.post.user_id,
        title: overview.post.title,
        content: overview.post.content,
        book_name: overview.post.book_name,
        book_author: overview.post.book_author,
        likes: overview.likes,
        views: overview.views,
        comments: overview.comments,
        created_at: overview.post.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PostNew>,
) -> Result<impl IntoResponse, ServerError> {
    let post = state
        .engine
        .new_post(
            user.id,
            engine::PostNew {
                title: payload.title,
                content: payload.content,
                book_name: payload.book_name,
                book_author: payload.book_author,
            },
        )
        .await?;

    let detail = state.engine.post_detail(post.id, user.id).await?;
    Ok(created(post_detail_view(detail)))
}

fn post_detail_view(detail: engine::PostDetail) -> PostDetail {
    PostDetail {
        post: post_view(detail.overview),
        liked_by_me: detail.liked_by_me,
        can_update: detail.can_update,
    }
}

pub async fn update(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PostUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .engine
        .update_post(
            id,
            user.id,
            engine::PostUpdate {
                title: payload.title,
                content: payload.content,
                book_name: payload.book_name,
                book_author: payload.book_author,
            },
        )
        .await?;

    let detail = state.engine.post_detail(id, user.id).await?;
    Ok(success(post_detail_view(detail)))
}

pub async fn destroy(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.engine.ban_post(id, user.id).await?;
    Ok(success("Post deleted"))
}

pub async fn list(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Query(params): Query<PostListParams>,
) -> Result<impl IntoResponse, ServerError> {
    let filter = engine::PostListFilter {
        q: params.q.clone(),
        is_popular: parse_bool("is_popular", params.is_popular.as_deref())?.unwrap_or(false),
        page: PageRequest::new(params.page_number, params.page_size)?,
    };
    let page = state.engine.list_posts(filter).await?;
    Ok(success(page_view(page, |overview| Ok(post_view(overview)))?))
}

pub async fn detail(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let detail = state.engine.post_detail(id, user.id).await?;
    Ok(success(post_detail_view(detail)))
}

pub async fn like(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let liked = state.engine.toggle_post_like(id, user.id).await?;
    Ok(success(LikeToggled { liked }))
}

pub async fn comment_create(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PostCommentNew>,
) -> Result<impl IntoResponse, ServerError> {
    let comment = state
        .engine
        .create_post_comment(payload.post_id, user.id, &payload.text)
        .await?;
    Ok(created(api_types::comment::CommentView {
        id: comment.id,
        user_id: comment.user_id,
        text: comment.text,
        likes: 0,
        liked_by_me: false,
        created_at: comment.created_at,
        replies: Vec::new(),
    }))
}

pub async fn comment_destroy(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.engine.ban_post_comment(id, user.id).await?;
    Ok(success("Comment deleted"))
}

pub async fn comment_like(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let liked = state.engine.toggle_post_comment_like(id, user.id).await?;
    Ok(success(LikeToggled { liked }))
}
