//! Book comment endpoints.

use api_types::book::LikeToggled;
use api_types::comment::{BookCommentNew, BookCommentParams, CommentView};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use engine::filter::parse_param;

use crate::{ServerError, created, server::ServerState, success};

fn comment_view(overview: engine::CommentOverview) -> CommentView {
    CommentView {
        id: overview.comment.id,
        user_id: overview.comment.user_id,
        text: overview.comment.text,
        likes: overview.likes,
        liked_by_me: overview.liked_by_me,
        created_at: overview.comment.created_at,
        replies: overview.replies.into_iter().map(comment_view).collect(),
    }
}

pub async fn list(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Query(params): Query<BookCommentParams>,
) -> Result<impl IntoResponse, ServerError> {
    let book_id: i64 = parse_param("book", params.book.as_deref())?
        .ok_or_else(|| ServerError::Generic("book query parameter is required".to_string()))?;
    let comments = state.engine.list_book_comments(book_id, user.id).await?;
    let views: Vec<CommentView> = comments.into_iter().map(comment_view).collect();
    Ok(success(views))
}

pub async fn create(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BookCommentNew>,
) -> Result<impl IntoResponse, ServerError> {
    let comment = state
        .engine
        .create_book_comment(
            user.id,
            engine::CommentNew {
                book_id: payload.book_id,
                text: payload.text,
                parent_id: payload.parent_id,
            },
        )
        .await?;

    Ok(created(CommentView {
        id: comment.id,
        user_id: comment.user_id,
        text: comment.text,
        likes: 0,
        liked_by_me: false,
        created_at: comment.created_at,
        replies: Vec::new(),
    }))
}

pub async fn destroy(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.engine.ban_book_comment(id, user.id).await?;
    Ok(success("Comment deleted"))
}

pub async fn like(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let liked = state.engine.toggle_book_comment_like(id, user.id).await?;
    Ok(success(LikeToggled { liked }))
}
