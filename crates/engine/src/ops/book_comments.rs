//! Threaded comments on books.

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, Order, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, ResultEngine, book_comment_likes, book_comments,
};

use super::{Engine, normalize_required_text, with_tx};

pub struct CommentNew {
    pub book_id: i64,
    pub text: String,
    pub parent_id: Option<i64>,
}

pub struct CommentOverview {
    pub comment: book_comments::Model,
    pub likes: u64,
    pub liked_by_me: bool,
    pub replies: Vec<CommentOverview>,
}

impl Engine {
    /// Top-level comments of a book, newest first, replies oldest first.
    pub async fn list_book_comments(
        &self,
        book_id: i64,
        viewer_id: i64,
    ) -> ResultEngine<Vec<CommentOverview>> {
        with_tx!(self, |db_tx| {
            let book = self.require_book(&db_tx, book_id).await?;
            let roots = book_comments::Entity::find()
                .filter(book_comments::Column::BookId.eq(book.id))
                .filter(book_comments::Column::ParentId.is_null())
                .filter(book_comments::Column::IsBanned.eq(false))
                .order_by(book_comments::Column::CreatedAt, Order::Desc)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(roots.len());
            for root in roots {
                let replies = book_comments::Entity::find()
                    .filter(book_comments::Column::ParentId.eq(root.id))
                    .filter(book_comments::Column::IsBanned.eq(false))
                    .order_by(book_comments::Column::CreatedAt, Order::Asc)
                    .all(&db_tx)
                    .await?;

                let mut reply_views = Vec::with_capacity(replies.len());
                for reply in replies {
                    reply_views.push(self.comment_overview(&db_tx, reply, viewer_id, Vec::new()).await?);
                }
                let view = self.comment_overview(&db_tx, root, viewer_id, reply_views).await?;
                out.push(view);
            }
            Ok(out)
        })
    }

    pub async fn create_book_comment(
        &self,
        user_id: i64,
        cmd: CommentNew,
    ) -> ResultEngine<book_comments::Model> {
        with_tx!(self, |db_tx| {
            let book = self.require_book(&db_tx, cmd.book_id).await?;

            if let Some(parent_id) = cmd.parent_id {
                let parent = book_comments::Entity::find_by_id(parent_id)
                    .filter(book_comments::Column::IsBanned.eq(false))
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("comment".to_string()))?;
                if parent.book_id != book.id {
                    return Err(EngineError::InvalidInput(
                        "parent comment belongs to another book".to_string(),
                    ));
                }
            }

            let now = Utc::now();
            let comment = book_comments::ActiveModel {
                book_id: ActiveValue::Set(book.id),
                user_id: ActiveValue::Set(user_id),
                text: ActiveValue::Set(normalize_required_text(&cmd.text, "comment")?),
                parent_id: ActiveValue::Set(cmd.parent_id),
                is_banned: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            Ok(comment.insert(&db_tx).await?)
        })
    }

    /// Authors may soft-delete their own comments.
    pub async fn ban_book_comment(&self, comment_id: i64, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let comment = book_comments::Entity::find_by_id(comment_id)
                .filter(book_comments::Column::IsBanned.eq(false))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("comment".to_string()))?;
            if comment.user_id != user_id {
                return Err(EngineError::Forbidden(
                    "you can only delete your own comment".to_string(),
                ));
            }
            let mut active: book_comments::ActiveModel = comment.into();
            active.is_banned = ActiveValue::Set(true);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub async fn toggle_book_comment_like(
        &self,
        comment_id: i64,
        user_id: i64,
    ) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let comment = book_comments::Entity::find_by_id(comment_id)
                .filter(book_comments::Column::IsBanned.eq(false))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("comment".to_string()))?;

            let existing = book_comment_likes::Entity::find()
                .filter(book_comment_likes::Column::CommentId.eq(comment.id))
                .filter(book_comment_likes::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(like) => {
                    book_comment_likes::Entity::delete_by_id(like.id)
                        .exec(&db_tx)
                        .await?;
                    Ok(false)
                }
                None => {
                    let like = book_comment_likes::ActiveModel {
                        comment_id: ActiveValue::Set(comment.id),
                        user_id: ActiveValue::Set(user_id),
                        created_at: ActiveValue::Set(Utc::now()),
                        ..Default::default()
                    };
                    like.insert(&db_tx).await?;
                    Ok(true)
                }
            }
        })
    }

    async fn comment_overview(
        &self,
        db: &DatabaseTransaction,
        comment: book_comments::Model,
        viewer_id: i64,
        replies: Vec<CommentOverview>,
    ) -> ResultEngine<CommentOverview> {
        let likes = book_comment_likes::Entity::find()
            .filter(book_comment_likes::Column::CommentId.eq(comment.id))
            .count(db)
            .await?;
        let liked_by_me = book_comment_likes::Entity::find()
            .filter(book_comment_likes::Column::CommentId.eq(comment.id))
            .filter(book_comment_likes::Column::UserId.eq(viewer_id))
            .one(db)
            .await?
            .is_some();
        Ok(CommentOverview {
            comment,
            likes,
            liked_by_me,
            replies,
        })
    }
}
