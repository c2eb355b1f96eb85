//! Blog feed posts, their comments and social actions.

use chrono::{TimeDelta, Utc};
use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, Order, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};

use crate::{
    EngineError, Page, PageRequest, ResultEngine, post_comment_likes, post_comments, post_likes,
    post_views, posts, search,
};

use super::{Engine, normalize_required_text, with_tx};

/// Posts created within this window count as "popular" candidates.
const POPULAR_WINDOW_DAYS: i64 = 3;

pub struct PostNew {
    pub title: String,
    pub content: String,
    pub book_name: String,
    pub book_author: String,
}

#[derive(Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub book_name: Option<String>,
    pub book_author: Option<String>,
}

#[derive(Default)]
pub struct PostListFilter {
    pub q: Option<String>,
    pub is_popular: bool,
    pub page: PageRequest,
}

pub struct PostOverview {
    pub post: posts::Model,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
}

pub struct PostDetail {
    pub overview: PostOverview,
    pub liked_by_me: bool,
    pub can_update: bool,
}

impl Engine {
    pub async fn new_post(&self, user_id: i64, cmd: PostNew) -> ResultEngine<posts::Model> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let now = Utc::now();
            let post = posts::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                title: ActiveValue::Set(normalize_required_text(&cmd.title, "title")?),
                content: ActiveValue::Set(normalize_required_text(&cmd.content, "content")?),
                book_name: ActiveValue::Set(normalize_required_text(&cmd.book_name, "book name")?),
                book_author: ActiveValue::Set(normalize_required_text(
                    &cmd.book_author,
                    "book author",
                )?),
                is_active: ActiveValue::Set(true),
                is_banned: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            Ok(post.insert(&db_tx).await?)
        })
    }

    pub async fn update_post(
        &self,
        post_id: i64,
        user_id: i64,
        cmd: PostUpdate,
    ) -> ResultEngine<posts::Model> {
        with_tx!(self, |db_tx| {
            let post = self.require_own_post(&db_tx, post_id, user_id).await?;
            let mut active: posts::ActiveModel = post.into();
            if let Some(title) = cmd.title.as_deref() {
                active.title = ActiveValue::Set(normalize_required_text(title, "title")?);
            }
            if let Some(content) = cmd.content.as_deref() {
                active.content = ActiveValue::Set(normalize_required_text(content, "content")?);
            }
            if let Some(book_name) = cmd.book_name.as_deref() {
                active.book_name =
                    ActiveValue::Set(normalize_required_text(book_name, "book name")?);
            }
            if let Some(book_author) = cmd.book_author.as_deref() {
                active.book_author =
                    ActiveValue::Set(normalize_required_text(book_author, "book author")?);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }

    pub async fn ban_post(&self, post_id: i64, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let post = self.require_own_post(&db_tx, post_id, user_id).await?;
            let mut active: posts::ActiveModel = post.into();
            active.is_banned = ActiveValue::Set(true);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Feed listing. `is_popular` restricts to the recent window and ranks
    /// by like count; otherwise newest first.
    pub async fn list_posts(&self, filter: PostListFilter) -> ResultEngine<Page<PostOverview>> {
        with_tx!(self, |db_tx| {
            let mut select = posts::Entity::find()
                .filter(posts::Column::IsActive.eq(true))
                .filter(posts::Column::IsBanned.eq(false));

            if let Some(q) = filter.q.as_deref() {
                select = select.filter(post_search_condition(q));
            }

            if filter.is_popular {
                // Like-count ranking happens in memory: the candidate set is
                // bounded by the recency window.
                let cutoff = Utc::now() - TimeDelta::days(POPULAR_WINDOW_DAYS);
                let models = select
                    .filter(posts::Column::CreatedAt.gte(cutoff))
                    .order_by(posts::Column::CreatedAt, Order::Desc)
                    .all(&db_tx)
                    .await?;

                let mut overviews = Vec::with_capacity(models.len());
                for post in models {
                    overviews.push(self.post_overview(&db_tx, post).await?);
                }
                overviews.sort_by(|a, b| {
                    b.likes
                        .cmp(&a.likes)
                        .then(b.post.created_at.cmp(&a.post.created_at))
                });

                let total = overviews.len() as u64;
                let start = (filter.page.page_number - 1) * filter.page.page_size;
                let content: Vec<PostOverview> = overviews
                    .into_iter()
                    .skip(start as usize)
                    .take(filter.page.page_size as usize)
                    .collect();
                Ok(Page::new(filter.page, total, content))
            } else {
                let select = select.order_by(posts::Column::CreatedAt, Order::Desc);
                let paginator = select.paginate(&db_tx, filter.page.page_size);
                let total = paginator.num_items().await?;
                let models = paginator.fetch_page(filter.page.page_number - 1).await?;

                let mut content = Vec::with_capacity(models.len());
                for post in models {
                    content.push(self.post_overview(&db_tx, post).await?);
                }
                Ok(Page::new(filter.page, total, content))
            }
        })
    }

    /// Detail view; records the viewer's visit once.
    pub async fn post_detail(&self, post_id: i64, viewer_id: i64) -> ResultEngine<PostDetail> {
        with_tx!(self, |db_tx| {
            let post = self.require_post(&db_tx, post_id).await?;
            let can_update = post.user_id == viewer_id;

            let seen = post_views::Entity::find()
                .filter(post_views::Column::PostId.eq(post.id))
                .filter(post_views::Column::UserId.eq(viewer_id))
                .one(&db_tx)
                .await?
                .is_some();
            if !seen {
                let view = post_views::ActiveModel {
                    post_id: ActiveValue::Set(post.id),
                    user_id: ActiveValue::Set(viewer_id),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                view.insert(&db_tx).await?;
            }

            let liked_by_me = post_likes::Entity::find()
                .filter(post_likes::Column::PostId.eq(post.id))
                .filter(post_likes::Column::UserId.eq(viewer_id))
                .one(&db_tx)
                .await?
                .is_some();

            let overview = self.post_overview(&db_tx, post).await?;
            Ok(PostDetail {
                overview,
                liked_by_me,
                can_update,
            })
        })
    }

    pub async fn toggle_post_like(&self, post_id: i64, user_id: i64) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let post = self.require_post(&db_tx, post_id).await?;
            let existing = post_likes::Entity::find()
                .filter(post_likes::Column::PostId.eq(post.id))
                .filter(post_likes::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(like) => {
                    post_likes::Entity::delete_by_id(like.id).exec(&db_tx).await?;
                    Ok(false)
                }
                None => {
                    let like = post_likes::ActiveModel {
                        post_id: ActiveValue::Set(post.id),
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

    pub async fn create_post_comment(
        &self,
        post_id: i64,
        user_id: i64,
        text: &str,
    ) -> ResultEngine<post_comments::Model> {
        with_tx!(self, |db_tx| {
            let post = self.require_post(&db_tx, post_id).await?;
            let now = Utc::now();
            let comment = post_comments::ActiveModel {
                post_id: ActiveValue::Set(post.id),
                user_id: ActiveValue::Set(user_id),
                text: ActiveValue::Set(normalize_required_text(text, "comment")?),
                is_banned: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            Ok(comment.insert(&db_tx).await?)
        })
    }

    pub async fn ban_post_comment(&self, comment_id: i64, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let comment = post_comments::Entity::find_by_id(comment_id)
                .filter(post_comments::Column::IsBanned.eq(false))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("comment".to_string()))?;
            if comment.user_id != user_id {
                return Err(EngineError::Forbidden(
                    "you can only delete your own comment".to_string(),
                ));
            }
            let mut active: post_comments::ActiveModel = comment.into();
            active.is_banned = ActiveValue::Set(true);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    pub async fn toggle_post_comment_like(
        &self,
        comment_id: i64,
        user_id: i64,
    ) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let comment = post_comments::Entity::find_by_id(comment_id)
                .filter(post_comments::Column::IsBanned.eq(false))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("comment".to_string()))?;

            let existing = post_comment_likes::Entity::find()
                .filter(post_comment_likes::Column::CommentId.eq(comment.id))
                .filter(post_comment_likes::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(like) => {
                    post_comment_likes::Entity::delete_by_id(like.id)
                        .exec(&db_tx)
                        .await?;
                    Ok(false)
                }
                None => {
                    let like = post_comment_likes::ActiveModel {
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

    async fn require_post(
        &self,
        db: &DatabaseTransaction,
        post_id: i64,
    ) -> ResultEngine<posts::Model> {
        posts::Entity::find_by_id(post_id)
            .filter(posts::Column::IsActive.eq(true))
            .filter(posts::Column::IsBanned.eq(false))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("post".to_string()))
    }

    async fn require_own_post(
        &self,
        db: &DatabaseTransaction,
        post_id: i64,
        user_id: i64,
    ) -> ResultEngine<posts::Model> {
        let post = self.require_post(db, post_id).await?;
        if post.user_id != user_id {
            return Err(EngineError::Forbidden(
                "you can only modify your own post".to_string(),
            ));
        }
        Ok(post)
    }

    async fn post_overview(
        &self,
        db: &DatabaseTransaction,
        post: posts::Model,
    ) -> ResultEngine<PostOverview> {
        let likes = post_likes::Entity::find()
            .filter(post_likes::Column::PostId.eq(post.id))
            .count(db)
            .await?;
        let views = post_views::Entity::find()
            .filter(post_views::Column::PostId.eq(post.id))
            .count(db)
            .await?;
        let comments = post_comments::Entity::find()
            .filter(post_comments::Column::PostId.eq(post.id))
            .filter(post_comments::Column::IsBanned.eq(false))
            .count(db)
            .await?;
        Ok(PostOverview {
            post,
            likes,
            views,
            comments,
        })
    }
}

fn post_search_condition(q: &str) -> Condition {
    let mut condition = Condition::any();
    for token in search::tokens(q) {
        for variant in search::token_variants(&token) {
            condition = condition
                .add(posts::Column::Title.contains(variant.as_str()))
                .add(posts::Column::BookName.contains(variant.as_str()))
                .add(posts::Column::BookAuthor.contains(variant.as_str()));
        }
    }
    condition
}
