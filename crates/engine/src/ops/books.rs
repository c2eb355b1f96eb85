//! Book listings: CRUD, filtered listing, likes and views.

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, Order, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};

use crate::{
    BookType, CoverType, EngineError, Ordering, OwnerType, Page, PageRequest, RangeFilter,
    ResultEngine, book_comments, book_likes, book_views, books, search,
};

use super::{Engine, normalize_optional_text, normalize_required_text, with_tx};

/// Fields a list request may order by.
pub const BOOK_ORDERING_FIELDS: &[&str] =
    &["id", "created_at", "updated_at", "price", "publication_year"];

pub struct BookNew {
    pub name: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub cover_type: CoverType,
    pub book_type: BookType,
    pub category_id: Option<i64>,
    pub sub_category_id: Option<i64>,
    pub publication_year: Option<i32>,
    pub pages: Option<i32>,
    pub isbn: Option<String>,
    pub is_used: bool,
}

#[derive(Default)]
pub struct BookUpdate {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub cover_type: Option<CoverType>,
    pub book_type: Option<BookType>,
    pub category_id: Option<i64>,
    pub sub_category_id: Option<i64>,
    pub publication_year: Option<i32>,
    pub pages: Option<i32>,
    pub isbn: Option<String>,
    pub is_used: Option<bool>,
    pub is_active: Option<bool>,
}

/// Typed filter surface of the list endpoint.
#[derive(Default)]
pub struct BookListFilter {
    pub category: Option<i64>,
    pub sub_category: Option<i64>,
    pub shop: Option<i64>,
    pub posted_by: Option<i64>,
    pub owner_type: Option<OwnerType>,
    pub cover_type: Option<CoverType>,
    pub book_type: Option<BookType>,
    pub is_active: Option<bool>,
    pub is_used: Option<bool>,
    pub for_home_page: Option<bool>,
    pub price: RangeFilter<i64>,
    pub publication_year: RangeFilter<i32>,
    pub q: Option<String>,
    pub exclude: Vec<i64>,
    pub ordering: Option<Ordering>,
    pub page: PageRequest,
}

#[derive(Debug)]
pub struct BookOverview {
    pub book: books::Model,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
}

#[derive(Debug)]
pub struct BookDetail {
    pub overview: BookOverview,
    pub liked_by_me: bool,
    pub can_update: bool,
}

impl Engine {
    /// Create a listing. If the poster owns or staffs an active shop the
    /// book is listed under that shop, otherwise under the user.
    pub async fn new_book(&self, user_id: i64, cmd: BookNew) -> ResultEngine<books::Model> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let shop = self.user_active_shop(&db_tx, user.id).await?;
            let owner_type = if shop.is_some() {
                OwnerType::Shop
            } else {
                OwnerType::User
            };

            let now = Utc::now();
            let book = books::ActiveModel {
                name: ActiveValue::Set(normalize_required_text(&cmd.name, "book name")?),
                author: ActiveValue::Set(normalize_required_text(&cmd.author, "author")?),
                description: ActiveValue::Set(cmd.description),
                price: ActiveValue::Set(cmd.price),
                cover_type: ActiveValue::Set(cmd.cover_type.as_str().to_string()),
                book_type: ActiveValue::Set(cmd.book_type.as_str().to_string()),
                owner_type: ActiveValue::Set(owner_type.as_str().to_string()),
                posted_by: ActiveValue::Set(user.id),
                shop_id: ActiveValue::Set(shop.map(|shop| shop.id)),
                category_id: ActiveValue::Set(cmd.category_id),
                sub_category_id: ActiveValue::Set(cmd.sub_category_id),
                publication_year: ActiveValue::Set(cmd.publication_year),
                pages: ActiveValue::Set(cmd.pages),
                isbn: ActiveValue::Set(normalize_optional_text(cmd.isbn.as_deref())),
                is_used: ActiveValue::Set(cmd.is_used),
                for_home_page: ActiveValue::Set(false),
                is_active: ActiveValue::Set(true),
                is_banned: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            Ok(book.insert(&db_tx).await?)
        })
    }

    pub async fn update_book(
        &self,
        book_id: i64,
        user_id: i64,
        cmd: BookUpdate,
    ) -> ResultEngine<books::Model> {
        with_tx!(self, |db_tx| {
            let book = self.require_book_editable(&db_tx, book_id, user_id).await?;
            let mut active: books::ActiveModel = book.into();

            if let Some(name) = cmd.name.as_deref() {
                active.name = ActiveValue::Set(normalize_required_text(name, "book name")?);
            }
            if let Some(author) = cmd.author.as_deref() {
                active.author = ActiveValue::Set(normalize_required_text(author, "author")?);
            }
            if let Some(description) = cmd.description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(price) = cmd.price {
                active.price = ActiveValue::Set(price);
            }
            if let Some(cover_type) = cmd.cover_type {
                active.cover_type = ActiveValue::Set(cover_type.as_str().to_string());
            }
            if let Some(book_type) = cmd.book_type {
                active.book_type = ActiveValue::Set(book_type.as_str().to_string());
            }
            if let Some(category_id) = cmd.category_id {
                active.category_id = ActiveValue::Set(Some(category_id));
            }
            if let Some(sub_category_id) = cmd.sub_category_id {
                active.sub_category_id = ActiveValue::Set(Some(sub_category_id));
            }
            if let Some(publication_year) = cmd.publication_year {
                active.publication_year = ActiveValue::Set(Some(publication_year));
            }
            if let Some(pages) = cmd.pages {
                active.pages = ActiveValue::Set(Some(pages));
            }
            if let Some(isbn) = cmd.isbn.as_deref() {
                active.isbn = ActiveValue::Set(normalize_optional_text(Some(isbn)));
            }
            if let Some(is_used) = cmd.is_used {
                active.is_used = ActiveValue::Set(is_used);
            }
            if let Some(is_active) = cmd.is_active {
                active.is_active = ActiveValue::Set(is_active);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Soft delete: the row stays, public reads stop seeing it.
    pub async fn ban_book(&self, book_id: i64, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let book = self.require_book_editable(&db_tx, book_id, user_id).await?;
            let mut active: books::ActiveModel = book.into();
            active.is_banned = ActiveValue::Set(true);
            active.updated_at = ActiveValue::Set(Utc::now());
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Detail view. Records the viewer's visit (once per user).
    pub async fn book_detail(&self, book_id: i64, viewer_id: i64) -> ResultEngine<BookDetail> {
        with_tx!(self, |db_tx| {
            let book = self.require_book(&db_tx, book_id).await?;
            let can_update = self.can_edit_book(&db_tx, &book, viewer_id).await?;

            let seen = book_views::Entity::find()
                .filter(book_views::Column::BookId.eq(book.id))
                .filter(book_views::Column::UserId.eq(viewer_id))
                .one(&db_tx)
                .await?
                .is_some();
            if !seen {
                let view = book_views::ActiveModel {
                    book_id: ActiveValue::Set(book.id),
                    user_id: ActiveValue::Set(viewer_id),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                };
                view.insert(&db_tx).await?;
            }

            let liked_by_me = book_likes::Entity::find()
                .filter(book_likes::Column::BookId.eq(book.id))
                .filter(book_likes::Column::UserId.eq(viewer_id))
                .one(&db_tx)
                .await?
                .is_some();

            let overview = self.book_overview(&db_tx, book).await?;
            Ok(BookDetail {
                overview,
                liked_by_me,
                can_update,
            })
        })
    }

    /// Filtered, ordered, paginated listing of non-banned books.
    pub async fn list_books(&self, filter: BookListFilter) -> ResultEngine<Page<BookOverview>> {
        with_tx!(self, |db_tx| {
            let mut select = books::Entity::find().filter(books::Column::IsBanned.eq(false));

            if let Some(category) = filter.category {
                select = select.filter(books::Column::CategoryId.eq(category));
            }
            if let Some(sub_category) = filter.sub_category {
                select = select.filter(books::Column::SubCategoryId.eq(sub_category));
            }
            if let Some(shop) = filter.shop {
                select = select.filter(books::Column::ShopId.eq(shop));
            }
            if let Some(posted_by) = filter.posted_by {
                select = select.filter(books::Column::PostedBy.eq(posted_by));
            }
            if let Some(owner_type) = filter.owner_type {
                select = select.filter(books::Column::OwnerType.eq(owner_type.as_str()));
            }
            if let Some(cover_type) = filter.cover_type {
                select = select.filter(books::Column::CoverType.eq(cover_type.as_str()));
            }
            if let Some(book_type) = filter.book_type {
                select = select.filter(books::Column::BookType.eq(book_type.as_str()));
            }
            if let Some(is_active) = filter.is_active {
                select = select.filter(books::Column::IsActive.eq(is_active));
            }
            if let Some(is_used) = filter.is_used {
                select = select.filter(books::Column::IsUsed.eq(is_used));
            }
            if let Some(for_home_page) = filter.for_home_page {
                select = select.filter(books::Column::ForHomePage.eq(for_home_page));
            }
            if let Some(min) = filter.price.min {
                select = select.filter(books::Column::Price.gte(min));
            }
            if let Some(max) = filter.price.max {
                select = select.filter(books::Column::Price.lte(max));
            }
            if let Some(min) = filter.publication_year.min {
                select = select.filter(books::Column::PublicationYear.gte(min));
            }
            if let Some(max) = filter.publication_year.max {
                select = select.filter(books::Column::PublicationYear.lte(max));
            }
            if !filter.exclude.is_empty() {
                select = select.filter(books::Column::Id.is_not_in(filter.exclude.clone()));
            }
            if let Some(q) = filter.q.as_deref() {
                select = select.filter(book_search_condition(q));
            }

            select = match &filter.ordering {
                Some(ordering) => order_books(select, ordering)?,
                None => select.order_by(books::Column::CreatedAt, Order::Desc),
            };

            let paginator = select.paginate(&db_tx, filter.page.page_size);
            let total = paginator.num_items().await?;
            let models = paginator.fetch_page(filter.page.page_number - 1).await?;

            let mut content = Vec::with_capacity(models.len());
            for book in models {
                content.push(self.book_overview(&db_tx, book).await?);
            }
            Ok(Page::new(filter.page, total, content))
        })
    }

    /// The caller's liked, active, non-banned books.
    pub async fn liked_books(&self, user_id: i64) -> ResultEngine<Vec<BookOverview>> {
        with_tx!(self, |db_tx| {
            let likes = book_likes::Entity::find()
                .filter(book_likes::Column::UserId.eq(user_id))
                .all(&db_tx)
                .await?;
            let ids: Vec<i64> = likes.iter().map(|like| like.book_id).collect();

            let models = books::Entity::find()
                .filter(books::Column::Id.is_in(ids))
                .filter(books::Column::IsBanned.eq(false))
                .filter(books::Column::IsActive.eq(true))
                .order_by(books::Column::CreatedAt, Order::Desc)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for book in models {
                out.push(self.book_overview(&db_tx, book).await?);
            }
            Ok(out)
        })
    }

    /// Like or unlike; returns whether the book is liked afterwards.
    pub async fn toggle_book_like(&self, book_id: i64, user_id: i64) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let book = self.require_book(&db_tx, book_id).await?;
            let existing = book_likes::Entity::find()
                .filter(book_likes::Column::BookId.eq(book.id))
                .filter(book_likes::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?;

            match existing {
                Some(like) => {
                    book_likes::Entity::delete_by_id(like.id).exec(&db_tx).await?;
                    Ok(false)
                }
                None => {
                    let like = book_likes::ActiveModel {
                        book_id: ActiveValue::Set(book.id),
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

    pub(super) async fn book_overview(
        &self,
        db: &DatabaseTransaction,
        book: books::Model,
    ) -> ResultEngine<BookOverview> {
        let likes = book_likes::Entity::find()
            .filter(book_likes::Column::BookId.eq(book.id))
            .count(db)
            .await?;
        let views = book_views::Entity::find()
            .filter(book_views::Column::BookId.eq(book.id))
            .count(db)
            .await?;
        let comments = book_comments::Entity::find()
            .filter(book_comments::Column::BookId.eq(book.id))
            .filter(book_comments::Column::IsBanned.eq(false))
            .count(db)
            .await?;
        Ok(BookOverview {
            book,
            likes,
            views,
            comments,
        })
    }
}

fn book_search_condition(q: &str) -> Condition {
    let mut condition = Condition::any();
    for token in search::tokens(q) {
        for variant in search::token_variants(&token) {
            condition = condition
                .add(books::Column::Name.contains(variant.as_str()))
                .add(books::Column::Author.contains(variant.as_str()));
        }
    }
    condition
}

fn order_books(
    select: sea_orm::Select<books::Entity>,
    ordering: &Ordering,
) -> ResultEngine<sea_orm::Select<books::Entity>> {
    let direction = if ordering.desc { Order::Desc } else { Order::Asc };
    let select = match ordering.field.as_str() {
        "id" => select.order_by(books::Column::Id, direction),
        "created_at" => select.order_by(books::Column::CreatedAt, direction),
        "updated_at" => select.order_by(books::Column::UpdatedAt, direction),
        "price" => select.order_by(books::Column::Price, direction),
        "publication_year" => select.order_by(books::Column::PublicationYear, direction),
        other => {
            return Err(EngineError::InvalidInput(format!(
                "ordering by {other:?} is not supported"
            )));
        }
    };
    Ok(select)
}
