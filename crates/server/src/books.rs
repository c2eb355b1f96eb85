//! Book endpoints.

use api_types::book::{
    BookDetail, BookListParams, BookNew, BookSummary, BookUpdate, CategoryView, LikeToggled,
    SubCategoryParams, SubCategoryView,
};
use api_types::page::Page;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use engine::filter::{parse_bool, parse_exclude, parse_ordering, parse_param, parse_range};
use engine::page::PageRequest;

use crate::{ServerError, created, server::ServerState, success};

fn map_owner_type(owner_type: engine::OwnerType) -> api_types::OwnerType {
    match owner_type {
        engine::OwnerType::User => api_types::OwnerType::User,
        engine::OwnerType::Shop => api_types::OwnerType::Shop,
    }
}

fn map_cover_type(cover_type: engine::CoverType) -> api_types::CoverType {
    match cover_type {
        engine::CoverType::Hard => api_types::CoverType::Hard,
        engine::CoverType::Soft => api_types::CoverType::Soft,
    }
}

fn cover_type_to_engine(cover_type: api_types::CoverType) -> engine::CoverType {
    match cover_type {
        api_types::CoverType::Hard => engine::CoverType::Hard,
        api_types::CoverType::Soft => engine::CoverType::Soft,
    }
}

fn map_book_type(book_type: engine::BookType) -> api_types::BookType {
    match book_type {
        engine::BookType::Gift => api_types::BookType::Gift,
        engine::BookType::Exchange => api_types::BookType::Exchange,
        engine::BookType::Seller => api_types::BookType::Seller,
    }
}

fn book_type_to_engine(book_type: api_types::BookType) -> engine::BookType {
    match book_type {
        api_types::BookType::Gift => engine::BookType::Gift,
        api_types::BookType::Exchange => engine::BookType::Exchange,
        api_types::BookType::Seller => engine::BookType::Seller,
    }
}

pub(crate) fn book_summary(overview: engine::BookOverview) -> Result<BookSummary, ServerError> {
    let book = overview.book;
    Ok(BookSummary {
        id: book.id,
        name: book.name,
        author: book.author,
        price: book.price,
        cover_type: map_cover_type(engine::CoverType::try_from(book.cover_type.as_str())?),
        book_type: map_book_type(engine::BookType::try_from(book.book_type.as_str())?),
        owner_type: map_owner_type(engine::OwnerType::try_from(book.owner_type.as_str())?),
        posted_by: book.posted_by,
        shop_id: book.shop_id,
        category_id: book.category_id,
        sub_category_id: book.sub_category_id,
        is_used: book.is_used,
        likes: overview.likes,
        views: overview.views,
        comments: overview.comments,
        created_at: book.created_at,
    })
}

fn book_detail(detail: engine::BookDetail) -> Result<BookDetail, ServerError> {
    let description = detail.overview.book.description.clone();
    let publication_year = detail.overview.book.publication_year;
    let pages = detail.overview.book.pages;
    let isbn = detail.overview.book.isbn.clone();
    let for_home_page = detail.overview.book.for_home_page;
    Ok(BookDetail {
        summary: book_summary(detail.overview)?,
        description,
        publication_year,
        pages,
        isbn,
        for_home_page,
        liked_by_me: detail.liked_by_me,
        can_update: detail.can_update,
    })
}

pub(crate) fn page_view<T, U>(
    page: engine::Page<T>,
    f: impl Fn(T) -> Result<U, ServerError>,
) -> Result<Page<U>, ServerError> {
    let has_previous = page.has_previous();
    let has_next = page.has_next();
    let empty = page.is_empty();
    let mut content = Vec::with_capacity(page.content.len());
    for item in page.content {
        content.push(f(item)?);
    }
    Ok(Page {
        total_elements: page.total_elements,
        total_pages: page.total_pages,
        page_size: page.page_size,
        current_page: page.current_page,
        elements_number: content.len() as u64,
        has_previous,
        has_next,
        empty,
        content,
    })
}

fn parse_list_filter(params: &BookListParams) -> Result<engine::BookListFilter, ServerError> {
    let owner_type = match params.owner_type.as_deref() {
        Some(raw) => Some(engine::OwnerType::try_from(raw)?),
        None => None,
    };
    let cover_type = match params.cover_type.as_deref() {
        Some(raw) => Some(engine::CoverType::try_from(raw)?),
        None => None,
    };
    let book_type = match params.book_type.as_deref() {
        Some(raw) => Some(engine::BookType::try_from(raw)?),
        None => None,
    };

    Ok(engine::BookListFilter {
        category: parse_param("category", params.category.as_deref())?,
        sub_category: parse_param("sub_category", params.sub_category.as_deref())?,
        shop: parse_param("shop", params.shop.as_deref())?,
        posted_by: parse_param("posted_by", params.posted_by.as_deref())?,
        owner_type,
        cover_type,
        book_type,
        is_active: parse_bool("is_active", params.is_active.as_deref())?,
        is_used: parse_bool("is_used", params.is_used.as_deref())?,
        for_home_page: parse_bool("for_home_page", params.for_home_page.as_deref())?,
        price: parse_range(
            "price",
            params.price_min.as_deref(),
            params.price_max.as_deref(),
        )?,
        publication_year: parse_range(
            "publication_year",
            params.publication_year_min.as_deref(),
            params.publication_year_max.as_deref(),
        )?,
        exclude: parse_exclude(params.exclude.as_deref())?,
        q: params.q.clone(),
        ordering: parse_ordering(params.ordering.as_deref(), engine::BOOK_ORDERING_FIELDS)?,
        page: PageRequest::new(params.page_number, params.page_size)?,
    })
}

pub async fn create(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BookNew>,
) -> Result<impl IntoResponse, ServerError> {
    let book = state
        .engine
        .new_book(
            user.id,
            engine::BookNew {
                name: payload.name,
                author: payload.author,
                description: payload.description,
                price: payload.price,
                cover_type: cover_type_to_engine(payload.cover_type),
                book_type: book_type_to_engine(payload.book_type),
                category_id: payload.category_id,
                sub_category_id: payload.sub_category_id,
                publication_year: payload.publication_year,
                pages: payload.pages,
                isbn: payload.isbn,
                is_used: payload.is_used.unwrap_or(false),
            },
        )
        .await?;

    let detail = state.engine.book_detail(book.id, user.id).await?;
    Ok(created(book_detail(detail)?))
}

pub async fn update(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .engine
        .update_book(
            id,
            user.id,
            engine::BookUpdate {
                name: payload.name,
                author: payload.author,
                description: payload.description,
                price: payload.price,
                cover_type: payload.cover_type.map(cover_type_to_engine),
                book_type: payload.book_type.map(book_type_to_engine),
                category_id: payload.category_id,
                sub_category_id: payload.sub_category_id,
                publication_year: payload.publication_year,
                pages: payload.pages,
                isbn: payload.isbn,
                is_used: payload.is_used,
                is_active: payload.is_active,
            },
        )
        .await?;

    let detail = state.engine.book_detail(id, user.id).await?;
    Ok(success(book_detail(detail)?))
}

pub async fn destroy(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.engine.ban_book(id, user.id).await?;
    Ok(success("Book deleted"))
}

pub async fn detail(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let detail = state.engine.book_detail(id, user.id).await?;
    Ok(success(book_detail(detail)?))
}

pub async fn list(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Query(params): Query<BookListParams>,
) -> Result<impl IntoResponse, ServerError> {
    let filter = parse_list_filter(&params)?;
    let page = state.engine.list_books(filter).await?;
    Ok(success(page_view(page, book_summary)?))
}

pub async fn liked(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let books = state.engine.liked_books(user.id).await?;
    let views: Vec<BookSummary> = books
        .into_iter()
        .map(book_summary)
        .collect::<Result<_, _>>()?;
    Ok(success(views))
}

pub async fn like(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let liked = state.engine.toggle_book_like(id, user.id).await?;
    Ok(success(LikeToggled { liked }))
}

pub async fn categories(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let rows = state.engine.categories().await?;
    let views: Vec<CategoryView> = rows
        .into_iter()
        .map(|row| CategoryView {
            id: row.id,
            name: row.name,
        })
        .collect();
    Ok(success(views))
}

pub async fn sub_categories(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Query(params): Query<SubCategoryParams>,
) -> Result<impl IntoResponse, ServerError> {
    let category = parse_param("category", params.category.as_deref())?;
    let rows = state
        .engine
        .sub_categories(category, params.q.as_deref())
        .await?;
    let views: Vec<SubCategoryView> = rows
        .into_iter()
        .map(|row| SubCategoryView {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
        })
        .collect();
    Ok(success(views))
}
