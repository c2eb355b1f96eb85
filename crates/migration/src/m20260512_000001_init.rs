//! Initial schema migration - creates all tables from scratch.
//!
//! Consolidated baseline for Kitobzor:
//!
//! - `users` / `otps`: bot-provisioned accounts and one-time login codes
//! - `regions` / `districts`: geographic reference hierarchy
//! - `categories` / `sub_categories`: book classification
//! - `books` + like/view/comment join tables: listings and social records
//! - `shops`, `shop_staff`, `shop_feedbacks`: bookshop management
//! - `orders` / `order_items`: purchases against a shop
//! - `posts` + comment/like/view join tables: the blog feed
//! - `banners`, `faqs`, `privacy_policies`: static content

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    TelegramId,
    PhoneNumber,
    FirstName,
    LastName,
    Bio,
    Role,
    Language,
    Picture,
    RegionId,
    DistrictId,
    Latitude,
    Longitude,
    LocationText,
    PhoneIsVisible,
    LocationIsVisible,
    IsActive,
    LoginTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Otps {
    Table,
    Id,
    UserId,
    Code,
    CreatedAt,
}

#[derive(Iden)]
enum Regions {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Districts {
    Table,
    Id,
    Name,
    RegionId,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum SubCategories {
    Table,
    Id,
    Name,
    CategoryId,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Name,
    Author,
    Description,
    Price,
    CoverType,
    BookType,
    OwnerType,
    PostedBy,
    ShopId,
    CategoryId,
    SubCategoryId,
    PublicationYear,
    Pages,
    Isbn,
    IsUsed,
    IsActive,
    IsBanned,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BookLikes {
    Table,
    Id,
    BookId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum BookViews {
    Table,
    Id,
    BookId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum BookComments {
    Table,
    Id,
    BookId,
    UserId,
    Text,
    ParentId,
    IsBanned,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BookCommentLikes {
    Table,
    Id,
    CommentId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Shops {
    Table,
    Id,
    Name,
    Bio,
    Image,
    OwnerId,
    PhoneNumber,
    Telegram,
    RegionId,
    DistrictId,
    LocationText,
    Latitude,
    Longitude,
    Star,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ShopStaff {
    Table,
    Id,
    ShopId,
    UserId,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum ShopFeedbacks {
    Table,
    Id,
    ShopId,
    UserId,
    Star,
    Message,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    ShopId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    BookId,
    Quantity,
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    UserId,
    Title,
    Content,
    BookName,
    BookAuthor,
    IsActive,
    IsBanned,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PostComments {
    Table,
    Id,
    PostId,
    UserId,
    Text,
    IsBanned,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PostLikes {
    Table,
    Id,
    PostId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum PostCommentLikes {
    Table,
    Id,
    CommentId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum PostViews {
    Table,
    Id,
    PostId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Banners {
    Table,
    Id,
    Title,
    Picture,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Faqs {
    Table,
    Id,
    Question,
    Answer,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum PrivacyPolicies {
    Table,
    Id,
    PolicyType,
    Content,
    IsActive,
    CreatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    def.big_integer().not_null().auto_increment().primary_key();
    def
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Geography
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(pk(Regions::Id))
                    .col(ColumnDef::new(Regions::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Districts::Table)
                    .if_not_exists()
                    .col(pk(Districts::Id))
                    .col(ColumnDef::new(Districts::Name).string().not_null())
                    .col(ColumnDef::new(Districts::RegionId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-districts-region_id")
                            .from(Districts::Table, Districts::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Users and OTPs
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(
                        ColumnDef::new(Users::TelegramId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PhoneNumber).string().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string())
                    .col(ColumnDef::new(Users::LastName).string())
                    .col(ColumnDef::new(Users::Bio).string())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("simple"),
                    )
                    .col(
                        ColumnDef::new(Users::Language)
                            .string()
                            .not_null()
                            .default("uzbek"),
                    )
                    .col(ColumnDef::new(Users::Picture).string())
                    .col(ColumnDef::new(Users::RegionId).big_integer())
                    .col(ColumnDef::new(Users::DistrictId).big_integer())
                    .col(ColumnDef::new(Users::Latitude).double())
                    .col(ColumnDef::new(Users::Longitude).double())
                    .col(ColumnDef::new(Users::LocationText).string())
                    .col(
                        ColumnDef::new(Users::PhoneIsVisible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::LocationIsVisible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::LoginTime).timestamp())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-region_id")
                            .from(Users::Table, Users::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-district_id")
                            .from(Users::Table, Users::DistrictId)
                            .to(Districts::Table, Districts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Otps::Table)
                    .if_not_exists()
                    .col(pk(Otps::Id))
                    .col(
                        ColumnDef::new(Otps::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Otps::Code).string().not_null())
                    .col(ColumnDef::new(Otps::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-otps-user_id")
                            .from(Otps::Table, Otps::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Classification
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubCategories::Table)
                    .if_not_exists()
                    .col(pk(SubCategories::Id))
                    .col(ColumnDef::new(SubCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(SubCategories::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sub_categories-category_id")
                            .from(SubCategories::Table, SubCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Shops
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Shops::Table)
                    .if_not_exists()
                    .col(pk(Shops::Id))
                    .col(ColumnDef::new(Shops::Name).string().not_null())
                    .col(ColumnDef::new(Shops::Bio).string().not_null())
                    .col(ColumnDef::new(Shops::Image).string())
                    .col(ColumnDef::new(Shops::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Shops::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Shops::Telegram).string())
                    .col(ColumnDef::new(Shops::RegionId).big_integer().not_null())
                    .col(ColumnDef::new(Shops::DistrictId).big_integer().not_null())
                    .col(ColumnDef::new(Shops::LocationText).string())
                    .col(ColumnDef::new(Shops::Latitude).double())
                    .col(ColumnDef::new(Shops::Longitude).double())
                    .col(ColumnDef::new(Shops::Star).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Shops::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Shops::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Shops::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shops-owner_id")
                            .from(Shops::Table, Shops::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shops-region_id")
                            .from(Shops::Table, Shops::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shops-district_id")
                            .from(Shops::Table, Shops::DistrictId)
                            .to(Districts::Table, Districts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShopStaff::Table)
                    .if_not_exists()
                    .col(pk(ShopStaff::Id))
                    .col(ColumnDef::new(ShopStaff::ShopId).big_integer().not_null())
                    .col(ColumnDef::new(ShopStaff::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ShopStaff::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ShopStaff::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shop_staff-shop_id")
                            .from(ShopStaff::Table, ShopStaff::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shop_staff-user_id")
                            .from(ShopStaff::Table, ShopStaff::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shop_staff-shop-user")
                    .table(ShopStaff::Table)
                    .col(ShopStaff::ShopId)
                    .col(ShopStaff::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShopFeedbacks::Table)
                    .if_not_exists()
                    .col(pk(ShopFeedbacks::Id))
                    .col(
                        ColumnDef::new(ShopFeedbacks::ShopId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShopFeedbacks::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShopFeedbacks::Star).integer().not_null())
                    .col(ColumnDef::new(ShopFeedbacks::Message).string())
                    .col(
                        ColumnDef::new(ShopFeedbacks::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ShopFeedbacks::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shop_feedbacks-shop_id")
                            .from(ShopFeedbacks::Table, ShopFeedbacks::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shop_feedbacks-user_id")
                            .from(ShopFeedbacks::Table, ShopFeedbacks::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Books and social records
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(pk(Books::Id))
                    .col(ColumnDef::new(Books::Name).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(ColumnDef::new(Books::Description).text().not_null())
                    .col(ColumnDef::new(Books::Price).big_integer().not_null())
                    .col(ColumnDef::new(Books::CoverType).string().not_null())
                    .col(ColumnDef::new(Books::BookType).string().not_null())
                    .col(ColumnDef::new(Books::OwnerType).string().not_null())
                    .col(ColumnDef::new(Books::PostedBy).big_integer().not_null())
                    .col(ColumnDef::new(Books::ShopId).big_integer())
                    .col(ColumnDef::new(Books::CategoryId).big_integer())
                    .col(ColumnDef::new(Books::SubCategoryId).big_integer())
                    .col(ColumnDef::new(Books::PublicationYear).integer())
                    .col(ColumnDef::new(Books::Pages).integer())
                    .col(ColumnDef::new(Books::Isbn).string())
                    .col(
                        ColumnDef::new(Books::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Books::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Books::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Books::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Books::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-books-posted_by")
                            .from(Books::Table, Books::PostedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-books-shop_id")
                            .from(Books::Table, Books::ShopId)
                            .to(Shops::Table, Shops::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-books-category_id")
                            .from(Books::Table, Books::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-books-sub_category_id")
                            .from(Books::Table, Books::SubCategoryId)
                            .to(SubCategories::Table, SubCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookLikes::Table)
                    .if_not_exists()
                    .col(pk(BookLikes::Id))
                    .col(ColumnDef::new(BookLikes::BookId).big_integer().not_null())
                    .col(ColumnDef::new(BookLikes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BookLikes::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_likes-book_id")
                            .from(BookLikes::Table, BookLikes::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_likes-user_id")
                            .from(BookLikes::Table, BookLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-book_likes-book-user")
                    .table(BookLikes::Table)
                    .col(BookLikes::BookId)
                    .col(BookLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookViews::Table)
                    .if_not_exists()
                    .col(pk(BookViews::Id))
                    .col(ColumnDef::new(BookViews::BookId).big_integer().not_null())
                    .col(ColumnDef::new(BookViews::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BookViews::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_views-book_id")
                            .from(BookViews::Table, BookViews::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_views-user_id")
                            .from(BookViews::Table, BookViews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-book_views-book-user")
                    .table(BookViews::Table)
                    .col(BookViews::BookId)
                    .col(BookViews::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookComments::Table)
                    .if_not_exists()
                    .col(pk(BookComments::Id))
                    .col(
                        ColumnDef::new(BookComments::BookId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookComments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookComments::Text).text().not_null())
                    .col(ColumnDef::new(BookComments::ParentId).big_integer())
                    .col(
                        ColumnDef::new(BookComments::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BookComments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookComments::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_comments-book_id")
                            .from(BookComments::Table, BookComments::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_comments-user_id")
                            .from(BookComments::Table, BookComments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_comments-parent_id")
                            .from(BookComments::Table, BookComments::ParentId)
                            .to(BookComments::Table, BookComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookCommentLikes::Table)
                    .if_not_exists()
                    .col(pk(BookCommentLikes::Id))
                    .col(
                        ColumnDef::new(BookCommentLikes::CommentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookCommentLikes::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookCommentLikes::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_comment_likes-comment_id")
                            .from(BookCommentLikes::Table, BookCommentLikes::CommentId)
                            .to(BookComments::Table, BookComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-book_comment_likes-user_id")
                            .from(BookCommentLikes::Table, BookCommentLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-book_comment_likes-comment-user")
                    .table(BookCommentLikes::Table)
                    .col(BookCommentLikes::CommentId)
                    .col(BookCommentLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Orders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk(Orders::Id))
                    .col(ColumnDef::new(Orders::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::ShopId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Orders::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Orders::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-shop_id")
                            .from(Orders::Table, Orders::ShopId)
                            .to(Shops::Table, Shops::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(pk(OrderItems::Id))
                    .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::BookId).big_integer().not_null())
                    .col(
                        ColumnDef::new(OrderItems::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_items-order_id")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_items-book_id")
                            .from(OrderItems::Table, OrderItems::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Posts and social records
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(pk(Posts::Id))
                    .col(ColumnDef::new(Posts::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::BookName).string().not_null())
                    .col(ColumnDef::new(Posts::BookAuthor).string().not_null())
                    .col(
                        ColumnDef::new(Posts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Posts::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Posts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Posts::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts-user_id")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostComments::Table)
                    .if_not_exists()
                    .col(pk(PostComments::Id))
                    .col(
                        ColumnDef::new(PostComments::PostId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostComments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostComments::Text).text().not_null())
                    .col(
                        ColumnDef::new(PostComments::IsBanned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PostComments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostComments::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_comments-post_id")
                            .from(PostComments::Table, PostComments::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_comments-user_id")
                            .from(PostComments::Table, PostComments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostLikes::Table)
                    .if_not_exists()
                    .col(pk(PostLikes::Id))
                    .col(ColumnDef::new(PostLikes::PostId).big_integer().not_null())
                    .col(ColumnDef::new(PostLikes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(PostLikes::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_likes-post_id")
                            .from(PostLikes::Table, PostLikes::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_likes-user_id")
                            .from(PostLikes::Table, PostLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-post_likes-post-user")
                    .table(PostLikes::Table)
                    .col(PostLikes::PostId)
                    .col(PostLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostCommentLikes::Table)
                    .if_not_exists()
                    .col(pk(PostCommentLikes::Id))
                    .col(
                        ColumnDef::new(PostCommentLikes::CommentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostCommentLikes::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostCommentLikes::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_comment_likes-comment_id")
                            .from(PostCommentLikes::Table, PostCommentLikes::CommentId)
                            .to(PostComments::Table, PostComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_comment_likes-user_id")
                            .from(PostCommentLikes::Table, PostCommentLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-post_comment_likes-comment-user")
                    .table(PostCommentLikes::Table)
                    .col(PostCommentLikes::CommentId)
                    .col(PostCommentLikes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostViews::Table)
                    .if_not_exists()
                    .col(pk(PostViews::Id))
                    .col(ColumnDef::new(PostViews::PostId).big_integer().not_null())
                    .col(ColumnDef::new(PostViews::UserId).big_integer().not_null())
                    .col(ColumnDef::new(PostViews::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_views-post_id")
                            .from(PostViews::Table, PostViews::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_views-user_id")
                            .from(PostViews::Table, PostViews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-post_views-post-user")
                    .table(PostViews::Table)
                    .col(PostViews::PostId)
                    .col(PostViews::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Static content
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(pk(Banners::Id))
                    .col(ColumnDef::new(Banners::Title).string())
                    .col(ColumnDef::new(Banners::Picture).string().not_null())
                    .col(
                        ColumnDef::new(Banners::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Banners::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faqs::Table)
                    .if_not_exists()
                    .col(pk(Faqs::Id))
                    .col(ColumnDef::new(Faqs::Question).text().not_null())
                    .col(ColumnDef::new(Faqs::Answer).text().not_null())
                    .col(
                        ColumnDef::new(Faqs::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Faqs::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PrivacyPolicies::Table)
                    .if_not_exists()
                    .col(pk(PrivacyPolicies::Id))
                    .col(
                        ColumnDef::new(PrivacyPolicies::PolicyType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PrivacyPolicies::Content).text().not_null())
                    .col(
                        ColumnDef::new(PrivacyPolicies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PrivacyPolicies::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables: Vec<TableRef> = vec![
            PrivacyPolicies::Table.into_table_ref(),
            Faqs::Table.into_table_ref(),
            Banners::Table.into_table_ref(),
            PostViews::Table.into_table_ref(),
            PostCommentLikes::Table.into_table_ref(),
            PostLikes::Table.into_table_ref(),
            PostComments::Table.into_table_ref(),
            Posts::Table.into_table_ref(),
            OrderItems::Table.into_table_ref(),
            Orders::Table.into_table_ref(),
            BookCommentLikes::Table.into_table_ref(),
            BookComments::Table.into_table_ref(),
            BookViews::Table.into_table_ref(),
            BookLikes::Table.into_table_ref(),
            Books::Table.into_table_ref(),
            ShopFeedbacks::Table.into_table_ref(),
            ShopStaff::Table.into_table_ref(),
            Shops::Table.into_table_ref(),
            SubCategories::Table.into_table_ref(),
            Categories::Table.into_table_ref(),
            Otps::Table.into_table_ref(),
            Users::Table.into_table_ref(),
            Districts::Table.into_table_ref(),
            Regions::Table.into_table_ref(),
        ];

        for table in tables {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
