use serde::{Deserialize, Serialize};

/// Role of a user account.
///
/// The server treats roles as plain labels; `superadmin` and `admin` unlock
/// the operator tooling, the rest describe what kind of seller the account
/// is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Superadmin,
    Admin,
    #[default]
    Simple,
    Premium,
    Publisher,
    Library,
    Bookshop,
}

impl UserRole {
    /// Returns the canonical role string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Simple => "simple",
            Self::Premium => "premium",
            Self::Publisher => "publisher",
            Self::Library => "library",
            Self::Bookshop => "bookshop",
        }
    }
}

/// Interface language of a user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Uzbek,
    English,
    Russian,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uzbek => "uzbek",
            Self::English => "english",
            Self::Russian => "russian",
        }
    }
}

/// Discriminator telling whether a book listing belongs to an individual
/// user or to a shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    User,
    Shop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverType {
    Hard,
    Soft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookType {
    Gift,
    Exchange,
    Seller,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
    Sold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Public,
    Bookshop,
    Library,
}

pub mod page {
    use super::*;

    /// Pagination envelope around list results.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Page<T> {
        pub total_elements: u64,
        pub total_pages: u64,
        pub page_size: u64,
        pub current_page: u64,
        pub elements_number: u64,
        pub has_previous: bool,
        pub has_next: bool,
        pub empty: bool,
        pub content: Vec<T>,
    }
}

pub mod auth {
    use super::*;

    /// Payload the companion bot sends to provision a new account.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BotRegister {
        pub telegram_id: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub language: Option<Language>,
    }

    /// Bot requests keyed only by the telegram id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BotUserRef {
        pub telegram_id: String,
    }

    /// Partial update issued by the bot (language selection, shared phone).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BotUserUpdate {
        pub telegram_id: String,
        pub language: Option<Language>,
        pub phone_number: Option<String>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BotUserView {
        pub telegram_id: String,
        pub language: Language,
        pub phone_number: Option<String>,
    }

    /// OTP delivery response; `fresh` is false when a pending code was
    /// re-delivered instead of generated.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct OtpIssued {
        pub otp_code: String,
        pub fresh: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub phone_number: String,
        pub otp_code: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefreshToken {
        pub refresh_token: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenPair {
        pub access_token: String,
        pub refresh_token: String,
    }
}

pub mod user {
    use super::*;

    /// Own profile, as returned by `/me` and `/profile`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Profile {
        pub id: i64,
        pub telegram_id: String,
        pub phone_number: Option<String>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub bio: Option<String>,
        pub role: UserRole,
        pub language: Language,
        pub picture: Option<String>,
        pub region_id: Option<i64>,
        pub district_id: Option<i64>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub location_text: Option<String>,
        pub phone_is_visible: bool,
        pub location_is_visible: bool,
        pub books_count: u64,
        pub posts_count: u64,
    }

    /// Another user's profile. Phone and location fields are `null` unless
    /// the owner made them visible.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PublicProfile {
        pub id: i64,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub bio: Option<String>,
        pub role: UserRole,
        pub picture: Option<String>,
        pub region_id: Option<i64>,
        pub district_id: Option<i64>,
        pub phone_number: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub location_text: Option<String>,
        pub books_count: u64,
        pub posts_count: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub bio: Option<String>,
        pub language: Option<Language>,
        pub picture: Option<String>,
        pub phone_number: Option<String>,
        pub region_id: Option<i64>,
        pub district_id: Option<i64>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub location_text: Option<String>,
        pub phone_is_visible: Option<bool>,
        pub location_is_visible: Option<bool>,
    }
}

pub mod book {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
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
        pub is_used: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
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

    /// Raw query parameters of the book list endpoint. Everything is a
    /// string; the server validates and converts, rejecting junk values
    /// instead of ignoring them.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BookListParams {
        pub category: Option<String>,
        pub sub_category: Option<String>,
        pub shop: Option<String>,
        pub posted_by: Option<String>,
        pub owner_type: Option<String>,
        pub cover_type: Option<String>,
        pub book_type: Option<String>,
        pub is_active: Option<String>,
        pub is_used: Option<String>,
        pub for_home_page: Option<String>,
        pub price_min: Option<String>,
        pub price_max: Option<String>,
        pub publication_year_min: Option<String>,
        pub publication_year_max: Option<String>,
        pub exclude: Option<String>,
        pub q: Option<String>,
        pub ordering: Option<String>,
        pub page_number: Option<u64>,
        pub page_size: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookSummary {
        pub id: i64,
        pub name: String,
        pub author: String,
        pub price: i64,
        pub cover_type: CoverType,
        pub book_type: BookType,
        pub owner_type: OwnerType,
        pub posted_by: i64,
        pub shop_id: Option<i64>,
        pub category_id: Option<i64>,
        pub sub_category_id: Option<i64>,
        pub is_used: bool,
        pub likes: u64,
        pub views: u64,
        pub comments: u64,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookDetail {
        #[serde(flatten)]
        pub summary: BookSummary,
        pub description: String,
        pub publication_year: Option<i32>,
        pub pages: Option<i32>,
        pub isbn: Option<String>,
        pub for_home_page: bool,
        pub liked_by_me: bool,
        pub can_update: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LikeToggled {
        pub liked: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubCategoryView {
        pub id: i64,
        pub name: String,
        pub category_id: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SubCategoryParams {
        pub category: Option<String>,
        pub q: Option<String>,
    }
}

pub mod comment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookCommentNew {
        pub book_id: i64,
        pub text: String,
        pub parent_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentView {
        pub id: i64,
        pub user_id: i64,
        pub text: String,
        pub likes: u64,
        pub liked_by_me: bool,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub replies: Vec<CommentView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BookCommentParams {
        pub book: Option<String>,
    }
}

pub mod post {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostNew {
        pub title: String,
        pub content: String,
        pub book_name: String,
        pub book_author: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PostUpdate {
        pub title: Option<String>,
        pub content: Option<String>,
        pub book_name: Option<String>,
        pub book_author: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PostListParams {
        pub q: Option<String>,
        pub is_popular: Option<String>,
        pub page_number: Option<u64>,
        pub page_size: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostView {
        pub id: i64,
        pub user_id: i64,
        pub title: String,
        pub content: String,
        pub book_name: String,
        pub book_author: String,
        pub likes: u64,
        pub views: u64,
        pub comments: u64,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostDetail {
        #[serde(flatten)]
        pub post: PostView,
        pub liked_by_me: bool,
        pub can_update: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PostCommentNew {
        pub post_id: i64,
        pub text: String,
    }
}

pub mod shop {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ShopListParams {
        pub region: Option<String>,
        pub district: Option<String>,
        pub q: Option<String>,
        pub page_number: Option<u64>,
        pub page_size: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShopView {
        pub id: i64,
        pub name: String,
        pub bio: String,
        pub image: Option<String>,
        pub owner_id: i64,
        pub phone_number: String,
        pub telegram: Option<String>,
        pub region_id: i64,
        pub district_id: i64,
        pub location_text: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub star: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShopDetail {
        #[serde(flatten)]
        pub shop: ShopView,
        pub can_update: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ShopUpdate {
        pub name: Option<String>,
        pub bio: Option<String>,
        pub image: Option<String>,
        pub phone_number: Option<String>,
        pub telegram: Option<String>,
        pub region_id: Option<i64>,
        pub district_id: Option<i64>,
        pub location_text: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffAdd {
        pub shop_id: i64,
        pub user_id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffView {
        pub id: i64,
        pub shop_id: i64,
        pub user_id: i64,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackNew {
        pub star: i32,
        pub message: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackView {
        pub id: i64,
        pub user_id: i64,
        pub star: i32,
        pub message: Option<String>,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderItemNew {
        pub book_id: i64,
        pub quantity: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderNew {
        pub shop_id: i64,
        pub items: Vec<OrderItemNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderItemView {
        pub book_id: i64,
        pub quantity: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderView {
        pub id: i64,
        pub user_id: i64,
        pub shop_id: i64,
        pub status: OrderStatus,
        pub items: Vec<OrderItemView>,
        pub created_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderStatusUpdate {
        pub status: OrderStatus,
    }
}

pub mod base {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegionView {
        pub id: i64,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DistrictView {
        pub id: i64,
        pub name: String,
        pub region_id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BannerView {
        pub id: i64,
        pub title: Option<String>,
        pub picture: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FaqView {
        pub id: i64,
        pub question: String,
        pub answer: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PolicyView {
        pub id: i64,
        pub policy_type: PolicyType,
        pub content: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PolicyParams {
        #[serde(rename = "type")]
        pub policy_type: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContactNew {
        pub message: String,
        pub phone: Option<String>,
    }
}
