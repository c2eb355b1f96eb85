pub use enums::{
    BookType, CoverType, Language, OrderStatus, OwnerType, PolicyType, ShopRole, UserRole,
};
pub use error::EngineError;
pub use filter::{Ordering, RangeFilter};
pub use ops::{
    BOOK_ORDERING_FIELDS, BookDetail, BookListFilter, BookNew, BookOverview, BookUpdate,
    BotRegister, BotUserUpdate,
    CommentNew, CommentOverview, Engine, EngineBuilder, OrderItemNew, OrderOverview, OtpIssued,
    PostDetail, PostListFilter, PostNew, PostOverview, PostUpdate, ProfileUpdate, ProfileView,
    ShopListFilter, ShopUpdate,
};
pub use page::{Page, PageRequest};

mod enums;
mod error;
pub mod filter;
mod ops;
pub mod page;
pub mod search;

// Entities, one module per table.
pub mod banners;
pub mod book_comment_likes;
pub mod book_comments;
pub mod book_likes;
pub mod book_views;
pub mod books;
pub mod categories;
pub mod contact_messages;
pub mod districts;
pub mod faqs;
pub mod order_items;
pub mod orders;
pub mod otps;
pub mod post_comment_likes;
pub mod post_comments;
pub mod post_likes;
pub mod post_views;
pub mod posts;
pub mod privacy_policies;
pub mod regions;
pub mod shop_feedbacks;
pub mod shop_staff;
pub mod shops;
pub mod sub_categories;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
