use chrono::Utc;
use engine::{
    BookListFilter, BookNew, BotRegister, CommentNew, Engine, EngineError, OrderItemNew,
    OrderStatus, PostListFilter, PostNew, RangeFilter,
};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

async fn user(engine: &Engine, telegram_id: &str) -> engine::users::Model {
    engine
        .register_bot_user(BotRegister {
            telegram_id: telegram_id.to_string(),
            first_name: None,
            last_name: None,
            language: None,
        })
        .await
        .unwrap()
}

async fn region(db: &DatabaseConnection) -> (i64, i64) {
    let region = engine::regions::ActiveModel {
        name: Set("Toshkent".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    let district = engine::districts::ActiveModel {
        name: Set("Chilonzor".to_string()),
        region_id: Set(region.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    (region.id, district.id)
}

async fn shop(db: &DatabaseConnection, owner_id: i64) -> engine::shops::Model {
    let (region_id, district_id) = region(db).await;
    let now = Utc::now();
    engine::shops::ActiveModel {
        name: Set("Kitob Olami".to_string()),
        bio: Set("Shahar markazidagi kitob do'koni".to_string()),
        owner_id: Set(owner_id),
        phone_number: Set("+998711234567".to_string()),
        region_id: Set(region_id),
        district_id: Set(district_id),
        star: Set(0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

fn book_new(name: &str, price: i64) -> BookNew {
    BookNew {
        name: name.to_string(),
        author: "Abdulla Qodiriy".to_string(),
        description: "Tarixiy roman".to_string(),
        price,
        cover_type: engine::CoverType::Hard,
        book_type: engine::BookType::Seller,
        category_id: None,
        sub_category_id: None,
        publication_year: Some(1926),
        pages: None,
        isbn: None,
        is_used: false,
    }
}

#[tokio::test]
async fn book_without_shop_is_a_user_listing() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;

    let book = engine
        .new_book(poster.id, book_new("O'tkan kunlar", 50_000))
        .await
        .unwrap();
    assert_eq!(book.owner_type, "user");
    assert_eq!(book.shop_id, None);
}

#[tokio::test]
async fn shop_owner_listing_lands_under_the_shop() {
    let (engine, db) = engine_with_db().await;
    let owner = user(&engine, "100").await;
    let shop = shop(&db, owner.id).await;

    let book = engine
        .new_book(owner.id, book_new("O'tkan kunlar", 50_000))
        .await
        .unwrap();
    assert_eq!(book.owner_type, "shop");
    assert_eq!(book.shop_id, Some(shop.id));
}

#[tokio::test]
async fn like_toggle_is_pairwise_idempotent() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let reader = user(&engine, "200").await;
    let book = engine
        .new_book(poster.id, book_new("O'tkan kunlar", 50_000))
        .await
        .unwrap();

    assert!(engine.toggle_book_like(book.id, reader.id).await.unwrap());
    let detail = engine.book_detail(book.id, reader.id).await.unwrap();
    assert_eq!(detail.overview.likes, 1);
    assert!(detail.liked_by_me);

    assert!(!engine.toggle_book_like(book.id, reader.id).await.unwrap());
    let detail = engine.book_detail(book.id, reader.id).await.unwrap();
    assert_eq!(detail.overview.likes, 0);
    assert!(!detail.liked_by_me);
}

#[tokio::test]
async fn views_are_recorded_once_per_reader() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let reader = user(&engine, "200").await;
    let book = engine
        .new_book(poster.id, book_new("O'tkan kunlar", 50_000))
        .await
        .unwrap();

    engine.book_detail(book.id, reader.id).await.unwrap();
    let detail = engine.book_detail(book.id, reader.id).await.unwrap();
    assert_eq!(detail.overview.views, 1);

    engine.book_detail(book.id, poster.id).await.unwrap();
    let detail = engine.book_detail(book.id, reader.id).await.unwrap();
    assert_eq!(detail.overview.views, 2);
}

#[tokio::test]
async fn banned_book_disappears_from_reads() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let other = user(&engine, "200").await;
    let book = engine
        .new_book(poster.id, book_new("O'tkan kunlar", 50_000))
        .await
        .unwrap();

    // Only the poster (or owning shop) may ban.
    let err = engine.ban_book(book.id, other.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.ban_book(book.id, poster.id).await.unwrap();

    let err = engine.book_detail(book.id, poster.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let page = engine.list_books(BookListFilter::default()).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn list_applies_price_range_and_exclude() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;

    let cheap = engine
        .new_book(poster.id, book_new("Arzon kitob", 10_000))
        .await
        .unwrap();
    let mid = engine
        .new_book(poster.id, book_new("O'rtacha kitob", 30_000))
        .await
        .unwrap();
    engine
        .new_book(poster.id, book_new("Qimmat kitob", 90_000))
        .await
        .unwrap();

    let page = engine
        .list_books(BookListFilter {
            price: RangeFilter {
                min: Some(5_000),
                max: Some(40_000),
            },
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);

    let page = engine
        .list_books(BookListFilter {
            price: RangeFilter {
                min: Some(5_000),
                max: Some(40_000),
            },
            exclude: vec![cheap.id],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].book.id, mid.id);
}

#[tokio::test]
async fn search_matches_transliterated_tokens() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;

    engine
        .new_book(poster.id, book_new("Kitob dunyosi", 20_000))
        .await
        .unwrap();
    engine
        .new_book(poster.id, book_new("Boshqa asar", 20_000))
        .await
        .unwrap();

    let page = engine
        .list_books(BookListFilter {
            q: Some("китоб".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].book.name, "Kitob dunyosi");
}

#[tokio::test]
async fn list_orders_by_price_when_requested() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;

    engine
        .new_book(poster.id, book_new("B", 30_000))
        .await
        .unwrap();
    engine
        .new_book(poster.id, book_new("A", 10_000))
        .await
        .unwrap();
    engine
        .new_book(poster.id, book_new("C", 90_000))
        .await
        .unwrap();

    let page = engine
        .list_books(BookListFilter {
            ordering: Some(engine::Ordering {
                field: "price".to_string(),
                desc: false,
            }),
            ..Default::default()
        })
        .await
        .unwrap();
    let prices: Vec<i64> = page.content.iter().map(|b| b.book.price).collect();
    assert_eq!(prices, vec![10_000, 30_000, 90_000]);
}

#[tokio::test]
async fn pagination_envelope_is_consistent() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;

    for n in 0..25 {
        engine
            .new_book(poster.id, book_new(&format!("Kitob {n}"), 10_000 + n))
            .await
            .unwrap();
    }

    let page = engine
        .list_books(BookListFilter {
            page: engine::PageRequest {
                page_number: 2,
                page_size: 10,
            },
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.elements_number(), 10);
    assert!(page.has_previous());
    assert!(page.has_next());
    assert!(!page.is_empty());
}

#[tokio::test]
async fn comment_replies_stay_on_their_book() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let reader = user(&engine, "200").await;

    let first = engine
        .new_book(poster.id, book_new("Birinchi", 10_000))
        .await
        .unwrap();
    let second = engine
        .new_book(poster.id, book_new("Ikkinchi", 10_000))
        .await
        .unwrap();

    let root = engine
        .create_book_comment(
            reader.id,
            CommentNew {
                book_id: first.id,
                text: "Zo'r kitob!".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap();

    let err = engine
        .create_book_comment(
            reader.id,
            CommentNew {
                book_id: second.id,
                text: "Javob".to_string(),
                parent_id: Some(root.id),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    engine
        .create_book_comment(
            poster.id,
            CommentNew {
                book_id: first.id,
                text: "Rahmat!".to_string(),
                parent_id: Some(root.id),
            },
        )
        .await
        .unwrap();

    let comments = engine.list_book_comments(first.id, reader.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].replies.len(), 1);
}

#[tokio::test]
async fn banned_comment_leaves_lists_and_counts() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let reader = user(&engine, "200").await;
    let book = engine
        .new_book(poster.id, book_new("Kitob", 10_000))
        .await
        .unwrap();

    let comment = engine
        .create_book_comment(
            reader.id,
            CommentNew {
                book_id: book.id,
                text: "Zo'r!".to_string(),
                parent_id: None,
            },
        )
        .await
        .unwrap();

    // Only the author may remove it.
    let err = engine
        .ban_book_comment(comment.id, poster.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.ban_book_comment(comment.id, reader.id).await.unwrap();

    let comments = engine.list_book_comments(book.id, reader.id).await.unwrap();
    assert!(comments.is_empty());
    let detail = engine.book_detail(book.id, reader.id).await.unwrap();
    assert_eq!(detail.overview.comments, 0);
}

#[tokio::test]
async fn orders_stay_within_one_shop() {
    let (engine, db) = engine_with_db().await;
    let owner = user(&engine, "100").await;
    let buyer = user(&engine, "200").await;
    let shop = shop(&db, owner.id).await;

    let shop_book = engine
        .new_book(owner.id, book_new("Do'kon kitobi", 40_000))
        .await
        .unwrap();
    let private_book = engine
        .new_book(buyer.id, book_new("Shaxsiy kitob", 15_000))
        .await
        .unwrap();

    let err = engine
        .place_order(
            buyer.id,
            shop.id,
            vec![OrderItemNew {
                book_id: private_book.id,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let overview = engine
        .place_order(
            buyer.id,
            shop.id,
            vec![OrderItemNew {
                book_id: shop_book.id,
                quantity: 2,
            }],
        )
        .await
        .unwrap();
    assert_eq!(overview.order.status, "pending");
    assert_eq!(overview.items.len(), 1);
    assert_eq!(overview.items[0].quantity, 2);
}

#[tokio::test]
async fn order_status_is_managed_by_shop_members_only() {
    let (engine, db) = engine_with_db().await;
    let owner = user(&engine, "100").await;
    let staff = user(&engine, "200").await;
    let buyer = user(&engine, "300").await;
    let shop = shop(&db, owner.id).await;
    engine.add_shop_staff(owner.id, shop.id, staff.id).await.unwrap();

    let book = engine
        .new_book(owner.id, book_new("Do'kon kitobi", 40_000))
        .await
        .unwrap();
    let overview = engine
        .place_order(
            buyer.id,
            shop.id,
            vec![OrderItemNew {
                book_id: book.id,
                quantity: 1,
            }],
        )
        .await
        .unwrap();

    let err = engine
        .set_order_status(overview.order.id, buyer.id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let updated = engine
        .set_order_status(overview.order.id, staff.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, "confirmed");

    let shop_orders = engine.shop_orders(shop.id, owner.id).await.unwrap();
    assert_eq!(shop_orders.len(), 1);
    let my_orders = engine.user_orders(buyer.id).await.unwrap();
    assert_eq!(my_orders.len(), 1);
}

#[tokio::test]
async fn removed_staff_loses_shop_access() {
    let (engine, db) = engine_with_db().await;
    let owner = user(&engine, "100").await;
    let staff = user(&engine, "200").await;
    let shop = shop(&db, owner.id).await;

    let row = engine.add_shop_staff(owner.id, shop.id, staff.id).await.unwrap();
    engine.shop_orders(shop.id, staff.id).await.unwrap();

    engine.remove_shop_staff(row.id, owner.id).await.unwrap();
    let err = engine.shop_orders(shop.id, staff.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn feedback_is_moderated_before_listing() {
    let (engine, db) = engine_with_db().await;
    let owner = user(&engine, "100").await;
    let visitor = user(&engine, "200").await;
    let shop = shop(&db, owner.id).await;

    let err = engine
        .create_shop_feedback(shop.id, visitor.id, 7, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    engine
        .create_shop_feedback(shop.id, visitor.id, 5, Some("Ajoyib do'kon".to_string()))
        .await
        .unwrap();

    // Inactive until moderated.
    let feedback = engine.list_shop_feedback(shop.id).await.unwrap();
    assert!(feedback.is_empty());
}

#[tokio::test]
async fn popular_posts_rank_by_like_count() {
    let (engine, _db) = engine_with_db().await;
    let author = user(&engine, "100").await;
    let fan_one = user(&engine, "200").await;
    let fan_two = user(&engine, "300").await;

    let quiet = engine
        .new_post(
            author.id,
            PostNew {
                title: "Oddiy post".to_string(),
                content: "Matn".to_string(),
                book_name: "Kitob".to_string(),
                book_author: "Muallif".to_string(),
            },
        )
        .await
        .unwrap();
    let loud = engine
        .new_post(
            author.id,
            PostNew {
                title: "Mashhur post".to_string(),
                content: "Matn".to_string(),
                book_name: "Kitob".to_string(),
                book_author: "Muallif".to_string(),
            },
        )
        .await
        .unwrap();

    engine.toggle_post_like(loud.id, fan_one.id).await.unwrap();
    engine.toggle_post_like(loud.id, fan_two.id).await.unwrap();
    engine.toggle_post_like(quiet.id, fan_one.id).await.unwrap();

    let page = engine
        .list_posts(PostListFilter {
            is_popular: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].post.id, loud.id);
    assert_eq!(page.content[0].likes, 2);
}

#[tokio::test]
async fn liked_books_skips_banned_ones() {
    let (engine, _db) = engine_with_db().await;
    let poster = user(&engine, "100").await;
    let reader = user(&engine, "200").await;

    let keep = engine
        .new_book(poster.id, book_new("Qoladigan", 10_000))
        .await
        .unwrap();
    let gone = engine
        .new_book(poster.id, book_new("Yo'qoladigan", 10_000))
        .await
        .unwrap();

    engine.toggle_book_like(keep.id, reader.id).await.unwrap();
    engine.toggle_book_like(gone.id, reader.id).await.unwrap();
    engine.ban_book(gone.id, poster.id).await.unwrap();

    let liked = engine.liked_books(reader.id).await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].book.id, keep.id);
}
