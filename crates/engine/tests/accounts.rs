use engine::{BotRegister, BotUserUpdate, Engine, EngineError, Language, ProfileUpdate};
use migration::MigratorTrait;
use sea_orm::Database;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

async fn register(engine: &Engine, telegram_id: &str) -> engine::users::Model {
    engine
        .register_bot_user(BotRegister {
            telegram_id: telegram_id.to_string(),
            first_name: Some("Alisher".to_string()),
            last_name: None,
            language: Some(Language::Uzbek),
        })
        .await
        .unwrap()
}

async fn register_with_phone(engine: &Engine, telegram_id: &str, phone: &str) -> engine::users::Model {
    register(engine, telegram_id).await;
    engine
        .update_bot_user(
            telegram_id,
            BotUserUpdate {
                phone_number: Some(phone.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn register_rejects_duplicate_telegram_id() {
    let engine = engine_with_db().await;

    register(&engine, "100").await;
    let err = engine
        .register_bot_user(BotRegister {
            telegram_id: "100".to_string(),
            first_name: None,
            last_name: None,
            language: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn otp_reissue_returns_pending_code() {
    let engine = engine_with_db().await;
    register(&engine, "100").await;

    let first = engine.issue_otp("100").await.unwrap();
    assert!(first.fresh);
    assert_eq!(first.code.len(), 6);

    let second = engine.issue_otp("100").await.unwrap();
    assert!(!second.fresh);
    assert_eq!(second.code, first.code);
}

#[tokio::test]
async fn login_consumes_otp() {
    let engine = engine_with_db().await;
    register_with_phone(&engine, "100", "+998901112233").await;

    let issued = engine.issue_otp("100").await.unwrap();
    let user = engine.login("+998901112233", &issued.code).await.unwrap();
    assert!(user.login_time.is_some());

    // The code is single-use.
    let err = engine
        .login("+998901112233", &issued.code)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));

    // A fresh one works again.
    let issued = engine.issue_otp("100").await.unwrap();
    assert!(issued.fresh);
    engine.login("+998901112233", &issued.code).await.unwrap();
}

#[tokio::test]
async fn login_requires_matching_pair() {
    let engine = engine_with_db().await;
    register_with_phone(&engine, "100", "+998901112233").await;
    register_with_phone(&engine, "200", "+998907778899").await;

    let issued = engine.issue_otp("100").await.unwrap();

    // Another user's phone with this user's code.
    let err = engine
        .login("+998907778899", &issued.code)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));

    let err = engine.login("+998901112233", "000000").await.unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn refresh_restamps_login_time() {
    let engine = engine_with_db().await;
    let user = register_with_phone(&engine, "100", "+998901112233").await;

    let issued = engine.issue_otp("100").await.unwrap();
    let logged_in = engine.login("+998901112233", &issued.code).await.unwrap();

    let refreshed = engine.refresh_login(user.id).await.unwrap();
    assert!(refreshed.login_time >= logged_in.login_time);
    assert!(refreshed.login_time.is_some());
}

#[tokio::test]
async fn update_profile_validates_phone() {
    let engine = engine_with_db().await;
    let user = register(&engine, "100").await;

    let err = engine
        .update_profile(
            user.id,
            ProfileUpdate {
                phone_number: Some("998901112233".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let updated = engine
        .update_profile(
            user.id,
            ProfileUpdate {
                phone_number: Some("+998901112233".to_string()),
                bio: Some("kitob sevuvchi".to_string()),
                phone_is_visible: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone_number.as_deref(), Some("+998901112233"));
    assert!(updated.phone_is_visible);
}

#[tokio::test]
async fn bot_update_changes_language() {
    let engine = engine_with_db().await;
    register(&engine, "100").await;

    let updated = engine
        .update_bot_user(
            "100",
            BotUserUpdate {
                language: Some(Language::Russian),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.language, "russian");
}

#[tokio::test]
async fn profile_counts_exclude_banned_content() {
    let engine = engine_with_db().await;
    let user = register(&engine, "100").await;

    let book = engine
        .new_book(
            user.id,
            engine::BookNew {
                name: "Mehrobdan chayon".to_string(),
                author: "Abdulla Qodiriy".to_string(),
                description: "Tarixiy roman".to_string(),
                price: 45_000,
                cover_type: engine::CoverType::Hard,
                book_type: engine::BookType::Seller,
                category_id: None,
                sub_category_id: None,
                publication_year: Some(1929),
                pages: None,
                isbn: None,
                is_used: false,
            },
        )
        .await
        .unwrap();

    let profile = engine.profile(user.id).await.unwrap();
    assert_eq!(profile.books_count, 1);
    assert_eq!(profile.posts_count, 0);

    engine.ban_book(book.id, user.id).await.unwrap();
    let profile = engine.profile(user.id).await.unwrap();
    assert_eq!(profile.books_count, 0);
}
