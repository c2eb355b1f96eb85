//! Router, state and auth middleware.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use engine::Engine;

use crate::{
    ServerError, auth,
    auth::{TokenKind, TokenManager},
    base, book_comments, books, orders, posts, shops, users,
};

#[derive(Clone)]
pub struct ServerConfig {
    pub token_secret: String,
    pub bot_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: TokenManager,
    bot_secret: String,
}

impl ServerState {
    pub fn new(engine: Engine, config: &ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            tokens: TokenManager::new(
                &config.token_secret,
                config.access_ttl_minutes,
                config.refresh_ttl_days,
            ),
            bot_secret: config.bot_secret.clone(),
        }
    }
}

/// Bearer-token middleware. Loads the user and rejects tokens whose
/// `login_time` stamp no longer matches the user row.
async fn bearer_auth(
    State(state): State<ServerState>,
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_header = auth_header
        .ok_or_else(|| ServerError::Unauthorized("unauthorized access".to_string()))?;
    let claims = state.tokens.verify(auth_header.token(), TokenKind::Access)?;

    let user = state
        .engine
        .user_by_id(claims.sub)
        .await
        .map_err(|_| ServerError::Unauthorized("unauthorized access".to_string()))?;
    if auth::login_stamp(&user) != claims.login_time {
        return Err(ServerError::Unauthorized("token is stale".to_string()));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Shared-secret middleware for the companion bot's provisioning calls.
async fn bot_auth(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let provided = request
        .headers()
        .get(auth::BOT_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    if provided != Some(state.bot_secret.as_str()) {
        return Err(ServerError::Unauthorized(
            "unauthorized access".to_string(),
        ));
    }
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let bot_routes = Router::new()
        .route("/register", post(users::bot_register))
        .route("/language", post(users::bot_language))
        .route("/update", post(users::bot_update))
        .route("/otp", post(users::send_otp))
        .route_layer(middleware::from_fn_with_state(state.clone(), bot_auth));

    let auth_routes = Router::new()
        .nest("/bot", bot_routes)
        .route("/login", post(users::login))
        .route("/refresh", post(users::refresh_token))
        .merge(
            Router::new()
                .route("/me", get(users::check_auth))
                .route("/profile", get(users::profile).patch(users::update_profile))
                .route("/users/{id}", get(users::other_profile))
                .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth)),
        );

    let book_routes = Router::new()
        .route("/", get(books::list).post(books::create))
        .route("/liked", get(books::liked))
        .route("/categories", get(books::categories))
        .route("/sub-categories", get(books::sub_categories))
        .route(
            "/comments",
            get(book_comments::list).post(book_comments::create),
        )
        .route(
            "/comments/{id}",
            axum::routing::delete(book_comments::destroy),
        )
        .route("/comments/{id}/like", post(book_comments::like))
        .route(
            "/{id}",
            get(books::detail)
                .patch(books::update)
                .delete(books::destroy),
        )
        .route("/{id}/like", post(books::like))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    let post_routes = Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route("/comments", post(posts::comment_create))
        .route("/comments/{id}", axum::routing::delete(posts::comment_destroy))
        .route("/comments/{id}/like", post(posts::comment_like))
        .route(
            "/{id}",
            get(posts::detail)
                .patch(posts::update)
                .delete(posts::destroy),
        )
        .route("/{id}/like", post(posts::like))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    let shop_routes = Router::new()
        .route("/", get(shops::list))
        .route("/staff", get(shops::staff_list).post(shops::staff_add))
        .route("/staff/{id}", axum::routing::delete(shops::staff_remove))
        .route("/orders", get(orders::my_orders).post(orders::place))
        .route("/orders/shop/{shop_id}", get(orders::shop_orders))
        .route("/orders/{id}/status", axum::routing::patch(orders::set_status))
        .route("/{id}", get(shops::detail).patch(shops::update))
        .route("/{id}/feedback", get(shops::feedback_list).post(shops::feedback_create))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    let base_routes = Router::new()
        .route("/regions", get(base::regions))
        .route("/regions/{id}/districts", get(base::districts))
        .route("/banners", get(base::banners))
        .route("/faqs", get(base::faqs))
        .route("/privacy-policies", get(base::privacy_policies))
        .merge(
            Router::new()
                .route("/contact-us", post(base::contact_us))
                .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth)),
        );

    Router::new()
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/book", book_routes)
        .nest("/api/v1/post", post_routes)
        .nest("/api/v1/shop", shop_routes)
        .nest("/api/v1/base", base_routes)
        .with_state(state)
}

pub async fn run(engine: Engine, config: ServerConfig) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine, &config);
    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
