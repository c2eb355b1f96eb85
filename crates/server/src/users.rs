//! Account endpoints: bot provisioning, OTP login, tokens and profiles.

use api_types::auth::{
    BotRegister, BotUserRef, BotUserUpdate, BotUserView, Login, OtpIssued, RefreshToken, TokenPair,
};
use api_types::user::{Profile, ProfileUpdate, PublicProfile};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    ServerError,
    auth::TokenKind,
    created,
    server::ServerState,
    success,
};

pub(crate) fn map_role(role: engine::UserRole) -> api_types::UserRole {
    match role {
        engine::UserRole::Superadmin => api_types::UserRole::Superadmin,
        engine::UserRole::Admin => api_types::UserRole::Admin,
        engine::UserRole::Simple => api_types::UserRole::Simple,
        engine::UserRole::Premium => api_types::UserRole::Premium,
        engine::UserRole::Publisher => api_types::UserRole::Publisher,
        engine::UserRole::Library => api_types::UserRole::Library,
        engine::UserRole::Bookshop => api_types::UserRole::Bookshop,
    }
}

pub(crate) fn role_from_db(raw: &str) -> api_types::UserRole {
    engine::UserRole::try_from(raw)
        .map(map_role)
        .unwrap_or_default()
}

fn map_language(language: engine::Language) -> api_types::Language {
    match language {
        engine::Language::Uzbek => api_types::Language::Uzbek,
        engine::Language::English => api_types::Language::English,
        engine::Language::Russian => api_types::Language::Russian,
    }
}

fn language_from_db(raw: &str) -> api_types::Language {
    engine::Language::try_from(raw)
        .map(map_language)
        .unwrap_or_default()
}

fn language_to_engine(language: api_types::Language) -> engine::Language {
    match language {
        api_types::Language::Uzbek => engine::Language::Uzbek,
        api_types::Language::English => engine::Language::English,
        api_types::Language::Russian => engine::Language::Russian,
    }
}

fn bot_user_view(user: &engine::users::Model) -> BotUserView {
    BotUserView {
        telegram_id: user.telegram_id.clone(),
        language: language_from_db(&user.language),
        phone_number: user.phone_number.clone(),
    }
}

fn profile_view(view: engine::ProfileView) -> Profile {
    let user = view.user;
    Profile {
        id: user.id,
        telegram_id: user.telegram_id,
        phone_number: user.phone_number,
        first_name: user.first_name,
        last_name: user.last_name,
        bio: user.bio,
        role: role_from_db(&user.role),
        language: language_from_db(&user.language),
        picture: user.picture,
        region_id: user.region_id,
        district_id: user.district_id,
        latitude: user.latitude,
        longitude: user.longitude,
        location_text: user.location_text,
        phone_is_visible: user.phone_is_visible,
        location_is_visible: user.location_is_visible,
        books_count: view.books_count,
        posts_count: view.posts_count,
    }
}

/// Phone and location are disclosed only when the owner opted in.
fn public_profile_view(view: engine::ProfileView) -> PublicProfile {
    let user = view.user;
    let phone_number = if user.phone_is_visible {
        user.phone_number
    } else {
        None
    };
    let (latitude, longitude, location_text) = if user.location_is_visible {
        (user.latitude, user.longitude, user.location_text)
    } else {
        (None, None, None)
    };
    PublicProfile {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        bio: user.bio,
        role: role_from_db(&user.role),
        picture: user.picture,
        region_id: user.region_id,
        district_id: user.district_id,
        phone_number,
        latitude,
        longitude,
        location_text,
        books_count: view.books_count,
        posts_count: view.posts_count,
    }
}

pub async fn bot_register(
    State(state): State<ServerState>,
    Json(payload): Json<BotRegister>,
) -> Result<impl IntoResponse, ServerError> {
    let user = state
        .engine
        .register_bot_user(engine::BotRegister {
            telegram_id: payload.telegram_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            language: payload.language.map(language_to_engine),
        })
        .await?;

    Ok(created(bot_user_view(&user)))
}

pub async fn bot_language(
    State(state): State<ServerState>,
    Json(payload): Json<BotUserRef>,
) -> Result<impl IntoResponse, ServerError> {
    let user = state.engine.bot_user(&payload.telegram_id).await?;
    Ok(success(bot_user_view(&user)))
}

pub async fn bot_update(
    State(state): State<ServerState>,
    Json(payload): Json<BotUserUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    let user = state
        .engine
        .update_bot_user(
            &payload.telegram_id,
            engine::BotUserUpdate {
                language: payload.language.map(language_to_engine),
                phone_number: payload.phone_number,
                first_name: payload.first_name,
                last_name: payload.last_name,
            },
        )
        .await?;
    Ok(success(bot_user_view(&user)))
}

pub async fn send_otp(
    State(state): State<ServerState>,
    Json(payload): Json<BotUserRef>,
) -> Result<impl IntoResponse, ServerError> {
    let issued = state.engine.issue_otp(&payload.telegram_id).await?;
    Ok(created(OtpIssued {
        otp_code: issued.code,
        fresh: issued.fresh,
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<impl IntoResponse, ServerError> {
    let user = state
        .engine
        .login(&payload.phone_number, &payload.otp_code)
        .await?;
    let pair: TokenPair = state.tokens.mint_pair(&user)?;
    Ok(success(pair))
}

pub async fn refresh_token(
    State(state): State<ServerState>,
    Json(payload): Json<RefreshToken>,
) -> Result<impl IntoResponse, ServerError> {
    let claims = state
        .tokens
        .verify(&payload.refresh_token, TokenKind::Refresh)?;
    let user = state.engine.refresh_login(claims.sub).await?;
    let pair: TokenPair = state.tokens.mint_pair(&user)?;
    Ok(success(pair))
}

pub async fn check_auth(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state.engine.profile(user.id).await?;
    Ok(success(profile_view(view)))
}

pub async fn profile(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state.engine.profile(user.id).await?;
    Ok(success(profile_view(view)))
}

pub async fn update_profile(
    Extension(user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .engine
        .update_profile(
            user.id,
            engine::ProfileUpdate {
                first_name: payload.first_name,
                last_name: payload.last_name,
                bio: payload.bio,
                language: payload.language.map(language_to_engine),
                picture: payload.picture,
                phone_number: payload.phone_number,
                region_id: payload.region_id,
                district_id: payload.district_id,
                latitude: payload.latitude,
                longitude: payload.longitude,
                location_text: payload.location_text,
                phone_is_visible: payload.phone_is_visible,
                location_is_visible: payload.location_is_visible,
            },
        )
        .await?;

    let view = state.engine.profile(user.id).await?;
    Ok(success(profile_view(view)))
}

pub async fn other_profile(
    Extension(_user): Extension<engine::users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state.engine.profile(id).await?;
    Ok((StatusCode::OK, success(public_profile_view(view))))
}
