//! Token minting and verification.
//!
//! Access and refresh tokens are HS256 JWTs. Besides the expiry, every
//! token embeds the user's `login_time` stamp: the bearer middleware
//! compares it against the user row, so a new login or refresh invalidates
//! everything minted before it.

use api_types::auth::TokenPair;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::ServerError;

/// Header the companion bot authenticates with.
pub const BOT_SECRET_HEADER: &str = "x-bot-secret";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub role: String,
    /// Unix microseconds of the login stamp the token was minted against.
    /// Microsecond precision keeps back-to-back logins distinguishable.
    pub login_time: i64,
    pub kind: TokenKind,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

pub fn login_stamp(user: &engine::users::Model) -> i64 {
    user.login_time
        .map(|t| t.timestamp_micros())
        .unwrap_or_default()
}

impl TokenManager {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: TimeDelta::minutes(access_ttl_minutes),
            refresh_ttl: TimeDelta::days(refresh_ttl_days),
        }
    }

    pub fn mint_pair(&self, user: &engine::users::Model) -> Result<TokenPair, ServerError> {
        Ok(TokenPair {
            access_token: self.mint(user, TokenKind::Access, self.access_ttl)?,
            refresh_token: self.mint(user, TokenKind::Refresh, self.refresh_ttl)?,
        })
    }

    fn mint(
        &self,
        user: &engine::users::Model,
        kind: TokenKind,
        ttl: TimeDelta,
    ) -> Result<String, ServerError> {
        let claims = Claims {
            sub: user.id,
            role: user.role.clone(),
            login_time: login_stamp(user),
            kind,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ServerError::Generic(format!("failed to mint token: {err}")))
    }

    /// Decode and validate a token of the expected kind.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, ServerError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| ServerError::Unauthorized("invalid token".to_string()))?;
        if data.claims.kind != kind {
            return Err(ServerError::Unauthorized("wrong token kind".to_string()));
        }
        Ok(data.claims)
    }
}
