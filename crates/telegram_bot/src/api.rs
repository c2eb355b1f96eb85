//! HTTP client for the server's bot endpoints.

use api_types::Language;
use api_types::auth::{BotRegister, BotUserRef, BotUserUpdate, BotUserView, OtpIssued};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub(crate) const BOT_SECRET_HEADER: &str = "x-bot-secret";

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

/// The server wraps payloads in `{"result": ..., "success": true}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl ApiError {
    pub(crate) fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Network(_) => None,
            Self::Server { status, .. } => Some(*status),
        }
    }
}

impl ApiClient {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            let envelope = resp.json::<Envelope<TResp>>().await?;
            return Ok(envelope.result);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    pub(crate) async fn register(
        &self,
        telegram_id: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<BotUserView, ApiError> {
        self.post_json(
            "/api/v1/auth/bot/register",
            &BotRegister {
                telegram_id: telegram_id.to_string(),
                first_name,
                last_name,
                language: None,
            },
        )
        .await
    }

    pub(crate) async fn set_language(
        &self,
        telegram_id: &str,
        language: Language,
    ) -> Result<BotUserView, ApiError> {
        self.post_json(
            "/api/v1/auth/bot/update",
            &BotUserUpdate {
                telegram_id: telegram_id.to_string(),
                language: Some(language),
                phone_number: None,
                first_name: None,
                last_name: None,
            },
        )
        .await
    }

    pub(crate) async fn set_phone(
        &self,
        telegram_id: &str,
        phone_number: &str,
    ) -> Result<BotUserView, ApiError> {
        self.post_json(
            "/api/v1/auth/bot/update",
            &BotUserUpdate {
                telegram_id: telegram_id.to_string(),
                language: None,
                phone_number: Some(phone_number.to_string()),
                first_name: None,
                last_name: None,
            },
        )
        .await
    }

    pub(crate) async fn send_otp(&self, telegram_id: &str) -> Result<OtpIssued, ApiError> {
        self.post_json(
            "/api/v1/auth/bot/otp",
            &BotUserRef {
                telegram_id: telegram_id.to_string(),
            },
        )
        .await
    }
}
