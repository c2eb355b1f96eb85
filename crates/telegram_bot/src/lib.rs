//! Telegram bot.
//!
//! The bot is a thin client: it talks only to the HTTP server's bot
//! endpoints (authenticated with the shared `x-bot-secret` header) and
//! never accesses the database directly. It provisions accounts, captures
//! language and phone number, and delivers login codes.

use reqwest::{Client, header};
use teloxide::prelude::*;

mod api;
mod commands;
mod handlers;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    api: api::ApiClient,
}

pub struct Bot {
    token: String,
    server: String,
    client: Client,
}

impl Bot {
    pub fn new(token: &str, server: &str, bot_secret: &str) -> Result<Self, String> {
        let mut secret = header::HeaderValue::try_from(bot_secret)
            .map_err(|err| format!("invalid bot secret header value: {err}"))?;
        secret.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(api::BOT_SECRET_HEADER, secret);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;

        Ok(Self {
            token: token.to_string(),
            server: server.to_string(),
            client,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let parameters = ConfigParameters {
            api: api::ApiClient::new(self.client.clone(), self.server.clone()),
        };

        let handler = dptree::entry()
            .branch(handlers::start::schema())
            .branch(handlers::account::schema())
            .branch(handlers::account::contact_schema())
            .branch(Update::filter_callback_query().endpoint(handlers::account::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    server: String,
    bot_secret: String,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn server(mut self, server: &str, bot_secret: &str) -> BotBuilder {
        self.server = server.to_string();
        self.bot_secret = bot_secret.to_string();
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        Bot::new(&self.token, &self.server, &self.bot_secret)
    }
}
