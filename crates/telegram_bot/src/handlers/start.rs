//! Handler for the /start command

use reqwest::StatusCode;
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
};

use crate::{ConfigParameters, commands::UserStartCommands, ui};

/// Build the schema for `UserStartCommands` commands
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter_command::<UserStartCommands>()
        .endpoint(handle_start_command)
}

async fn handle_start_command(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: UserStartCommands,
) -> ResponseResult<()> {
    let UserStartCommands::Start = cmd;

    let Some(from) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, "Foydalanuvchini aniqlab bo'lmadi.")
            .await?;
        return Ok(());
    };

    let telegram_id = from.id.to_string();
    let first_name = Some(from.first_name.clone());
    let last_name = from.last_name.clone();

    match cfg.api.register(&telegram_id, first_name, last_name).await {
        Ok(_) => {
            bot.send_message(msg.chat.id, "Ro'yxatdan o'tdingiz! Tilni tanlang:")
                .reply_markup(ui::language_keyboard())
                .await?;
        }
        Err(err) if err.status() == Some(StatusCode::CONFLICT) => {
            bot.send_message(
                msg.chat.id,
                "Siz allaqachon ro'yxatdan o'tgansiz. Kirish kodi uchun /login buyrug'ini yuboring.",
            )
            .await?;
        }
        Err(err) => {
            tracing::debug!("register failed: {err}");
            bot.send_message(
                msg.chat.id,
                "Server bilan bog'lanishda muammo. Keyinroq urinib ko'ring!",
            )
            .await?;
        }
    }

    Ok(())
}
