//! Handlers for account settings and login codes.

use api_types::Language;
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
};

use crate::{ConfigParameters, commands::AccountCommands, ui};

const SERVER_TROUBLE: &str = "Server bilan bog'lanishda muammo. Keyinroq urinib ko'ring!";

/// Build the schema for `AccountCommands` commands
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter_command::<AccountCommands>()
        .endpoint(handle_account_command)
}

/// Shared-contact messages carry the phone number.
pub(crate) fn contact_schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter(|msg: Message| msg.contact().is_some())
        .endpoint(handle_contact)
}

async fn handle_account_command(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: AccountCommands,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, "Foydalanuvchini aniqlab bo'lmadi.")
            .await?;
        return Ok(());
    };
    let telegram_id = from.id.to_string();

    match cmd {
        AccountCommands::Language => {
            bot.send_message(msg.chat.id, "Tilni tanlang:")
                .reply_markup(ui::language_keyboard())
                .await?;
        }
        AccountCommands::Phone => {
            bot.send_message(msg.chat.id, "Telefon raqamingizni ulashing:")
                .reply_markup(ui::contact_keyboard())
                .await?;
        }
        AccountCommands::Login => match cfg.api.send_otp(&telegram_id).await {
            Ok(issued) => {
                let text = if issued.fresh {
                    format!("Kirish kodingiz: {}", issued.otp_code)
                } else {
                    format!("Amaldagi kirish kodingiz: {}", issued.otp_code)
                };
                bot.send_message(msg.chat.id, text).await?;
            }
            Err(err) => {
                tracing::debug!("otp request failed: {err}");
                bot.send_message(msg.chat.id, SERVER_TROUBLE).await?;
            }
        },
    }

    Ok(())
}

async fn handle_contact(bot: Bot, cfg: ConfigParameters, msg: Message) -> ResponseResult<()> {
    let (Some(from), Some(contact)) = (msg.from.as_ref(), msg.contact()) else {
        return Ok(());
    };

    // Telegram omits the leading plus on shared contacts.
    let phone = if contact.phone_number.starts_with('+') {
        contact.phone_number.clone()
    } else {
        format!("+{}", contact.phone_number)
    };

    match cfg.api.set_phone(&from.id.to_string(), &phone).await {
        Ok(_) => {
            bot.send_message(
                msg.chat.id,
                "Telefon raqam saqlandi. Kirish kodi uchun /login buyrug'ini yuboring.",
            )
            .await?;
        }
        Err(err) => {
            tracing::debug!("phone update failed: {err}");
            bot.send_message(msg.chat.id, SERVER_TROUBLE).await?;
        }
    }

    Ok(())
}

pub(crate) async fn handle_callback(
    bot: Bot,
    cfg: ConfigParameters,
    query: CallbackQuery,
) -> ResponseResult<()> {
    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let telegram_id = query.from.id.to_string();

    let _ = bot.answer_callback_query(query.id.clone()).await;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(raw) = data.strip_prefix(ui::LANG_CALLBACK_PREFIX) else {
        return Ok(());
    };

    let language = match raw {
        "uzbek" => Language::Uzbek,
        "english" => Language::English,
        "russian" => Language::Russian,
        _ => return Ok(()),
    };

    match cfg.api.set_language(&telegram_id, language).await {
        Ok(_) => {
            bot.send_message(
                chat_id,
                "Til saqlandi. Telefon raqam ulashish uchun /phone buyrug'ini yuboring.",
            )
            .await?;
        }
        Err(err) => {
            tracing::debug!("language update failed: {err}");
            bot.send_message(chat_id, SERVER_TROUBLE).await?;
        }
    }

    Ok(())
}
