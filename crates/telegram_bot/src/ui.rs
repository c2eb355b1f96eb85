//! Keyboards shown to the user.

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

pub(crate) const LANG_CALLBACK_PREFIX: &str = "lang:";

pub(crate) fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("O'zbekcha", format!("{LANG_CALLBACK_PREFIX}uzbek")),
        InlineKeyboardButton::callback("English", format!("{LANG_CALLBACK_PREFIX}english")),
        InlineKeyboardButton::callback("Русский", format!("{LANG_CALLBACK_PREFIX}russian")),
    ]])
}

pub(crate) fn contact_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new([[
        KeyboardButton::new("Telefon raqamni ulashish").request(ButtonRequest::Contact)
    ]])
    .resize_keyboard()
    .one_time_keyboard()
}
