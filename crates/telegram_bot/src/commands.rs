//! Command structs

use teloxide::utils::command::BotCommands;

/// Start command. Needed when user send /start
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum UserStartCommands {
    Start,
}

/// Commands to manage the account
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Akkauntni boshqarish:")]
pub enum AccountCommands {
    #[command(description = "Tilni tanlash.")]
    Language,
    #[command(description = "Telefon raqamni ulashish.")]
    Phone,
    #[command(description = "Ilovaga kirish kodini olish.")]
    Login,
}
