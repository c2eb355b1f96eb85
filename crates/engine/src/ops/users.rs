//! Account provisioning, OTP login and profiles.
//!
//! Accounts are created by the companion bot keyed on the telegram id.
//! Login never sees a password: the bot delivers a short numeric code and
//! the client exchanges it, together with the phone number, for tokens.

use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, Language, ResultEngine, books, otps, posts, users,
};

use super::{Engine, normalize_optional_text, with_tx};

pub struct BotRegister {
    pub telegram_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Option<Language>,
}

#[derive(Default)]
pub struct BotUserUpdate {
    pub language: Option<Language>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Code handed to the bot for delivery. `fresh` is false when a pending
/// code was re-delivered instead of generated.
pub struct OtpIssued {
    pub code: String,
    pub fresh: bool,
}

#[derive(Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub language: Option<Language>,
    pub picture: Option<String>,
    pub phone_number: Option<String>,
    pub region_id: Option<i64>,
    pub district_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_text: Option<String>,
    pub phone_is_visible: Option<bool>,
    pub location_is_visible: Option<bool>,
}

pub struct ProfileView {
    pub user: users::Model,
    pub books_count: u64,
    pub posts_count: u64,
}

/// E.164: `+`, a non-zero digit, 3 to 14 further digits.
fn validate_phone_number(value: &str) -> ResultEngine<()> {
    let digits = value.strip_prefix('+').unwrap_or("");
    let valid = (4..=15).contains(&digits.len())
        && !digits.starts_with('0')
        && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(EngineError::InvalidInput(
            "invalid phone number, expected E.164 like +998991234567".to_string(),
        ));
    }
    Ok(())
}

impl Engine {
    /// Create an account for a telegram user.
    pub async fn register_bot_user(&self, cmd: BotRegister) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::TelegramId.eq(cmd.telegram_id.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(cmd.telegram_id));
            }

            let now = Utc::now();
            let user = users::ActiveModel {
                telegram_id: ActiveValue::Set(cmd.telegram_id),
                first_name: ActiveValue::Set(normalize_optional_text(cmd.first_name.as_deref())),
                last_name: ActiveValue::Set(normalize_optional_text(cmd.last_name.as_deref())),
                role: ActiveValue::Set(crate::UserRole::Simple.as_str().to_string()),
                language: ActiveValue::Set(
                    cmd.language.unwrap_or(Language::Uzbek).as_str().to_string(),
                ),
                phone_is_visible: ActiveValue::Set(false),
                location_is_visible: ActiveValue::Set(false),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            Ok(user.insert(&db_tx).await?)
        })
    }

    /// Fetch the account the bot is talking to.
    pub async fn bot_user(&self, telegram_id: &str) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            self.require_user_by_telegram(&db_tx, telegram_id).await
        })
    }

    /// Partial update issued by the bot (language choice, shared contact).
    pub async fn update_bot_user(
        &self,
        telegram_id: &str,
        cmd: BotUserUpdate,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let user = self.require_user_by_telegram(&db_tx, telegram_id).await?;
            let mut active: users::ActiveModel = user.into();

            if let Some(language) = cmd.language {
                active.language = ActiveValue::Set(language.as_str().to_string());
            }
            if let Some(phone) = cmd.phone_number.as_deref() {
                validate_phone_number(phone)?;
                active.phone_number = ActiveValue::Set(Some(phone.to_string()));
            }
            if let Some(first_name) = normalize_optional_text(cmd.first_name.as_deref()) {
                active.first_name = ActiveValue::Set(Some(first_name));
            }
            if let Some(last_name) = normalize_optional_text(cmd.last_name.as_deref()) {
                active.last_name = ActiveValue::Set(Some(last_name));
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Issue (or re-deliver) the login code for a telegram user.
    pub async fn issue_otp(&self, telegram_id: &str) -> ResultEngine<OtpIssued> {
        with_tx!(self, |db_tx| {
            let user = self.require_user_by_telegram(&db_tx, telegram_id).await?;
            if !user.is_active {
                return Err(EngineError::Forbidden("user is not active".to_string()));
            }

            let pending = otps::Entity::find()
                .filter(otps::Column::UserId.eq(user.id))
                .one(&db_tx)
                .await?;

            match pending {
                Some(pending) => Ok(OtpIssued {
                    code: pending.code,
                    fresh: false,
                }),
                None => {
                    let code =
                        format!("{}", rand::thread_rng().gen_range(100_000..=999_999));
                    let otp = otps::ActiveModel {
                        user_id: ActiveValue::Set(user.id),
                        code: ActiveValue::Set(code),
                        created_at: ActiveValue::Set(Utc::now()),
                        ..Default::default()
                    };
                    let otp = otp.insert(&db_tx).await?;
                    Ok(OtpIssued {
                        code: otp.code,
                        fresh: true,
                    })
                }
            }
        })
    }

    /// Exchange phone number + OTP code for the account. The code is
    /// single-use: success deletes it and re-stamps `login_time`.
    ///
    /// The error never discloses which half of the pair was wrong.
    pub async fn login(&self, phone_number: &str, code: &str) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let invalid =
                || EngineError::Unauthorized("phone number or code is invalid".to_string());

            let user = users::Entity::find()
                .filter(users::Column::PhoneNumber.eq(phone_number))
                .filter(users::Column::IsActive.eq(true))
                .one(&db_tx)
                .await?
                .ok_or_else(invalid)?;

            let otp = otps::Entity::find()
                .filter(otps::Column::UserId.eq(user.id))
                .filter(otps::Column::Code.eq(code))
                .one(&db_tx)
                .await?
                .ok_or_else(invalid)?;
            otps::Entity::delete_by_id(otp.id).exec(&db_tx).await?;

            let mut active: users::ActiveModel = user.into();
            active.login_time = ActiveValue::Set(Some(Utc::now()));
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Re-stamp `login_time` for a refresh, invalidating older tokens.
    pub async fn refresh_login(&self, user_id: i64) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = user.into();
            active.login_time = ActiveValue::Set(Some(Utc::now()));
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Active user lookup, used by the bearer-token middleware.
    pub async fn user_by_id(&self, user_id: i64) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| self.require_user(&db_tx, user_id).await)
    }

    /// Profile with derived listing/post counts.
    pub async fn profile(&self, user_id: i64) -> ResultEngine<ProfileView> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let books_count = books::Entity::find()
                .filter(books::Column::PostedBy.eq(user.id))
                .filter(books::Column::IsBanned.eq(false))
                .count(&db_tx)
                .await?;
            let posts_count = posts::Entity::find()
                .filter(posts::Column::UserId.eq(user.id))
                .filter(posts::Column::IsBanned.eq(false))
                .count(&db_tx)
                .await?;
            Ok(ProfileView {
                user,
                books_count,
                posts_count,
            })
        })
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        cmd: ProfileUpdate,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = user.into();

            if let Some(first_name) = cmd.first_name.as_deref() {
                active.first_name = ActiveValue::Set(normalize_optional_text(Some(first_name)));
            }
            if let Some(last_name) = cmd.last_name.as_deref() {
                active.last_name = ActiveValue::Set(normalize_optional_text(Some(last_name)));
            }
            if let Some(bio) = cmd.bio.as_deref() {
                active.bio = ActiveValue::Set(normalize_optional_text(Some(bio)));
            }
            if let Some(language) = cmd.language {
                active.language = ActiveValue::Set(language.as_str().to_string());
            }
            if let Some(picture) = cmd.picture {
                active.picture = ActiveValue::Set(Some(picture));
            }
            if let Some(phone) = cmd.phone_number.as_deref() {
                validate_phone_number(phone)?;
                active.phone_number = ActiveValue::Set(Some(phone.to_string()));
            }
            if let Some(region_id) = cmd.region_id {
                active.region_id = ActiveValue::Set(Some(region_id));
            }
            if let Some(district_id) = cmd.district_id {
                active.district_id = ActiveValue::Set(Some(district_id));
            }
            if let Some(latitude) = cmd.latitude {
                active.latitude = ActiveValue::Set(Some(latitude));
            }
            if let Some(longitude) = cmd.longitude {
                active.longitude = ActiveValue::Set(Some(longitude));
            }
            if let Some(location_text) = cmd.location_text.as_deref() {
                active.location_text =
                    ActiveValue::Set(normalize_optional_text(Some(location_text)));
            }
            if let Some(visible) = cmd.phone_is_visible {
                active.phone_is_visible = ActiveValue::Set(visible);
            }
            if let Some(visible) = cmd.location_is_visible {
                active.location_is_visible = ActiveValue::Set(visible);
            }

            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(active.update(&db_tx).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::validate_phone_number;

    #[test]
    fn accepts_e164_numbers() {
        assert!(validate_phone_number("+998991234567").is_ok());
        assert!(validate_phone_number("+12025550123").is_ok());
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(validate_phone_number("998991234567").is_err());
        assert!(validate_phone_number("+0998991234").is_err());
        assert!(validate_phone_number("+99").is_err());
        assert!(validate_phone_number("+99899one").is_err());
        assert!(validate_phone_number("+9989912345678901").is_err());
    }
}
