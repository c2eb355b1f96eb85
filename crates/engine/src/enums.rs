//! String-backed enums stored in the database.
//!
//! Columns keep the canonical lowercase string; `TryFrom<&str>` is the
//! single place a raw value is checked.

use crate::EngineError;

macro_rules! db_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = EngineError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(EngineError::InvalidInput(format!(
                        concat!("invalid ", stringify!($name), ": {}"),
                        other
                    ))),
                }
            }
        }
    };
}

db_enum! {
    /// Account role. New accounts start as `Simple`.
    UserRole {
        Superadmin => "superadmin",
        Admin => "admin",
        Simple => "simple",
        Premium => "premium",
        Publisher => "publisher",
        Library => "library",
        Bookshop => "bookshop",
    }
}

db_enum! {
    Language {
        Uzbek => "uzbek",
        English => "english",
        Russian => "russian",
    }
}

db_enum! {
    /// Who owns a book listing.
    OwnerType {
        User => "user",
        Shop => "shop",
    }
}

db_enum! {
    CoverType {
        Hard => "hard",
        Soft => "soft",
    }
}

db_enum! {
    BookType {
        Gift => "gift",
        Exchange => "exchange",
        Seller => "seller",
    }
}

db_enum! {
    OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Rejected => "rejected",
        Sold => "sold",
    }
}

db_enum! {
    PolicyType {
        Public => "public",
        Bookshop => "bookshop",
        Library => "library",
    }
}

/// Relation of a user to a shop, resolved from ownership and the staff
/// table. Not stored as a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopRole {
    Owner,
    Staff,
}

impl ShopRole {
    pub fn can_manage_orders(self) -> bool {
        matches!(self, Self::Owner | Self::Staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_db_strings() {
        assert_eq!(UserRole::try_from("premium").unwrap(), UserRole::Premium);
        assert_eq!(OwnerType::Shop.as_str(), "shop");
        assert_eq!(
            OrderStatus::try_from(OrderStatus::Sold.as_str()).unwrap(),
            OrderStatus::Sold
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Language::try_from("klingon").is_err());
        assert!(CoverType::try_from("HARD").is_err());
    }
}
