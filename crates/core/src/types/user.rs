//! Session user.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The signed-in shopper.
///
/// There is no account store: the record is derived entirely from the email
/// typed at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Grants the admin panel. Derived from the email, not verified.
    pub is_admin: bool,
}

impl User {
    /// Id given to every session user.
    pub const SESSION_ID: &'static str = "u1";

    /// Display name given to every session user.
    pub const DEFAULT_NAME: &'static str = "User";

    /// Build the session user for an email.
    #[must_use]
    pub fn from_email(email: Email) -> Self {
        Self {
            id: UserId::new(Self::SESSION_ID),
            name: Self::DEFAULT_NAME.to_owned(),
            is_admin: email.has_admin_marker(),
            email,
        }
    }
}
