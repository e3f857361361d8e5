//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! fitkart login -e riya@gmail.com
//! fitkart whoami
//! fitkart logout
//! ```
//!
//! Signing in with an email that contains `admin` unlocks the admin commands.

use fitkart_core::{Email, User};
use fitkart_storefront::Store;
use fitkart_storefront::storage::KeyValueStore;
use tracing::info;

use super::CommandError;

/// Sign in with an email, replacing any current session.
///
/// # Errors
///
/// Returns `CommandError::Email` if the email is blank or too long.
pub fn login<S: KeyValueStore>(store: &mut Store<S>, email: &str) -> Result<User, CommandError> {
    let email = Email::parse(email)?;
    store.login(email);

    let user = store.user().cloned().ok_or(CommandError::LoginRequired)?;
    if user.is_admin {
        info!("Signed in as {} (admin)", user.email);
    } else {
        info!("Signed in as {}", user.email);
    }
    Ok(user)
}

/// Sign out. The cart is kept.
pub fn logout<S: KeyValueStore>(store: &mut Store<S>) {
    let email = store.user().map(|user| user.email.clone());
    store.logout();
    match email {
        Some(email) => info!("Signed out {email}"),
        None => info!("Not signed in"),
    }
}

/// Show the signed-in user.
pub fn whoami<S: KeyValueStore>(store: &Store<S>) {
    match store.user() {
        Some(user) => {
            info!("{} <{}>", user.name, user.email);
            if user.is_admin {
                info!("  Role: admin");
            }
        }
        None => info!("Not signed in"),
    }
}
