//! Browser localStorage helpers
//!
//! Session data (token, user, welcome line) and the notification log live
//! in `localStorage`. Missing storage or corrupt values read as absent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::Storage;

use crate::domain::Notification;
use crate::models::{LoginResponse, User};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const WELCOME_KEY: &str = "welcome";
const NOTIFICATIONS_KEY: &str = "areatrans:notifications";

fn storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn get(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

fn set(key: &str, value: &str) {
    if let Some(s) = storage() {
        if s.set_item(key, value).is_err() {
            log::warn!("[SESSION] could not write {}", key);
        }
    }
}

fn remove(key: &str) {
    if let Some(s) = storage() {
        let _ = s.remove_item(key);
    }
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[SESSION] ignoring corrupt {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => set(key, &raw),
        Err(e) => log::error!("[SESSION] could not serialize {}: {}", key, e),
    }
}

// ========================
// Session
// ========================

pub fn save_login(resp: &LoginResponse) {
    set(TOKEN_KEY, &resp.token);
    save_json(USER_KEY, &resp.user);
    set(WELCOME_KEY, &resp.message);
}

pub fn token() -> Option<String> {
    get(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn is_authenticated() -> bool {
    token().is_some()
}

pub fn user() -> Option<User> {
    load_json::<Option<User>>(USER_KEY).flatten()
}

pub fn welcome_message() -> String {
    welcome_text(get(WELCOME_KEY), user().as_ref())
}

/// Stored welcome line, else one built from the user's name.
fn welcome_text(stored: Option<String>, user: Option<&User>) -> String {
    if let Some(w) = stored.filter(|w| !w.trim().is_empty()) {
        return w;
    }
    match user.map(|u| u.name.trim()).filter(|n| !n.is_empty()) {
        Some(name) => format!("Bienvenido, {}", name),
        None => "Bienvenido".to_string(),
    }
}

/// Logout. The notification log is kept.
pub fn clear() {
    remove(TOKEN_KEY);
    remove(USER_KEY);
    remove(WELCOME_KEY);
}

// ========================
// Notifications
// ========================

pub fn load_notifications() -> Vec<Notification> {
    load_json(NOTIFICATIONS_KEY).unwrap_or_default()
}

pub fn save_notifications(log: &[Notification]) {
    save_json(NOTIFICATIONS_KEY, &log);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User { email: "a@b.es".into(), name: name.into() }
    }

    #[test]
    fn test_welcome_prefers_stored_message() {
        assert_eq!(welcome_text(Some("Bienvenido, Ana".into()), None), "Bienvenido, Ana");
        assert_eq!(welcome_text(Some("  ".into()), Some(&user("Luis"))), "Bienvenido, Luis");
        assert_eq!(welcome_text(None, Some(&user(""))), "Bienvenido");
        assert_eq!(welcome_text(None, None), "Bienvenido");
    }
}
