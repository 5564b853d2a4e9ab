//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::domain::notification::{self, Notification};
use crate::session;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Notification log, newest first, mirrored to localStorage
    pub notifications: Vec<Notification>,
}

impl AppState {
    pub fn load() -> Self {
        Self {
            notifications: session::load_notifications(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

fn persist(store: &AppStore) {
    store
        .notifications()
        .with_untracked(|log| session::save_notifications(log));
}

pub fn store_push_notification(store: &AppStore, n: Notification) {
    notification::push(&mut store.notifications().write(), n);
    persist(store);
}

pub fn store_mark_read(store: &AppStore, id: &str) {
    notification::mark_read(&mut store.notifications().write(), id);
    persist(store);
}

pub fn store_mark_all_read(store: &AppStore) {
    notification::mark_all_read(&mut store.notifications().write());
    persist(store);
}

pub fn store_clear_notifications(store: &AppStore) {
    store.notifications().write().clear();
    persist(store);
}
