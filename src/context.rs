//! Application Context
//!
//! Shared state provided via Leptos Context API. Sections only ever need the
//! selected hub and a way to log a notification.

use leptos::prelude::*;

use crate::domain::{Notification, Section};
use crate::store::{store_push_notification, AppStore};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Selected hub - read
    pub hub: ReadSignal<String>,
    /// Selected hub - write
    set_hub: WriteSignal<String>,
    /// Section shown in the main panel - read
    pub section: ReadSignal<Section>,
    /// Section shown in the main panel - write
    set_section: WriteSignal<Section>,
    store: AppStore,
}

impl AppContext {
    pub fn new(
        hub: (ReadSignal<String>, WriteSignal<String>),
        section: (ReadSignal<Section>, WriteSignal<Section>),
        store: AppStore,
    ) -> Self {
        Self {
            hub: hub.0,
            set_hub: hub.1,
            section: section.0,
            set_section: section.1,
            store,
        }
    }

    pub fn select_hub(&self, hub: &str) {
        self.set_hub.set(hub.to_string());
    }

    pub fn select_section(&self, section: Section) {
        self.set_section.set(section);
    }

    /// False once the user moved to another hub (or the shell is gone).
    pub fn is_current_hub(&self, hub: &str) -> bool {
        self.hub.try_with_untracked(|h| h == hub).unwrap_or(false)
    }

    /// Log a successful action under the hub the request was made for.
    pub fn notify(&self, hub: &str, kind: &str, title: &str, message: impl AsRef<str>) {
        log::info!("[{}] {}: {}", kind, title, message.as_ref());
        store_push_notification(&self.store, Notification::new(kind, title, message.as_ref(), hub));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppState;
    use reactive_stores::Store;

    fn context() -> AppContext {
        AppContext::new(
            signal("Hub Cadiz".to_string()),
            signal(Section::Compras),
            Store::new(AppState::default()),
        )
    }

    #[test]
    fn test_is_current_hub_follows_selection() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = context();
            assert!(ctx.is_current_hub("Hub Cadiz"));
            ctx.select_hub("Hub Cordoba");
            assert!(!ctx.is_current_hub("Hub Cadiz"));
            assert!(ctx.is_current_hub("Hub Cordoba"));
        });
    }

    #[test]
    fn test_is_current_hub_after_shell_disposed() {
        let owner = Owner::new();
        let ctx = owner.with(context);
        owner.cleanup();
        assert!(!ctx.is_current_hub("Hub Cadiz"));
    }
}
