//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Item, Profile};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Every reported item, as shown on the feed
    pub feed_items: Vec<Item>,
    /// Items reported by the signed-in user
    pub my_items: Vec<Item>,
    /// Signed-in user's profile, once loaded
    pub profile: Option<Profile>,
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

pub fn store_set_feed(store: &AppStore, items: Vec<Item>) {
    *store.feed_items().write() = items;
}

pub fn store_set_my_items(store: &AppStore, items: Vec<Item>) {
    *store.my_items().write() = items;
}

/// Newly submitted item goes to the top of both lists
pub fn store_add_item(store: &AppStore, item: Item) {
    store.my_items().write().insert(0, item.clone());
    store.feed_items().write().insert(0, item);
}

/// Remove an item from every list by ID
pub fn store_remove_item(store: &AppStore, item_id: u64) {
    store.my_items().write().retain(|item| item.id != item_id);
    store.feed_items().write().retain(|item| item.id != item_id);
}

pub fn store_set_profile(store: &AppStore, profile: Option<Profile>) {
    *store.profile().write() = profile;
}

/// Drop everything tied to the session
pub fn store_clear_session(store: &AppStore) {
    store.my_items().write().clear();
    store_set_profile(store, None);
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub reported: usize,
    pub active: usize,
    pub reunited: usize,
}

impl DashboardStats {
    /// Every reported item counts as active until reunions are tracked
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            reported: items.len(),
            active: items.len(),
            reunited: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;

    fn item(id: u64) -> Item {
        Item {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            category: "Other".into(),
            location: String::new(),
            date: String::new(),
            status: ItemStatus::Lost,
            image_url: None,
            images: Vec::new(),
            contact_info: None,
            user: None,
            ai_labels: Vec::new(),
        }
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = DashboardStats::from_items(&[item(1), item(2)]);
        assert_eq!(stats, DashboardStats { reported: 2, active: 2, reunited: 0 });
        assert_eq!(DashboardStats::from_items(&[]), DashboardStats::default());
    }
}
