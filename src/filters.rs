//! Client-side list filtering for the feed and gallery, plus the feed's contact link.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::models::{Item, ItemStatus};

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

/// Feed tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl FeedFilter {
    pub const ALL: [FeedFilter; 3] = [FeedFilter::All, FeedFilter::Lost, FeedFilter::Found];

    pub fn label(self) -> &'static str {
        match self {
            FeedFilter::All => "All",
            FeedFilter::Lost => "Lost",
            FeedFilter::Found => "Found",
        }
    }

    fn status(self) -> Option<ItemStatus> {
        match self {
            FeedFilter::All => None,
            FeedFilter::Lost => Some(ItemStatus::Lost),
            FeedFilter::Found => Some(ItemStatus::Found),
        }
    }

    pub fn matches(self, item: &Item) -> bool {
        self.status().map_or(true, |s| item.status == s)
    }

    /// Items this tab would show
    pub fn count(self, items: &[Item]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }

    pub fn apply(self, items: &[Item]) -> Vec<Item> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// Gallery search box and dropdowns; empty strings mean "all"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryFilter {
    pub search: String,
    pub category: String,
    pub status: Option<ItemStatus>,
}

impl GalleryFilter {
    pub fn matches(&self, item: &Item) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.location.to_lowercase().contains(&needle);
        let category_ok = self.category.is_empty() || item.category == self.category;
        let status_ok = self.status.map_or(true, |s| item.status == s);
        text_ok && category_ok && status_ok
    }

    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// `mailto:` link with an encoded subject, `None` when the item has no contact address
pub fn contact_mailto(item: &Item) -> Option<String> {
    let address = item.contact_address()?;
    let subject = format!("Regarding your {} item: {}", item.status.as_str(), item.title);
    Some(format!(
        "mailto:{}?subject={}",
        address.trim(),
        utf8_percent_encode(&subject, NON_ALPHANUMERIC)
    ))
}
