use super::*;
use crate::models::UserSummary;

fn item(id: u64, title: &str, location: &str, category: &str, status: ItemStatus) -> Item {
    Item {
        id,
        title: title.into(),
        description: String::new(),
        category: category.into(),
        location: location.into(),
        date: "2024-03-01T10:00:00".into(),
        status,
        image_url: None,
        images: Vec::new(),
        contact_info: None,
        user: Some(UserSummary { id: 1, name: "Ravi".into(), email: "ravi@campus.edu".into() }),
        ai_labels: Vec::new(),
    }
}

fn sample() -> Vec<Item> {
    vec![
        item(1, "Black iPhone 13", "C Block", "Electronics", ItemStatus::Lost),
        item(2, "Blue Water Bottle", "Library", "Personal Items", ItemStatus::Found),
        item(3, "Calculus Textbook", "Library", "Books & Stationery", ItemStatus::Lost),
    ]
}

#[test]
fn test_feed_tabs_count_by_status() {
    let items = sample();
    assert_eq!(FeedFilter::All.count(&items), 3);
    assert_eq!(FeedFilter::Lost.count(&items), 2);
    assert_eq!(FeedFilter::Found.count(&items), 1);

    let found = FeedFilter::Found.apply(&items);
    assert_eq!(found.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_gallery_search_matches_title_or_location_case_insensitively() {
    let items = sample();
    let filter = GalleryFilter { search: "LIBRARY".into(), ..Default::default() };
    assert_eq!(filter.apply(&items).len(), 2);

    let filter = GalleryFilter { search: "iphone".into(), ..Default::default() };
    assert_eq!(filter.apply(&items)[0].id, 1);
}

#[test]
fn test_gallery_filters_combine() {
    let items = sample();
    let filter = GalleryFilter {
        search: "library".into(),
        category: "Books & Stationery".into(),
        status: Some(ItemStatus::Lost),
    };
    let ids: Vec<u64> = filter.apply(&items).iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3]);

    let none = GalleryFilter { status: Some(ItemStatus::Found), category: "Electronics".into(), ..Default::default() };
    assert!(none.apply(&items).is_empty());
}

#[test]
fn test_mailto_subject_is_percent_encoded() {
    let mut it = item(4, "Keys & Fob", "Parking", "Keys", ItemStatus::Found);
    it.contact_info = Some("finder@campus.edu".into());
    assert_eq!(
        contact_mailto(&it).unwrap(),
        "mailto:finder@campus.edu?subject=Regarding%20your%20found%20item%3A%20Keys%20%26%20Fob"
    );
}

#[test]
fn test_mailto_falls_back_to_reporter_email() {
    let it = item(5, "Scarf", "Main Canteen", "Clothing", ItemStatus::Lost);
    assert!(contact_mailto(&it).unwrap().starts_with("mailto:ravi@campus.edu?"));

    let mut anonymous = it.clone();
    anonymous.user = None;
    assert_eq!(contact_mailto(&anonymous), None);
}
