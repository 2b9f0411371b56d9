use super::*;

// =============================================================
// Item decoding
// =============================================================

#[test]
fn test_item_decodes_minimal_backend_json() {
    let json = r#"{
        "id": 7,
        "title": "Black iPhone 13",
        "status": "LOST",
        "date": "2024-03-01T14:30:00",
        "imageUrl": null,
        "user": { "id": 3, "name": "asha", "email": "asha@uni.edu" }
    }"#;
    let item: Item = serde_json::from_str(json).unwrap();
    assert_eq!(item.status, ItemStatus::Lost);
    assert!(item.images.is_empty());
    assert_eq!(item.display_date(), "2024-03-01");
    assert_eq!(item.reporter_name(), "asha");
    assert_eq!(item.user.as_ref().unwrap().initials(), "A");
    assert_eq!(item.contact_address().as_deref(), Some("asha@uni.edu"));
}

#[test]
fn test_item_decodes_explicit_nulls() {
    // Created without photos: no AI labels, optional columns unset
    let json = r#"{
        "id": 9,
        "title": "Water bottle",
        "description": null,
        "category": null,
        "location": null,
        "date": null,
        "status": "FOUND",
        "imageUrl": null,
        "images": null,
        "contactInfo": null,
        "user": { "id": 4, "name": null, "email": null },
        "aiLabels": null
    }"#;
    let item: Item = serde_json::from_str(json).unwrap();
    assert_eq!(item.title, "Water bottle");
    assert!(item.ai_labels.is_empty());
    assert!(item.images.is_empty());
    assert_eq!(item.description, "");
    assert_eq!(item.display_date(), "");
    assert_eq!(item.reporter_name(), "Unknown");
    assert_eq!(item.contact_address(), None);
}

#[test]
fn test_feed_survives_null_rows() {
    let json = r#"[
        {"id":1,"title":"Keys","status":"LOST","aiLabels":["key"]},
        {"id":2,"title":null,"status":"FOUND","location":null,"aiLabels":null,
         "images":[{"id":5,"imageUrl":"/a.jpg","isPrimary":null,"uploadOrder":null}]}
    ]"#;
    let items: Vec<Item> = serde_json::from_str(json).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].primary_image().as_deref(), Some("/a.jpg"));
}

#[test]
fn test_analysis_tolerates_null_lists() {
    let result: AnalysisResult =
        serde_json::from_str(r#"{"category":"Keys","confidenceScore":null,"detectedColors":null}"#).unwrap();
    assert!(result.detected_colors.is_empty());
    assert_eq!(result.confidence_score, 0.0);
}

#[test]
fn test_item_image_refs_primary_first() {
    let item = Item {
        id: 1,
        title: "Bag".into(),
        description: String::new(),
        category: String::new(),
        location: String::new(),
        date: String::new(),
        status: ItemStatus::Found,
        image_url: Some("/uploads/images/b.jpg".into()),
        images: vec![
            ItemImage { id: 1, image_url: "/a.jpg".into(), is_primary: false, upload_order: 0 },
            ItemImage { id: 2, image_url: "/b.jpg".into(), is_primary: true, upload_order: 1 },
            ItemImage { id: 3, image_url: "/c.jpg".into(), is_primary: false, upload_order: 2 },
        ],
        contact_info: Some("  ".into()),
        user: None,
        ai_labels: vec![],
    };
    assert_eq!(item.image_refs(), vec!["/b.jpg", "/a.jpg", "/c.jpg"]);
    assert_eq!(item.reporter_name(), "Unknown");
    assert_eq!(item.contact_address(), None);
}

#[test]
fn test_item_image_refs_fall_back_to_image_url() {
    let json = r#"{"id":1,"title":"Keys","status":"FOUND","imageUrl":"/uploads/images/k.jpg"}"#;
    let item: Item = serde_json::from_str(json).unwrap();
    assert_eq!(item.primary_image().as_deref(), Some("/uploads/images/k.jpg"));
}

// =============================================================
// ItemStatus
// =============================================================

#[test]
fn test_status_parse_is_case_insensitive() {
    assert_eq!(ItemStatus::parse("Found"), Some(ItemStatus::Found));
    assert_eq!(ItemStatus::parse(" LOST "), Some(ItemStatus::Lost));
    assert_eq!(ItemStatus::parse("stolen"), None);
    assert_eq!(ItemStatus::Found.as_wire(), "FOUND");
}

// =============================================================
// AnalysisResult / ExtractedFields
// =============================================================

#[test]
fn test_analysis_unknown_category_is_not_a_suggestion() {
    let unknown: AnalysisResult = serde_json::from_str(r#"{"category":"Unknown"}"#).unwrap();
    assert_eq!(unknown.suggested_category(), None);

    let phone: AnalysisResult = serde_json::from_str(
        r#"{"category":"Electronics","confidenceScore":0.91,"detectedColors":["Black"],"detectedBrands":["Apple"]}"#,
    )
    .unwrap();
    assert_eq!(phone.suggested_category(), Some("Electronics"));
    assert_eq!(phone.detected_brands, vec!["Apple"]);
    assert!(phone.labels.is_empty());
}

#[test]
fn test_extracted_fields_read_type_key() {
    let fields: ExtractedFields =
        serde_json::from_str(r#"{"type":"found","title":"Blue umbrella","location":""}"#).unwrap();
    assert_eq!(fields.item_type.as_deref(), Some("found"));
    assert_eq!(fields.location.as_deref(), Some(""));
    assert_eq!(fields.date, None);
}

#[test]
fn test_profile_update_from_profile_fills_blanks() {
    let profile = Profile {
        name: "Ravi".into(),
        email: "ravi@uni.edu".into(),
        department: Some("CSE".into()),
        ..Default::default()
    };
    let update = ProfileUpdate::from(&profile);
    assert_eq!(update.department, "CSE");
    assert_eq!(update.phone_number, "");
}
