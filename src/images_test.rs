use super::*;

fn jpg(name: &str) -> (&'static str, FileMeta) {
    (
        "handle",
        FileMeta { name: name.to_string(), mime: "image/jpeg".into(), size: 1024 },
    )
}

fn analysis(category: &str) -> AnalysisResult {
    AnalysisResult { category: category.into(), ..Default::default() }
}

// =============================================================
// Validation & limits
// =============================================================

#[test]
fn test_validate_file_checks_type_then_size() {
    assert_eq!(validate_file("application/pdf", 10), Err(UploadError::NotAnImage));
    assert_eq!(validate_file("image/png", MAX_FILE_SIZE + 1), Err(UploadError::TooLarge));
    assert_eq!(validate_file("image/png", MAX_FILE_SIZE), Ok(()));
}

#[test]
fn test_more_than_five_images_rejected_with_inline_error() {
    let mut set = ImageSet::new();
    set.add_batch((0..4).map(|i| jpg(&format!("{i}.jpg"))).collect()).unwrap();

    let err = set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg")]).unwrap_err();
    assert_eq!(err, UploadError::TooMany);
    assert_eq!(set.error(), Some("Maximum 5 images allowed"));
    assert_eq!(set.len(), 4);

    set.add_batch(vec![jpg("c.jpg")]).unwrap();
    assert!(set.is_full());
    assert_eq!(set.error(), None);
}

#[test]
fn test_invalid_files_are_skipped_with_message() {
    let mut set = ImageSet::new();
    let pdf = ("handle", FileMeta { name: "x.pdf".into(), mime: "application/pdf".into(), size: 5 });
    let added = set.add_batch(vec![pdf, jpg("ok.jpg")]).unwrap();
    assert_eq!(added.ids.len(), 1);
    assert_eq!(set.error(), Some("Only image files are allowed"));
}

// =============================================================
// Primary flag
// =============================================================

#[test]
fn test_first_image_is_primary() {
    let mut set = ImageSet::new();
    set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg")]).unwrap();
    assert_eq!(set.primary_index(), Some(0));
    assert!(!set.images()[1].is_primary);
}

#[test]
fn test_set_primary_is_exclusive() {
    let mut set = ImageSet::new();
    set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")]).unwrap();
    set.set_primary(2);
    let flags: Vec<bool> = set.images().iter().map(|img| img.is_primary).collect();
    assert_eq!(flags, vec![false, false, true]);

    set.set_primary(9);
    assert_eq!(set.primary_index(), Some(2));
}

#[test]
fn test_removing_primary_promotes_new_first() {
    let mut set = ImageSet::new();
    set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")]).unwrap();
    set.remove(0);
    assert_eq!(set.primary_index(), Some(0));
    assert_eq!(set.images()[0].meta.name, "b.jpg");
}

#[test]
fn test_submit_order_puts_primary_first() {
    let mut set: ImageSet<u32> = ImageSet::new();
    let meta = |n: &str| FileMeta { name: n.into(), mime: "image/png".into(), size: 1 };
    set.add_batch(vec![(1, meta("a")), (2, meta("b")), (3, meta("c"))]).unwrap();
    set.set_primary(1);
    assert_eq!(set.submit_order(), vec![&2, &1, &3]);
}

// =============================================================
// AI analysis
// =============================================================

#[test]
fn test_only_first_image_of_empty_set_is_analyzed() {
    let mut set = ImageSet::new();
    let first = set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg")]).unwrap();
    assert_eq!(first.analyze, Some(AnalysisTicket { image_id: first.ids[0] }));
    assert!(set.is_analyzing());

    let second = set.add_batch(vec![jpg("c.jpg")]).unwrap();
    assert_eq!(second.analyze, None);
}

#[test]
fn test_analysis_result_becomes_suggestion() {
    let mut set = ImageSet::new();
    let ticket = set.add_batch(vec![jpg("a.jpg")]).unwrap().analyze.unwrap();
    let accepted = set.finish_analysis(ticket, Ok(analysis("Electronics"))).cloned();
    assert_eq!(accepted, Some(analysis("Electronics")));
    assert_eq!(set.images()[0].analysis, Some(analysis("Electronics")));
    assert!(!set.is_analyzing());
}

#[test]
fn test_removing_only_image_clears_suggestion() {
    let mut set = ImageSet::new();
    let ticket = set.add_batch(vec![jpg("a.jpg")]).unwrap().analyze.unwrap();
    set.finish_analysis(ticket, Ok(analysis("Keys")));
    assert!(set.suggestion().is_some());

    set.remove(0);
    assert!(set.is_empty());
    assert!(set.suggestion().is_none());
}

#[test]
fn test_removing_analyzed_image_clears_suggestion_without_reanalysis() {
    let mut set = ImageSet::new();
    let ticket = set.add_batch(vec![jpg("a.jpg"), jpg("b.jpg")]).unwrap().analyze.unwrap();
    set.finish_analysis(ticket, Ok(analysis("Clothing")));
    set.remove(0);
    assert_eq!(set.len(), 1);
    assert!(set.suggestion().is_none());
    assert!(!set.is_analyzing());
}

#[test]
fn test_stale_analysis_for_removed_image_is_discarded() {
    let mut set = ImageSet::new();
    let ticket = set.add_batch(vec![jpg("a.jpg")]).unwrap().analyze.unwrap();
    set.remove(0);
    let second = set.add_batch(vec![jpg("b.jpg")]).unwrap().analyze.unwrap();

    assert_eq!(set.finish_analysis(ticket, Ok(analysis("Documents"))), None);
    assert!(set.suggestion().is_none());
    assert!(set.is_analyzing());

    assert!(set.finish_analysis(second, Ok(analysis("Keys"))).is_some());
    assert_eq!(set.suggestion().map(|s| s.category.as_str()), Some("Keys"));
}

#[test]
fn test_failed_analysis_leaves_no_suggestion() {
    let mut set = ImageSet::new();
    let ticket = set.add_batch(vec![jpg("a.jpg")]).unwrap().analyze.unwrap();
    assert_eq!(set.finish_analysis(ticket, Err("503".into())), None);
    assert!(!set.is_analyzing());
    assert!(set.suggestion().is_none());
}
