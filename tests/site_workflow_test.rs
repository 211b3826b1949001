use henna_hub::{MemoryStore, Site, SiteError};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn review_row(i: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("r{}", i),
        "name": format!("Guest {}", i),
        "review": "Beautiful patterns",
        "rating": 4,
        // r1 is the newest
        "created_at": format!("2024-01-{:02}T12:00:00Z", 31 - i)
    })
}

fn quote_row(i: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("q{}", i),
        "text": format!("Quote {}", i),
        "author": "Esha",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_submit_against_empty_reviews() {
    let store = MemoryStore::new();
    let site = Site::new(store.clone());
    site.reload_reviews().await;

    site.set_name("Asha");
    site.set_review("Lovely design!");
    assert_ok!(site.set_rating(5));
    let receipt = assert_ok!(site.submit_review().await);

    let state = site.snapshot();
    assert_eq!(state.form.name, "");
    assert_eq!(state.form.review, "");
    assert_eq!(state.form.rating, 5);
    assert!(state.error.is_none());
    assert_eq!(state.reviews.len(), 1);

    let review = &state.reviews.items()[0];
    assert_eq!(
        (review.name.as_str(), review.review.as_str(), review.rating),
        ("Asha", "Lovely design!", 5)
    );
    assert!(!review.id.is_empty());
    assert_eq!(receipt.id.as_deref(), Some(review.id.as_str()));
    assert_eq!(store.rows("reviews").await.len(), 1);
}

#[tokio::test]
async fn test_submit_while_unreachable_preserves_everything() {
    let store = MemoryStore::new();
    store.seed("reviews", vec![review_row(1)]).await;
    let site = Site::new(store.clone());
    site.reload_reviews().await;

    site.set_name("Asha");
    site.set_review("Lovely design!");
    assert_ok!(site.set_rating(4));
    let before = site.snapshot();

    store.set_reachable(false);
    let err = assert_err!(site.submit_review().await);
    assert!(matches!(err, SiteError::SubmissionError { .. }));

    let after = site.snapshot();
    assert_eq!(after.form, before.form);
    assert_eq!(after.reviews.items(), before.reviews.items());
    assert_eq!(
        after.error.as_deref(),
        Some("Failed to submit review. Please try again later.")
    );

    // The user resubmits once the store is back.
    store.set_reachable(true);
    assert_ok!(site.submit_review().await);
    assert_eq!(site.snapshot().reviews.len(), 2);
    assert!(site.snapshot().error.is_none());
}

#[tokio::test]
async fn test_best_effort_collections_stay_quiet_when_unreachable() {
    let store = MemoryStore::new();
    store.seed("quotes", vec![quote_row(1), quote_row(2)]).await;
    let mut site = Site::new(store.clone());
    site.start().await;
    assert_eq!(site.snapshot().quotes.len(), 2);

    store.set_reachable(false);
    site.loader().load_quotes().await;
    site.loader().load_services().await;
    site.loader().load_gallery_images().await;

    let state = site.snapshot();
    assert_eq!(state.quotes.len(), 2);
    assert!(state.services.is_empty());
    assert!(state.gallery.is_empty());
    assert!(state.error.is_none());
    site.stop();
}

#[tokio::test]
async fn test_twelve_reviews_paginate_newest_first() {
    let store = MemoryStore::new();
    // Seed out of order; the store sorts by created_at.
    let mut rows: Vec<_> = (1..=12).map(review_row).collect();
    rows.reverse();
    store.seed("reviews", rows).await;

    let site = Site::new(store);
    site.reload_reviews().await;

    let ids = |site: &Site<MemoryStore>| -> Vec<String> {
        site.snapshot()
            .current_reviews()
            .iter()
            .map(|r| r.id.clone())
            .collect()
    };

    assert_eq!(site.snapshot().page_count(), 3);
    assert_eq!(ids(&site), ["r1", "r2", "r3", "r4", "r5"]);
    assert!(!site.prev_page());

    assert!(site.next_page());
    assert_eq!(ids(&site), ["r6", "r7", "r8", "r9", "r10"]);

    assert!(site.next_page());
    assert_eq!(ids(&site), ["r11", "r12"]);
    assert!(!site.next_page());

    let pagination = site.view().pagination.unwrap();
    assert_eq!((pagination.page, pagination.page_count), (3, 3));
    assert!(!pagination.has_next);
}

#[tokio::test(start_paused = true)]
async fn test_rotation_survives_quote_reload() {
    let store = MemoryStore::new();
    store.seed("quotes", (0..4).map(quote_row).collect()).await;
    let mut site = Site::new(store).with_quote_interval(Duration::from_secs(5));
    site.start().await;

    tokio::time::sleep(Duration::from_millis(15_100)).await;
    assert_eq!(site.snapshot().quote_index, 3);

    // Replace with fewer quotes; the running timer adapts without restart.
    site.state().update(|s| {
        let trimmed = s.quotes.items()[..2].to_vec();
        let seq = s.quotes.begin();
        s.quotes.replace(seq, trimmed);
    });
    assert!(site.snapshot().current_quote().is_none());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(site.snapshot().quote_index, 0);
    assert_eq!(site.snapshot().current_quote().unwrap().id, "q0");
    assert!(site.rotator_running());
}
