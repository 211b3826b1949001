use henna_hub::core::loader::LoadOutcome;
use henna_hub::{RestStore, Site, SiteError};
use httpmock::prelude::*;
use std::time::Duration;

fn site_for(server: &MockServer) -> Site<RestStore> {
    let store = RestStore::new(&server.base_url(), "anon-key", Duration::from_secs(5)).unwrap();
    Site::new(store)
}

fn mock_table<'a>(server: &'a MockServer, table: &str, body: serde_json::Value) -> httpmock::Mock<'a> {
    let path = format!("/rest/v1/{}", table);
    server.mock(move |when, then| {
        when.method(GET).path(path).header("apikey", "anon-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

#[tokio::test]
async fn test_startup_loads_all_collections_from_rest_store() {
    let server = MockServer::start();
    let services = mock_table(
        &server,
        "services",
        serde_json::json!([{
            "id": "s1", "title": "Bridal Henna", "description": "Full hands and feet",
            "price": "From ₹5000", "created_at": "2024-01-01T09:00:00+00:00"
        }]),
    );
    let quotes = mock_table(
        &server,
        "quotes",
        serde_json::json!([{
            "id": "q1", "text": "Henna is the art of patience", "author": "Esha",
            "created_at": "2024-01-01T09:00:00+00:00"
        }]),
    );
    let gallery = mock_table(
        &server,
        "gallery_images",
        serde_json::json!([{
            "id": "g1", "url": "https://images.example.com/bridal.jpg", "title": "Bridal",
            "created_at": "2024-01-02T09:00:00+00:00"
        }]),
    );
    let reviews = mock_table(
        &server,
        "reviews",
        serde_json::json!([{
            "id": "r1", "name": "Priya", "review": "Stunning work", "rating": 5,
            "created_at": "2024-02-01T09:00:00.123456+00:00"
        }]),
    );

    let mut site = site_for(&server);
    let report = site.start().await;

    services.assert();
    quotes.assert();
    gallery.assert();
    reviews.assert();
    assert!(report.failures().is_empty());

    let text = site.view().to_string();
    assert!(text.contains("Bridal Henna - From ₹5000"));
    assert!(text.contains("\"Henna is the art of patience\""));
    assert!(text.contains("Bridal <https://images.example.com/bridal.jpg>"));
    assert!(text.contains("★★★★★ Priya"));
    assert!(site.rotator_running());
    site.stop();
}

#[tokio::test]
async fn test_failing_store_only_surfaces_reviews_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_contains("/rest/v1/");
        then.status(503).body("upstream unavailable");
    });

    let mut site = site_for(&server);
    let report = site.start().await;

    assert_eq!(report.failures().len(), 4);
    let state = site.snapshot();
    assert!(state.services.is_empty());
    assert!(state.quotes.is_empty());
    assert!(state.gallery.is_empty());
    assert!(state.reviews.is_empty());
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to load reviews. Please try again later.")
    );
}

#[tokio::test]
async fn test_submit_posts_row_then_refetches_reviews() {
    let server = MockServer::start();
    let insert = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/reviews")
            .header("prefer", "return=representation")
            .json_body(serde_json::json!([
                {"name": "Asha", "review": "Lovely design!", "rating": 5}
            ]));
        then.status(201).json_body(serde_json::json!([{
            "id": "5d0c", "name": "Asha", "review": "Lovely design!", "rating": 5,
            "created_at": "2024-03-02T10:15:30+00:00"
        }]));
    });
    let refetch = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/reviews")
            .query_param("order", "created_at.desc");
        then.status(200).json_body(serde_json::json!([{
            "id": "5d0c", "name": "Asha", "review": "Lovely design!", "rating": 5,
            "created_at": "2024-03-02T10:15:30+00:00"
        }]));
    });

    let site = site_for(&server);
    site.set_name("Asha");
    site.set_review("Lovely design!");

    let receipt = site.submit_review().await.unwrap();

    insert.assert();
    refetch.assert();
    assert_eq!(receipt.id.as_deref(), Some("5d0c"));
    assert!(receipt.visible_after_reload(site.loader()));
    let state = site.snapshot();
    assert!(state.form.name.is_empty());
    assert_eq!(state.form.rating, 5);
    assert_eq!(state.reviews.items()[0].id, "5d0c");
}

#[tokio::test]
async fn test_rejected_insert_keeps_form_and_skips_refetch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/rest/v1/reviews");
        then.status(401).json_body(serde_json::json!({
            "message": "Invalid API key", "hint": "Double check your Supabase anon key"
        }));
    });
    let refetch = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/reviews");
        then.status(200).json_body(serde_json::json!([]));
    });

    let site = site_for(&server);
    site.set_name("Asha");
    site.set_review("Lovely design!");
    site.set_rating(3).unwrap();

    let err = site.submit_review().await.unwrap_err();

    match err {
        SiteError::SubmissionError { message } => assert!(message.contains("Invalid API key")),
        other => panic!("unexpected error: {:?}", other),
    }
    refetch.assert_hits(0);
    let state = site.snapshot();
    assert_eq!(state.form.name, "Asha");
    assert_eq!(state.form.rating, 3);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to submit review. Please try again later.")
    );
}

#[tokio::test]
async fn test_reviews_error_clears_on_next_success() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/reviews");
        then.status(500);
    });

    let site = site_for(&server);
    assert!(matches!(site.reload_reviews().await, LoadOutcome::Failed(_)));
    assert!(site.snapshot().error.is_some());

    failing.delete();
    mock_table(&server, "reviews", serde_json::json!([]));

    assert!(site.reload_reviews().await.is_applied());
    assert!(site.snapshot().error.is_none());
}
