use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use serde_json::json;

use crate::helpers::spawn_app;

// Tests
#[actix_web::test]
async fn subscribe_returns_a_201_for_a_new_valid_email() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_subscribe(&json!({ "email": "a@b.com" })).await;

    // Assert
    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully subscribed!");
}

#[actix_web::test]
async fn subscribe_stores_the_new_subscriber_with_defaults() {
    // Arrange
    let app = spawn_app().await;
    let before = Utc::now();

    // Act
    app.post_subscribe(&json!({ "email": "a@b.com" })).await;

    // Assert
    let list = app.subscriber_list().await;
    assert_eq!(list["count"], 1);
    let subscriber = &list["subscribers"][0];
    assert_eq!(subscriber["email"], "a@b.com");
    assert_eq!(subscriber["status"], "active");
    assert_eq!(subscriber["source"], "website");
    let timestamp: DateTime<Utc> = subscriber["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(timestamp >= before - Duration::seconds(1));
    assert!(timestamp <= Utc::now());
}

#[actix_web::test]
async fn subscribe_keeps_the_source_and_timestamp_sent_by_the_site() {
    // Arrange
    let app = spawn_app().await;
    let body = json!({
        "email": "traveller@sojourn.app",
        "source": "newsletter_signup",
        "timestamp": "2025-03-14T09:26:53Z",
    });

    // Act
    app.post_subscribe(&body).await;

    // Assert
    let list = app.subscriber_list().await;
    let subscriber = &list["subscribers"][0];
    assert_eq!(subscriber["source"], "newsletter_signup");
    let timestamp: DateTime<Utc> = subscriber["timestamp"].as_str().unwrap().parse().unwrap();
    assert_eq!(timestamp.to_rfc3339(), "2025-03-14T09:26:53+00:00");
}

#[actix_web::test]
async fn subscribe_returns_a_400_when_the_email_is_missing_or_invalid() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({}), "missing the email"),
        (json!({ "email": "" }), "empty email"),
        (json!({ "email": "not-an-email" }), "no @ symbol"),
        (json!({ "email": "traveller@sojourn" }), "no dot in the domain"),
        (json!({ "email": "trav eller@sojourn.app" }), "whitespace"),
        (json!({ "email": 42 }), "non-string email"),
        (json!({ "source": "website" }), "only a source"),
    ];

    for (body, description) in test_cases {
        // Act
        let response = app.post_subscribe(&body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Invalid email address" }));
    }

    assert_eq!(app.subscriber_list().await["count"], 0);
}

#[actix_web::test]
async fn subscribe_returns_a_400_for_a_malformed_body() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        ("{\"email\": ", "truncated JSON"),
        ("email=a%40b.com", "form encoded body"),
        (
            r#"{"email": "a@b.com", "timestamp": "yesterday"}"#,
            "unparsable timestamp",
        ),
    ];

    for (body, description) in test_cases {
        // Act
        let response = app.post_subscribe_raw(body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request for a {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Invalid request body" }));
    }

    assert!(app.store.is_empty().unwrap());
}

#[actix_web::test]
async fn subscribe_accepts_a_json_body_whatever_its_content_type() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (r#"{"email": "untyped@sojourn.app"}"#, None, "no content type"),
        (
            r#"{"email": "plain@sojourn.app"}"#,
            Some("text/plain;charset=UTF-8"),
            "a text/plain content type",
        ),
    ];

    for (body, content_type, description) in test_cases {
        // Act
        let response = app
            .post_subscribe_with_content_type(body, content_type)
            .await;

        // Assert
        assert_eq!(
            201,
            response.status().as_u16(),
            "The API did not accept a JSON body sent with {}.",
            description
        );
    }

    assert_eq!(app.subscriber_list().await["count"], 2);
}

#[actix_web::test]
async fn subscribing_twice_acknowledges_and_keeps_one_record() {
    // Arrange
    let app = spawn_app().await;
    let body = json!({ "email": "traveller@sojourn.app" });
    app.post_subscribe(&body).await;
    let before = app.subscriber_list().await;

    // Act
    let response = app.post_subscribe(&body).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let response_body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        response_body,
        json!({ "success": true, "message": "Email already subscribed" })
    );
    assert_eq!(app.subscriber_list().await, before);
}

#[actix_web::test]
async fn resubscribing_after_unsubscribing_reactivates_the_record() {
    // Arrange
    let app = spawn_app().await;
    app.post_subscribe(&json!({
        "email": "traveller@sojourn.app",
        "timestamp": "2025-01-01T00:00:00Z",
    }))
    .await;
    app.post_subscribe(&json!({ "email": "other@sojourn.app" })).await;
    app.post_unsubscribe(&json!({ "email": "traveller@sojourn.app" }))
        .await;

    // Act
    let response = app
        .post_subscribe(&json!({
            "email": "traveller@sojourn.app",
            "timestamp": "2025-06-01T12:00:00Z",
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Welcome back! Your subscription has been reactivated."
    );

    let list = app.subscriber_list().await;
    assert_eq!(list["count"], 2);
    let subscriber = &list["subscribers"][0];
    assert_eq!(subscriber["email"], "traveller@sojourn.app");
    assert_eq!(subscriber["status"], "active");
    let timestamp: DateTime<Utc> = subscriber["timestamp"].as_str().unwrap().parse().unwrap();
    assert_eq!(timestamp.to_rfc3339(), "2025-06-01T12:00:00+00:00");
}

#[actix_web::test]
async fn concurrent_subscriptions_for_the_same_email_create_one_record() {
    // Arrange
    let app = spawn_app().await;
    let body = json!({ "email": "rush@sojourn.app" });

    // Act
    let responses = join_all((0..20).map(|_| app.post_subscribe(&body))).await;

    // Assert
    let created = responses
        .iter()
        .filter(|r| r.status().as_u16() == 201)
        .count();
    let acknowledged = responses
        .iter()
        .filter(|r| r.status().as_u16() == 200)
        .count();
    assert_eq!(created, 1);
    assert_eq!(acknowledged, 19);
    assert_eq!(app.subscriber_list().await["count"], 1);
}

#[actix_web::test]
async fn emails_are_listed_byte_for_byte_as_submitted() {
    // Arrange
    let app = spawn_app().await;
    let emails = [
        "Mixed.Case@Example.COM",
        "mixed.case@example.com",
        "first.last+trips@mail.example.co.uk",
        "ünïcødé@sojourn.app",
    ];

    // Act
    for email in emails {
        let response = app.post_subscribe(&json!({ "email": email })).await;
        assert_eq!(201, response.status().as_u16());
    }

    // Assert
    let list = app.subscriber_list().await;
    let listed: Vec<&str> = list["subscribers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["email"].as_str().unwrap())
        .collect();
    assert_eq!(listed, emails);
}

#[actix_web::test]
async fn subscribe_response_never_mentions_other_subscribers() {
    // Arrange
    let app = spawn_app().await;
    app.post_subscribe(&json!({ "email": "first@sojourn.app" })).await;

    // Act
    let response = app
        .post_subscribe(&json!({ "email": "second@sojourn.app" }))
        .await;

    // Assert
    let body = response.text().await.unwrap();
    assert!(!body.contains("first@sojourn.app"));
}
