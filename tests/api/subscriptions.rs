use crate::helpers::spawn_app;

use std::time::Duration;

use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

fn duplicate_key_error() -> ResponseTemplate {
    ResponseTemplate::new(409).set_body_json(serde_json::json!({
        "code": "23505",
        "details": "Key (email, news_topic) already exists.",
        "hint": null,
        "message": "duplicate key value violates unique constraint \"news_subscriptions_email_news_topic_key\""
    }))
}

#[tokio::test]
async fn subscribe_returns_200_and_confirmation_for_valid_form_data() {
    let app = spawn_app().await;
    let body = "name=Al&email=a%40b.com&topic=Tech";

    Mock::given(path("/rest/v1/news_subscriptions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app.post_subscriptions(body.into()).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("You're all set!"));
    assert!(html.contains("Successfully subscribed!"));
    assert!(html.contains(r#"<a href="/">Subscribe to another topic</a>"#));
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn subscribe_sends_trimmed_values_to_the_store() {
    let app = spawn_app().await;
    let body = "name=%20le%20guin%20&email=ursula_le_guin%40gmail.com&topic=Science%20fiction%20";

    Mock::given(path("/rest/v1/news_subscriptions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.store_server)
        .await;

    app.post_subscriptions(body.into()).await;

    let rows = app.inserted_rows().await;
    assert_eq!(
        rows,
        vec![serde_json::json!({
            "name": "le guin",
            "email": "ursula_le_guin@gmail.com",
            "news_topic": "Science fiction",
        })]
    );
}

#[tokio::test]
async fn subscribe_returns_400_when_data_is_invalid() {
    let app = spawn_app().await;
    let test_cases = vec![
        (
            "name=A&email=a%40b.com&topic=Tech",
            "Name must be at least 2 characters",
        ),
        (
            "name=Al&email=definitely-not-an-email&topic=Tech",
            "Please enter a valid email address",
        ),
        (
            "name=Al&email=a%40b.com&topic=%20%20T%20%20",
            "Topic must be at least 2 characters",
        ),
        ("email=a%40b.com&topic=Tech", "Name must be at least 2 characters"),
    ];

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    for (invalid_body, error_message) in test_cases {
        let response = app.post_subscriptions(invalid_body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}",
            invalid_body
        );
        let html = response.text().await.unwrap();
        assert!(
            html.contains(error_message),
            "Expected `{}` for payload {}",
            error_message,
            invalid_body
        );
    }
}

#[tokio::test]
async fn subscribe_reports_every_invalid_field_and_keeps_values() {
    let app = spawn_app().await;
    let body = "name=A&email=nope&topic=x";

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let response = app.post_subscriptions(body.into()).await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"id="name-error""#));
    assert!(html.contains(r#"id="email-error""#));
    assert!(html.contains(r#"id="topic-error""#));
    assert!(html.contains(r#"value="nope""#));
}

#[tokio::test]
async fn subscribe_returns_409_with_notice_when_already_subscribed() {
    let app = spawn_app().await;
    let body = "name=Al&email=a%40b.com&topic=Tech";

    Mock::given(path("/rest/v1/news_subscriptions"))
        .and(method("POST"))
        .respond_with(duplicate_key_error())
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app.post_subscriptions(body.into()).await;

    assert_eq!(response.status().as_u16(), 409);
    let html = response.text().await.unwrap();
    assert!(html.contains("Already subscribed!"));
    assert!(html.contains(r#"value="a@b.com""#));
    assert!(html.contains(r#"value="Tech""#));
    assert!(!html.contains("Subscription failed"));
}

#[tokio::test]
async fn subscribe_returns_500_with_generic_notice_when_store_fails() {
    let app = spawn_app().await;
    let body = "name=Al&email=a%40b.com&topic=Tech";

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "code": "PGRST000",
            "message": "Could not connect with the database"
        })))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app.post_subscriptions(body.into()).await;

    assert_eq!(response.status().as_u16(), 500);
    let html = response.text().await.unwrap();
    assert!(html.contains("Subscription failed"));
    assert!(html.contains("Please try again. If the problem persists, contact support."));
    assert!(!html.contains("Could not connect with the database"));
    assert!(html.contains(r#"value="Al""#));
}

#[tokio::test]
async fn subscribe_returns_500_when_store_times_out() {
    let app = spawn_app().await;
    let body = "name=Al&email=a%40b.com&topic=Tech";

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(30)))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app.post_subscriptions(body.into()).await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(response.text().await.unwrap().contains("Subscription failed"));
}

#[tokio::test]
async fn resubscribing_to_the_same_topic_reports_a_conflict() {
    let app = spawn_app().await;
    let body = "name=Al&email=a%40b.com&topic=Tech";

    Mock::given(path("/rest/v1/news_subscriptions"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.store_server)
        .await;
    Mock::given(path("/rest/v1/news_subscriptions"))
        .and(method("POST"))
        .respond_with(duplicate_key_error())
        .expect(1)
        .mount(&app.store_server)
        .await;

    let first = app.post_subscriptions(body.into()).await;
    assert_eq!(first.status().as_u16(), 200);

    // "Subscribe to another topic" leads back to an empty form
    let form = app.get_home().await.text().await.unwrap();
    assert!(form.contains(r#"value="""#));

    let second = app.post_subscriptions(body.into()).await;
    assert_eq!(second.status().as_u16(), 409);
    assert!(second.text().await.unwrap().contains("Already subscribed!"));
}
