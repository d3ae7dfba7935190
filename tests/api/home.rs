use crate::helpers::spawn_app;

use wiremock::{matchers::any, Mock, ResponseTemplate};

#[tokio::test]
async fn home_renders_an_empty_subscription_form() {
    let app = spawn_app().await;

    let response = app.get_home().await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<form name="subscribe" action="/subscriptions" method="post""#));
    assert!(html.contains(r#"name="name" placeholder="Enter your full name" value="""#));
    assert!(html.contains(r#"name="topic""#));
    assert!(!html.contains("field-error"));
}

#[tokio::test]
async fn home_never_calls_the_store() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    app.get_home().await;
}
