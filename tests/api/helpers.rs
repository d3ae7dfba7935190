use newsdesk::{
    configuration::{get_configuration, RestStoreSettings, StoreSettings},
    get_subscriber, init_subscriber, Application,
};

use {once_cell::sync::Lazy, secrecy::Secret, wiremock::MockServer};

// Ensure that the `tracing` stack is only initialised once
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store_server: MockServer,
    api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscriptions(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/subscriptions", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_home(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Rows the application sent to the stand-in store, in order.
    pub async fn inserted_rows(&self) -> Vec<serde_json::Value> {
        self.store_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                body[0].clone()
            })
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    // Stands in for the hosted database's REST API
    let store_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        // Use a random OS port
        c.application.port = 0;
        c.store = StoreSettings::Rest(RestStoreSettings {
            base_url: store_server.uri(),
            table: "news_subscriptions".into(),
            api_key: Secret::new("test-api-key".into()),
            timeout_milliseconds: 200,
        });
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    let port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        store_server,
        api_client: reqwest::Client::new(),
    }
}
