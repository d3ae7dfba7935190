use crate::{
    configuration::{DatabaseSettings, Settings, StoreSettings},
    routes,
    store::{PostgresSubscriptionStore, RestSubscriptionStore, SubscriptionStore},
};

use std::{net::TcpListener, sync::Arc};

use {
    actix_web::{dev::Server, web, App, HttpServer},
    secrecy::ExposeSecret,
    sqlx::{postgres::PgPoolOptions, PgPool},
    tracing_actix_web::TracingLogger,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let store = build_store(&configuration.store)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, store)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .connect_timeout(std::time::Duration::from_secs(2))
        .connect_lazy(configuration.connection_string().expose_secret())
}

pub fn build_store(
    configuration: &StoreSettings,
) -> Result<Arc<dyn SubscriptionStore>, anyhow::Error> {
    let store: Arc<dyn SubscriptionStore> = match configuration {
        StoreSettings::Postgres(database) => {
            tracing::info!(host = %database.host, "Using the Postgres subscription store");
            Arc::new(PostgresSubscriptionStore::new(get_connection_pool(
                database,
            )?))
        }
        StoreSettings::Rest(rest) => {
            tracing::info!(base_url = %rest.base_url, "Using the REST subscription store");
            Arc::new(RestSubscriptionStore::new(
                rest.base_url.clone(),
                &rest.table,
                rest.api_key.clone(),
                rest.timeout(),
            )?)
        }
    };
    Ok(store)
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubscriptionStore>,
) -> Result<Server, std::io::Error> {
    let store = web::Data::from(store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(routes::home))
            .route("/health_check", web::get().to(routes::health_check))
            .route("/subscriptions", web::post().to(routes::subscribe))
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
