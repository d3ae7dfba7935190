pub mod configuration;
pub mod controller;
pub mod domain;
pub mod notifications;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;

pub use {
    configuration::get_configuration,
    startup::{run, Application},
    telemetry::{get_subscriber, init_subscriber},
};
