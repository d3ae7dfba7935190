mod health_check;
mod home;
mod subscriptions;

pub use {health_check::*, home::home, subscriptions::*};
