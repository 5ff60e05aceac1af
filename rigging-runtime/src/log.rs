use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, Registry};

fn get_log_level() -> Level {
    match std::env::var("RIGGING_LOG") {
        Ok(level) => level.parse::<Level>().unwrap_or(Level::INFO),
        Err(_) => Level::INFO,
    }
}

pub fn init_tracing() {
    Registry::default()
        .with(fmt::layer().with_filter(LevelFilter::from_level(get_log_level())))
        .init()
}
