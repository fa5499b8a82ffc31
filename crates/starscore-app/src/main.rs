//! Main application entry point (native).

#[cfg(feature = "native")]
use starscore_app::{App, AppConfig};
#[cfg(feature = "native")]
use starscore_core::RatingConfig;
#[cfg(feature = "native")]
use std::path::Path;

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    let rating = match std::env::args().nth(1) {
        Some(path) => match RatingConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => RatingConfig::default(),
    };

    log::info!("Starting StarScore");
    if let Err(e) = App::run(AppConfig::with_rating(rating)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
