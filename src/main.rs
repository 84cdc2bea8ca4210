use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use wearlog_core::{AppError, LocationMode, WeatherConfig, WeatherError};
use wearlog_services::{PostRepository, SqlitePostStore, SystemClock, TodayWeatherScreen};
use wearlog_weather::{LocationSource, WeatherLookup, WeatherProvider};

fn build_lookup(config: &WeatherConfig) -> Result<WeatherLookup> {
    let api_key = config.effective_api_key().ok_or_else(|| {
        AppError::Weather(WeatherError::NotConfigured("missing API key".to_string()))
    })?;

    let provider = WeatherProvider::new(&config.base_url, Some(api_key))?
        .with_units(&config.units)
        .with_lang(&config.lang);

    let location = match config.location.mode {
        LocationMode::Fixed => {
            LocationSource::fixed(config.location.latitude, config.location.longitude)
        }
        LocationMode::Ip => LocationSource::ip(&config.location.ip_lookup_url)?,
        LocationMode::Denied => LocationSource::Denied,
    };

    Ok(WeatherLookup::new(
        provider,
        location,
        tokio::runtime::Handle::current(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    wearlog_core::init()?;

    let mut app = wearlog_core::App::new()?;
    app.initialize()?;

    tracing::info!("wearlog started");

    let posts = SqlitePostStore::new(app.database_path())?;
    let user_id = &app.config().user.user_id;
    println!("wearlog - daily outfit log");
    println!(
        "  {} posts logged by {}",
        posts.list_posts_for_user(user_id)?.len(),
        user_id
    );

    let lookup = match build_lookup(&app.config().weather) {
        Ok(lookup) => lookup,
        Err(e) => {
            let message = e
                .downcast_ref::<AppError>()
                .map(AppError::user_message)
                .unwrap_or("Weather service unavailable.");
            tracing::warn!("Weather disabled: {}", e);
            println!("  {}", message);
            app.shutdown()?;
            return Ok(());
        }
    };

    let mut today = TodayWeatherScreen::mount(&lookup, Arc::new(SystemClock));
    let wait_secs = app.config().weather.startup_wait_secs;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(wait_secs);

    while !today.poll() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    println!("\n{}", today.date_label());
    if today.is_loaded() {
        let snapshot = today.snapshot();
        println!("  {}", today.place_label());
        println!(
            "  {}  {}  ({})",
            today.temperature_label(),
            snapshot.condition_description,
            today.feels_like_label()
        );
        println!("\n{}", wearlog_services::today_screen::RECOMMEND_HEADING);
        println!("  {}", today.recommendation());
        println!("\n{}", wearlog_services::today_screen::ACCURACY_NOTICE);
    } else {
        let err = AppError::from(WeatherError::NoSnapshot(wait_secs));
        tracing::warn!("{}", err);
        println!("  {}", err.user_message());
    }

    app.shutdown()?;

    Ok(())
}
