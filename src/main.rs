use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pujaportal::client::ApiClient;
use pujaportal::config::PortalConfig;
use pujaportal::notify::{Notifier, TracingNotifier};
use pujaportal::stores::{AstrologyBookingStore, BookingStore, ProfileStore, PromoStore};

/// Smoke binary: construct the stores once against the configured backend
/// and pull each collection, logging what came back.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = PortalConfig::from_env();
    tracing::info!(api_base = %config.api_base, "connecting to portal api");

    let api = Arc::new(ApiClient::from_config(&config));
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

    let bookings = BookingStore::new(api.clone(), notifier.clone(), config.page_size);
    let astrology = AstrologyBookingStore::new(api.clone(), notifier.clone(), config.page_size);
    let promos = PromoStore::new(api.clone(), notifier.clone(), config.page_size);
    let profile = ProfileStore::new(api.clone(), notifier.clone());

    bookings.fetch().await;
    let view = bookings.snapshot();
    tracing::info!(count = view.items.len(), total = view.total, "puja bookings");

    astrology.fetch().await;
    let view = astrology.snapshot();
    tracing::info!(count = view.items.len(), total = view.total, "astrology bookings");

    promos.fetch().await;
    let view = promos.snapshot();
    tracing::info!(count = view.items.len(), total = view.total, "promo codes");

    profile.fetch().await;
    let view = profile.snapshot();
    tracing::info!(
        has_profile = view.profile.is_some(),
        addresses = view.addresses.len(),
        has_pan = view.pan_card.is_some(),
        "profile"
    );

    Ok(())
}
