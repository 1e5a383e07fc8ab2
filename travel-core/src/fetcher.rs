//! Total wrappers around the providers.
//!
//! Each fetcher issues exactly one call and never fails: any
//! [`FetchError`](crate::error::FetchError), not-found included, is logged
//! and replaced by the fetcher's fallback value.

use crate::{
    error::FetchError,
    model::{Forecast, Photo, WeatherSnapshot},
    provider::{PhotoProvider, SummaryProvider, WeatherProvider},
};

/// Summary used when the article lookup fails or finds nothing.
pub const FALLBACK_SUMMARY: &str =
    "Explore the stunning landscapes and vibrant culture of this beautiful destination.";

/// Summary used when the article exists but has no introduction.
pub const EMPTY_SUMMARY: &str =
    "No summary available for this destination. Explore its stunning landscapes and culture.";

fn log_fallback(what: &str, query: &str, err: &FetchError) {
    if err.is_not_found() {
        tracing::info!(service = %err.service(), query, "No {what} found, using fallback");
    } else {
        tracing::warn!(service = %err.service(), query, error = %err, "Failed to fetch {what}, using fallback");
    }
}

/// Photos for `destination`, or an empty list.
pub async fn photos_for(provider: &dyn PhotoProvider, destination: &str) -> Vec<Photo> {
    provider
        .search_photos(destination)
        .await
        .unwrap_or_else(|err| {
            log_fallback("photos", destination, &err);
            Vec::new()
        })
}

/// Current weather for `city`, or `None`.
pub async fn weather_for(provider: &dyn WeatherProvider, city: &str) -> Option<WeatherSnapshot> {
    provider
        .current_weather(city)
        .await
        .inspect_err(|err| log_fallback("current weather", city, err))
        .ok()
}

/// 5-day forecast for `city`, or `None`.
pub async fn forecast_for(provider: &dyn WeatherProvider, city: &str) -> Option<Forecast> {
    provider
        .forecast(city)
        .await
        .inspect_err(|err| log_fallback("forecast", city, err))
        .ok()
}

/// Introductory text for `destination`, or one of the fixed fallback sentences.
pub async fn summary_for(provider: &dyn SummaryProvider, destination: &str) -> String {
    match provider.summary(destination).await {
        Ok(text) => text,
        Err(err @ FetchError::EmptyExtract { .. }) => {
            log_fallback("summary", destination, &err);
            EMPTY_SUMMARY.to_string()
        }
        Err(err) => {
            log_fallback("summary", destination, &err);
            FALLBACK_SUMMARY.to_string()
        }
    }
}
