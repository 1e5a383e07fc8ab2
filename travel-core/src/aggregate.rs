use tracing::instrument;

use crate::{
    fetcher::{forecast_for, photos_for, summary_for, weather_for},
    model::{DashboardData, DestinationData, PopularDestination},
    provider::Providers,
};

/// Issues each page's batch of fetches and waits for all of them.
///
/// Fetches within a batch run concurrently; a batch returns only once
/// every fetch has settled, with fallbacks already applied.
#[derive(Debug)]
pub struct Aggregator {
    providers: Providers,
}

impl Aggregator {
    pub fn new(providers: Providers) -> Self {
        Self { providers }
    }

    /// Photos, current weather and summary for the detail page.
    #[instrument(skip(self))]
    pub async fn destination(&self, query: &str) -> DestinationData {
        let (photos, weather, summary) = tokio::join!(
            photos_for(self.providers.photos.as_ref(), query),
            weather_for(self.providers.weather.as_ref(), query),
            summary_for(self.providers.summaries.as_ref(), query),
        );

        tracing::debug!(photos = photos.len(), weather = weather.is_some(), "Destination batch settled");

        DestinationData {
            query: query.to_string(),
            photos,
            weather,
            summary,
        }
    }

    /// Current weather and forecast for the dashboard.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, city: &str) -> DashboardData {
        let (current, forecast) = tokio::join!(
            weather_for(self.providers.weather.as_ref(), city),
            forecast_for(self.providers.weather.as_ref(), city),
        );

        tracing::debug!(
            current = current.is_some(),
            forecast = forecast.is_some(),
            "Dashboard batch settled"
        );

        DashboardData {
            city: city.to_string(),
            current,
            forecast,
        }
    }

    /// Photo search for each home-grid destination, one after another.
    #[instrument(skip(self))]
    pub async fn popular(&self, names: &[String]) -> Vec<PopularDestination> {
        let mut destinations = Vec::with_capacity(names.len());
        for name in names {
            let photos = photos_for(self.providers.photos.as_ref(), name).await;
            destinations.push(PopularDestination {
                name: name.clone(),
                photos,
            });
        }
        destinations
    }
}
