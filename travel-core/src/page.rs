use anyhow::{Result, bail};
use tracing::instrument;

use crate::{
    Config,
    aggregate::Aggregator,
    provider::ServiceId,
    render,
    view::{dashboard_view, destination_view, home_cards, no_destination_view},
};

/// A page of the site, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Destination { query: Option<String> },
    Weather { city: String },
}

impl Page {
    pub fn file_name(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Destination { .. } => "destination.html",
            Page::Weather { .. } => "weather.html",
        }
    }

    /// External services the page calls.
    pub fn services(&self) -> &'static [ServiceId] {
        match self {
            Page::Home => &[ServiceId::Unsplash],
            Page::Destination { .. } => ServiceId::all(),
            Page::Weather { .. } => &[ServiceId::OpenWeather],
        }
    }

    /// Fetch what the page needs and render it to HTML.
    #[instrument(skip(aggregator, config))]
    pub async fn build(&self, aggregator: &Aggregator, config: &Config) -> Result<String> {
        match self {
            Page::Home => {
                let destinations = aggregator.popular(&config.popular).await;
                render::home_html(&home_cards(&destinations, config))
            }
            Page::Destination { query } => {
                let query = query.as_deref().map(str::trim).filter(|q| !q.is_empty());
                let view = match query {
                    Some(query) => destination_view(&aggregator.destination(query).await),
                    None => no_destination_view(),
                };
                if !view.is_found() {
                    tracing::info!("Rendering destination page without results");
                }
                render::destination_html(&view)
            }
            Page::Weather { city } => {
                let city = city.trim();
                if city.is_empty() {
                    bail!("Please enter a city name.");
                }
                let data = aggregator.dashboard(city).await;
                render::dashboard_html(city, &dashboard_view(&data))
            }
        }
    }
}
