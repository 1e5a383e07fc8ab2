use crate::{
    Config,
    error::{FetchError, truncate_body},
    model::{Forecast, Photo, WeatherSnapshot},
    provider::{openweather::OpenWeatherProvider, unsplash::UnsplashProvider, wikipedia::WikipediaProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;
pub mod unsplash;
pub mod wikipedia;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Unsplash,
    OpenWeather,
    Wikipedia,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Unsplash => "unsplash",
            ServiceId::OpenWeather => "openweather",
            ServiceId::Wikipedia => "wikipedia",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Unsplash, ServiceId::OpenWeather, ServiceId::Wikipedia]
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ServiceId::Wikipedia)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "unsplash" => Ok(ServiceId::Unsplash),
            "openweather" => Ok(ServiceId::OpenWeather),
            "wikipedia" => Ok(ServiceId::Wikipedia),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: unsplash, openweather, wikipedia."
            )),
        }
    }
}

#[async_trait]
pub trait PhotoProvider: Send + Sync + Debug {
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, FetchError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError>;
}

#[async_trait]
pub trait SummaryProvider: Send + Sync + Debug {
    async fn summary(&self, title: &str) -> Result<String, FetchError>;
}

/// One client per external service, ready to hand to the aggregator.
#[derive(Debug)]
pub struct Providers {
    pub photos: Box<dyn PhotoProvider>,
    pub weather: Box<dyn WeatherProvider>,
    pub summaries: Box<dyn SummaryProvider>,
}

/// Shared HTTP client. Wikipedia rejects requests without a user agent.
pub fn http_client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(concat!("travel-explorer/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

fn required_key(config: &Config, id: ServiceId) -> anyhow::Result<&str> {
    config.api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service '{id}'.\n\
                 Hint: run `travel configure {id}` and enter your API key."
        )
    })
}

/// Send a prepared GET and decode its JSON body.
///
/// A 404 is reported as [`FetchError::NotFound`] for `query`; any other
/// non-success status keeps its code and a truncated body.
async fn get_json<T: DeserializeOwned>(
    service: ServiceId,
    request: RequestBuilder,
    query: &str,
) -> Result<T, FetchError> {
    let res = request
        .send()
        .await
        .map_err(|source| FetchError::Transport { service, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| FetchError::Transport { service, source })?;

    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound {
            service,
            query: query.to_string(),
        });
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| FetchError::Decode { service, source })
}

/// Construct every provider from config, requiring every API key.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    providers_for(config, ServiceId::all())
}

/// Construct every provider, requiring API keys only for the `needed` services.
///
/// A client whose key is neither needed nor configured is built with an
/// empty key; the service rejects any call it makes.
pub fn providers_for(config: &Config, needed: &[ServiceId]) -> anyhow::Result<Providers> {
    for &id in needed.iter().filter(|id| id.requires_api_key()) {
        required_key(config, id)?;
    }

    let key = |id| config.api_key(id).unwrap_or_default().to_string();
    let http = http_client()?;
    let endpoints = &config.endpoints;

    let photos = UnsplashProvider::new(key(ServiceId::Unsplash), http.clone(), &endpoints.unsplash);
    let weather = OpenWeatherProvider::new(key(ServiceId::OpenWeather), http.clone(), &endpoints.openweather);
    let summaries = WikipediaProvider::new(http, &endpoints.wikipedia);

    Ok(Providers {
        photos: Box::new(photos),
        weather: Box::new(weather),
        summaries: Box::new(summaries),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let s = id.as_str();
            let parsed = ServiceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn service_id_is_case_insensitive() {
        assert_eq!(ServiceId::try_from("OpenWeather").unwrap(), ServiceId::OpenWeather);
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("flickr").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn providers_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = providers_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured for service 'unsplash'"));
        assert!(msg.contains("Hint: run `travel configure unsplash`"));
    }

    #[test]
    fn providers_from_config_requires_openweather_too() {
        let mut cfg = Config::default();
        cfg.upsert_api_key(ServiceId::Unsplash, "KEY".to_string());

        let err = providers_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("'openweather'"));
    }

    #[test]
    fn providers_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_api_key(ServiceId::Unsplash, "KEY".to_string());
        cfg.upsert_api_key(ServiceId::OpenWeather, "KEY".to_string());

        assert!(providers_from_config(&cfg).is_ok());
    }

    #[test]
    fn providers_for_checks_only_needed_keys() {
        let mut cfg = Config::default();
        cfg.upsert_api_key(ServiceId::Unsplash, "KEY".to_string());

        assert!(providers_for(&cfg, &[ServiceId::Unsplash, ServiceId::Wikipedia]).is_ok());

        let err = providers_for(&cfg, &[ServiceId::OpenWeather]).unwrap_err();
        assert!(err.to_string().contains("Hint: run `travel configure openweather`"));
    }
}
