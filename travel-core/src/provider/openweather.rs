use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::FetchError,
    model::{Forecast, ForecastEntry, WeatherSnapshot},
};

use super::{ServiceId, WeatherProvider, get_json};

const SERVICE: ServiceId = ServiceId::OpenWeather;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, http: Client, base_url: &str) -> Self {
        Self {
            api_key,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, endpoint: &str, city: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}/data/2.5/{endpoint}", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn condition_of(weather: &[OwWeather]) -> (String, Option<String>) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), None))
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, icon) = condition_of(&parsed.weather);
        WeatherSnapshot {
            place_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition,
            icon,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        tracing::debug!("Requesting current weather");
        let parsed: OwCurrentResponse = get_json(SERVICE, self.request("weather", city), city).await?;
        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError> {
        tracing::debug!("Requesting 5-day forecast");
        let parsed: OwForecastResponse =
            get_json(SERVICE, self.request("forecast", city), city).await?;

        let mut entries = Vec::with_capacity(parsed.list.len());
        for entry in parsed.list {
            let timestamp = unix_to_utc(entry.dt).ok_or(FetchError::MissingContent {
                service: SERVICE,
                what: "a valid forecast timestamp",
            })?;
            let (condition, icon) = condition_of(&entry.weather);
            entries.push(ForecastEntry {
                timestamp,
                label: entry.dt_txt,
                temperature_c: entry.main.temp,
                humidity_pct: entry.main.humidity,
                condition,
                icon,
            });
        }

        Ok(Forecast {
            city_name: parsed.city.name,
            entries,
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
