use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single search hit from the photo service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub thumbnail_url: String,
    pub full_url: String,
    pub alt_text: Option<String>,
    /// Free-text location from the uploader's profile, e.g. "Paris, France".
    pub location: Option<String>,
}

/// Current conditions for a place, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Service-formatted label, `YYYY-MM-DD HH:MM:SS`.
    pub label: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub condition: String,
    pub icon: Option<String>,
}

impl ForecastEntry {
    /// Time-of-day part of the label, if it has one.
    pub fn time_of_day(&self) -> Option<&str> {
        self.label.split_whitespace().nth(1)
    }
}

/// 5-day forecast at 3-hour steps, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub entries: Vec<ForecastEntry>,
}

/// Everything the destination detail page needs, after fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationData {
    pub query: String,
    pub photos: Vec<Photo>,
    pub weather: Option<WeatherSnapshot>,
    pub summary: String,
}

/// Everything the weather dashboard needs, after fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub city: String,
    pub current: Option<WeatherSnapshot>,
    pub forecast: Option<Forecast>,
}

/// A popular destination together with its photo search result.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularDestination {
    pub name: String,
    pub photos: Vec<Photo>,
}
