//! Render-ready view models.
//!
//! Every builder here is a pure function of already-fetched data. Fallback
//! and placeholder text lives here so templates only lay things out.

use crate::{
    config::Config,
    model::{DashboardData, DestinationData, Forecast, ForecastEntry, Photo, PopularDestination, WeatherSnapshot},
};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Time label of the forecast slot kept for each day.
pub const MIDDAY: &str = "12:00:00";

pub const NO_DESTINATION_TITLE: &str = "No Destination Specified";
pub const NO_DESTINATION_MESSAGE: &str =
    "Please go back to the homepage and select a destination to explore.";
pub const WEATHER_UNAVAILABLE: &str = "Could not load weather data.";
pub const DASHBOARD_ERROR: &str =
    "Could not retrieve weather data for this location. Please try another city.";
pub const DEFAULT_CARD_DESCRIPTION: &str = "A beautiful destination waiting to be explored.";

/// Uppercase the first character and keep the rest as typed.
pub fn capitalize(s: Option<&str>) -> String {
    let Some(s) = s else {
        return String::new();
    };
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trimmed last comma-separated part of `location`; empty unless there is a comma.
pub fn country_from_location(location: Option<&str>) -> String {
    location
        .and_then(|loc| loc.rsplit_once(','))
        .map(|(_, country)| country.trim().to_string())
        .unwrap_or_default()
}

/// Round half up, so -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn icon_url(icon: Option<&str>, suffix: &str) -> Option<String> {
    icon.filter(|code| !code.is_empty())
        .map(|code| format!("{ICON_BASE_URL}/{code}{suffix}.png"))
}

/// Link to the detail page for `name`.
pub fn destination_link(name: &str) -> String {
    format!("destination.html?q={}", urlencoding::encode(name))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherView {
    pub place_name: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherWidget {
    /// Placeholder text shown instead of the widget.
    Unavailable(String),
    Current(CurrentWeatherView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationDetail {
    pub title: String,
    pub country: String,
    pub description: String,
    pub main_image: GalleryImage,
    pub weather: WeatherWidget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DestinationView {
    /// The page was opened without a query.
    Unspecified { title: String, message: String },
    /// The photo search came back empty.
    NotFound {
        title: String,
        message: String,
        country: String,
    },
    Found(DestinationDetail),
}

impl DestinationView {
    pub fn is_found(&self) -> bool {
        matches!(self, DestinationView::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub weekday: String,
    pub temperature: i64,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPanels {
    pub current: CurrentWeatherView,
    /// One card per day, oldest first.
    pub forecast: Vec<ForecastCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Single message shown in place of both panels.
    Error(String),
    Ready(DashboardPanels),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeCard {
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub link: String,
}

pub fn current_weather_view(weather: &WeatherSnapshot) -> CurrentWeatherView {
    CurrentWeatherView {
        place_name: weather.place_name.clone(),
        temperature: round_half_up(weather.temperature_c),
        feels_like: round_half_up(weather.feels_like_c),
        humidity: weather.humidity_pct,
        wind_speed: weather.wind_speed_mps,
        condition: weather.condition.clone(),
        icon_url: icon_url(weather.icon.as_deref(), "@2x"),
    }
}

pub fn weather_widget(weather: Option<&WeatherSnapshot>) -> WeatherWidget {
    match weather {
        Some(w) => WeatherWidget::Current(current_weather_view(w)),
        None => WeatherWidget::Unavailable(WEATHER_UNAVAILABLE.to_string()),
    }
}

fn gallery_image(photo: &Photo) -> GalleryImage {
    GalleryImage {
        url: photo.full_url.clone(),
        alt: photo.alt_text.clone().unwrap_or_default(),
    }
}

pub fn no_destination_view() -> DestinationView {
    DestinationView::Unspecified {
        title: NO_DESTINATION_TITLE.to_string(),
        message: NO_DESTINATION_MESSAGE.to_string(),
    }
}

/// Detail page model. With no photos, weather and summary are ignored.
pub fn destination_view(data: &DestinationData) -> DestinationView {
    let title = capitalize(Some(&data.query));

    let Some(main_photo) = data.photos.first() else {
        return DestinationView::NotFound {
            title,
            message: format!(
                "We couldn't find any photos for \"{}\". Please check the spelling or try another search.",
                data.query
            ),
            country: String::new(),
        };
    };

    DestinationView::Found(DestinationDetail {
        title,
        country: country_from_location(main_photo.location.as_deref()),
        description: data.summary.clone(),
        main_image: gallery_image(main_photo),
        weather: weather_widget(data.weather.as_ref()),
    })
}

/// The forecast entries in the midday slot, in their original order.
pub fn daily_entries(forecast: &Forecast) -> Vec<&ForecastEntry> {
    forecast
        .entries
        .iter()
        .filter(|entry| entry.time_of_day() == Some(MIDDAY))
        .collect()
}

pub fn forecast_card(entry: &ForecastEntry) -> ForecastCard {
    ForecastCard {
        weekday: entry.timestamp.format("%a").to_string(),
        temperature: round_half_up(entry.temperature_c),
        icon_url: icon_url(entry.icon.as_deref(), ""),
    }
}

/// Dashboard model. Missing current weather or forecast is a single error.
pub fn dashboard_view(data: &DashboardData) -> DashboardView {
    match (&data.current, &data.forecast) {
        (Some(current), Some(forecast)) => DashboardView::Ready(DashboardPanels {
            current: current_weather_view(current),
            forecast: daily_entries(forecast)
                .into_iter()
                .map(forecast_card)
                .collect(),
        }),
        _ => DashboardView::Error(DASHBOARD_ERROR.to_string()),
    }
}

/// Cards for the home grid; destinations without photos are skipped.
pub fn home_cards(destinations: &[PopularDestination], config: &Config) -> Vec<HomeCard> {
    destinations
        .iter()
        .filter_map(|dest| {
            let photo = dest.photos.first()?;
            let description = config
                .description_for(&dest.name)
                .map(str::to_string)
                .or_else(|| photo.alt_text.clone())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_CARD_DESCRIPTION.to_string());

            Some(HomeCard {
                name: dest.name.clone(),
                image_url: photo.thumbnail_url.clone(),
                description,
                link: destination_link(&dest.name),
            })
        })
        .collect()
}
