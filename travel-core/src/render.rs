//! HTML rendering of view models.

use anyhow::{Context, Result};
use askama::Template;

use crate::view::{DashboardView, DestinationDetail, DestinationView, HomeCard, WeatherWidget};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    cards: &'a [HomeCard],
}

#[derive(Template)]
#[template(path = "destination.html")]
struct DestinationTemplate<'a> {
    detail: &'a DestinationDetail,
}

#[derive(Template)]
#[template(path = "destination_message.html")]
struct DestinationMessageTemplate<'a> {
    heading: String,
    country: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherTemplate<'a> {
    city: &'a str,
    dashboard: &'a DashboardView,
}

pub fn home_html(cards: &[HomeCard]) -> Result<String> {
    HomeTemplate { cards }
        .render()
        .context("Failed to render home page")
}

pub fn destination_html(view: &DestinationView) -> Result<String> {
    let rendered = match view {
        DestinationView::Found(detail) => DestinationTemplate { detail }.render(),
        DestinationView::NotFound {
            title,
            message,
            country,
        } => DestinationMessageTemplate {
            heading: format!("{title} Not Found"),
            country,
            message,
        }
        .render(),
        DestinationView::Unspecified { title, message } => DestinationMessageTemplate {
            heading: title.clone(),
            country: "",
            message,
        }
        .render(),
    };
    rendered.context("Failed to render destination page")
}

pub fn dashboard_html(city: &str, dashboard: &DashboardView) -> Result<String> {
    WeatherTemplate { city, dashboard }
        .render()
        .context("Failed to render weather dashboard")
}
