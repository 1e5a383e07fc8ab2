//! End-to-end page builds against a mock of all three services.

use chrono::DateTime;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use travel_core::{Aggregator, Config, Endpoints, Page, ServiceId, providers_for, providers_from_config};

fn config_for(server: &ServerGuard) -> Config {
    let mut config = Config::default();
    config.endpoints = Endpoints::all_at(&server.url());
    config.upsert_api_key(ServiceId::Unsplash, "UNSPLASH".into());
    config.upsert_api_key(ServiceId::OpenWeather, "OPENWEATHER".into());
    config
}

async fn build(server: &ServerGuard, page: Page) -> String {
    let config = config_for(server);
    let aggregator = Aggregator::new(providers_from_config(&config).unwrap());
    page.build(&aggregator, &config).await.unwrap()
}

async fn mock_json(server: &mut ServerGuard, path: &str, status: usize, body: String) {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
}

fn current_weather(city: &str, temp: f64) -> String {
    json!({
        "name": city,
        "dt": 1_709_550_000,
        "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 76 },
        "weather": [{ "description": "overcast clouds", "icon": "04d" }],
        "wind": { "speed": 4.6 }
    })
    .to_string()
}

/// 40 entries at 3-hour steps from Monday 2024-03-04 00:00 UTC.
fn forecast(city: &str) -> String {
    let start = 1_709_510_400_i64;
    let list: Vec<_> = (0..40)
        .map(|i| {
            let dt = start + i * 3 * 3600;
            let label = DateTime::from_timestamp(dt, 0)
                .unwrap()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            json!({
                "dt": dt,
                "dt_txt": label,
                "main": { "temp": 5.0 + i as f64 * 0.25, "feels_like": 3.0, "humidity": 80 },
                "weather": [{ "description": "light rain", "icon": "10d" }],
                "wind": { "speed": 3.0 }
            })
        })
        .collect();
    json!({ "city": { "name": city, "country": "GB" }, "list": list }).to_string()
}

#[tokio::test]
async fn unknown_destination_renders_not_found_without_weather() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/search/photos", 200, json!({ "total": 0, "results": [] }).to_string()).await;
    mock_json(&mut server, "/data/2.5/weather", 200, current_weather("Atlantis", 20.0)).await;
    mock_json(
        &mut server,
        "/w/api.php",
        200,
        json!({ "query": { "pages": { "99": { "extract": "A legendary island." } } } }).to_string(),
    )
    .await;

    let html = build(
        &server,
        Page::Destination {
            query: Some("atlantis".into()),
        },
    )
    .await;

    assert!(html.contains("Atlantis Not Found"));
    assert!(html.contains("Please check the spelling or try another search."));
    assert!(!html.contains("weather-widget"));
    assert!(!html.contains("A legendary island."));
}

#[tokio::test]
async fn known_destination_merges_all_three_services() {
    let mut server = Server::new_async().await;
    mock_json(
        &mut server,
        "/search/photos",
        200,
        json!({ "results": [{
            "urls": { "small": "https://img/kyoto-s.jpg", "regular": "https://img/kyoto-r.jpg" },
            "alt_description": "temple gate",
            "user": { "location": "Fushimi, Kyoto, Japan" }
        }] })
        .to_string(),
    )
    .await;
    mock_json(&mut server, "/data/2.5/weather", 200, current_weather("Kyoto", 14.5)).await;
    mock_json(
        &mut server,
        "/w/api.php",
        200,
        json!({ "query": { "pages": { "1": { "extract": "Kyoto was the imperial capital." } } } }).to_string(),
    )
    .await;

    let html = build(
        &server,
        Page::Destination {
            query: Some("kyoto".into()),
        },
    )
    .await;

    assert!(html.contains("<title>Kyoto | Travel Explorer</title>"));
    assert!(html.contains(">Japan<"));
    assert!(html.contains("Kyoto was the imperial capital."));
    assert!(html.contains("15°C"));
    assert!(html.contains("overcast clouds"));
}

#[tokio::test]
async fn destination_survives_every_service_failing() {
    let mut server = Server::new_async().await;
    for path in ["/search/photos", "/data/2.5/weather", "/w/api.php"] {
        mock_json(&mut server, path, 500, "{}".into()).await;
    }

    let html = build(
        &server,
        Page::Destination {
            query: Some("Paris".into()),
        },
    )
    .await;

    assert!(html.contains("Paris Not Found"));
}

#[tokio::test]
async fn dashboard_shows_current_weather_and_five_days() {
    let mut server = Server::new_async().await;
    let current = server
        .mock("GET", "/data/2.5/weather")
        .match_query(Matcher::UrlEncoded("q".into(), "London".into()))
        .with_status(200)
        .with_body(current_weather("London", 7.5))
        .create_async()
        .await;
    let daily = server
        .mock("GET", "/data/2.5/forecast")
        .match_query(Matcher::UrlEncoded("q".into(), "London".into()))
        .with_status(200)
        .with_body(forecast("London"))
        .create_async()
        .await;

    let html = build(
        &server,
        Page::Weather {
            city: "London".into(),
        },
    )
    .await;

    current.assert_async().await;
    daily.assert_async().await;

    assert!(html.contains("Current Weather in London"));
    assert!(html.contains("<p class=\"temp\">8°C</p>"));
    assert!(html.contains("overcast clouds"));
    assert_eq!(html.matches("class=\"forecast-card\"").count(), 5);

    let positions: Vec<_> = ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|day| html.find(&format!(">{day}<")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    // Monday 12:00 is entry 4: 5.0 + 4 * 0.25
    assert!(html.contains("<p class=\"forecast-temp\">6°C</p>"));
}

#[tokio::test]
async fn dashboard_with_unknown_city_shows_one_error() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/data/2.5/weather", 404, r#"{"cod":"404"}"#.into()).await;
    mock_json(&mut server, "/data/2.5/forecast", 200, forecast("Nowhere")).await;

    let html = build(
        &server,
        Page::Weather {
            city: "Nowhere".into(),
        },
    )
    .await;

    assert_eq!(html.matches("class=\"error-message\"").count(), 1);
    assert!(html.contains("Please try another city."));
    assert!(!html.contains("forecast-card"));
}

#[tokio::test]
async fn home_grid_uses_configured_descriptions() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::UrlEncoded("query".into(), "Rome".into()))
        .with_status(200)
        .with_body(
            json!({ "results": [{
                "urls": { "small": "https://img/rome-s.jpg", "regular": "https://img/rome-r.jpg" },
                "alt_description": "colosseum",
                "user": { "location": null }
            }] })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/search/photos")
        .match_query(Matcher::UrlEncoded("query".into(), "Atlantis".into()))
        .with_status(200)
        .with_body(json!({ "results": [] }).to_string())
        .create_async()
        .await;

    let mut config = config_for(&server);
    config.popular = vec!["Atlantis".into(), "Rome".into()];
    let aggregator = Aggregator::new(providers_from_config(&config).unwrap());

    let html = Page::Home.build(&aggregator, &config).await.unwrap();

    assert_eq!(html.matches("class=\"destination-card\"").count(), 1);
    assert!(html.contains("<h3>Rome</h3>"));
    assert!(html.contains("The eternal city"));
    assert!(!html.contains("<h3>Atlantis</h3>"));
}

#[tokio::test]
async fn home_builds_without_a_weather_key() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/search/photos", 200, json!({ "results": [] }).to_string()).await;

    let mut config = Config::default();
    config.endpoints = Endpoints::all_at(&server.url());
    config.upsert_api_key(ServiceId::Unsplash, "UNSPLASH".into());
    config.popular = vec!["Rome".into()];

    let aggregator = Aggregator::new(providers_for(&config, Page::Home.services()).unwrap());
    let html = Page::Home.build(&aggregator, &config).await.unwrap();

    assert!(html.contains("No destinations to show right now."));
}
