use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::FetchError, model::Photo};

use super::{PhotoProvider, ServiceId, get_json};

const SERVICE: ServiceId = ServiceId::Unsplash;
const PER_PAGE: &str = "10";

#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    access_key: String,
    http: Client,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(access_key: String, http: Client, base_url: &str) -> Self {
        Self {
            access_key,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UsUrls {
    small: String,
    regular: String,
}

#[derive(Debug, Deserialize)]
struct UsUser {
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsPhoto {
    urls: UsUrls,
    alt_description: Option<String>,
    user: UsUser,
}

#[derive(Debug, Deserialize)]
struct UsSearchResponse {
    results: Vec<UsPhoto>,
}

impl From<UsPhoto> for Photo {
    fn from(p: UsPhoto) -> Self {
        Photo {
            thumbnail_url: p.urls.small,
            full_url: p.urls.regular,
            alt_text: p.alt_description,
            location: p.user.location,
        }
    }
}

#[async_trait]
impl PhotoProvider for UnsplashProvider {
    #[instrument(skip(self))]
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, FetchError> {
        tracing::debug!("Searching photos");

        let request = self
            .http
            .get(format!("{}/search/photos", self.base_url))
            .query(&[
                ("query", query),
                ("per_page", PER_PAGE),
                ("orientation", "landscape"),
                ("client_id", self.access_key.as_str()),
            ]);

        let parsed: UsSearchResponse = get_json(SERVICE, request, query).await?;
        Ok(parsed.results.into_iter().map(Photo::from).collect())
    }
}
