use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::FetchError;

use super::{ServiceId, SummaryProvider, get_json};

const SERVICE: ServiceId = ServiceId::Wikipedia;

/// Page id the API uses for a title with no article.
const MISSING_PAGE_ID: &str = "-1";

#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    http: Client,
    base_url: String,
}

impl WikipediaProvider {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WpPage {
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WpQuery {
    pages: BTreeMap<String, WpPage>,
}

#[derive(Debug, Deserialize)]
struct WpResponse {
    query: Option<WpQuery>,
}

#[async_trait]
impl SummaryProvider for WikipediaProvider {
    /// Plain-text introduction of the article titled `title`, following redirects.
    #[instrument(skip(self))]
    async fn summary(&self, title: &str) -> Result<String, FetchError> {
        tracing::debug!("Requesting article extract");

        let request = self
            .http
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "true"),
                ("explaintext", "true"),
                ("redirects", "1"),
                ("titles", title),
            ]);

        let parsed: WpResponse = get_json(SERVICE, request, title).await?;

        let (page_id, page) = parsed
            .query
            .and_then(|q| pick_page(q.pages))
            .ok_or(FetchError::MissingContent {
                service: SERVICE,
                what: "query.pages",
            })?;

        if page_id == MISSING_PAGE_ID {
            return Err(FetchError::NotFound {
                service: SERVICE,
                query: title.to_string(),
            });
        }

        match page.extract {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(FetchError::EmptyExtract { service: SERVICE }),
        }
    }
}

/// The real article with the lowest page id, else the first placeholder.
///
/// A `|` in the title asks for several pages at once; missing and invalid
/// titles come back under negative ids.
fn pick_page(pages: BTreeMap<String, WpPage>) -> Option<(String, WpPage)> {
    let mut found: Option<(u64, String, WpPage)> = None;
    let mut placeholder = None;

    for (id, page) in pages {
        match id.parse::<u64>() {
            Ok(n) if found.as_ref().is_none_or(|(best, ..)| n < *best) => found = Some((n, id, page)),
            Ok(_) => {}
            Err(_) if placeholder.is_none() => placeholder = Some((id, page)),
            Err(_) => {}
        }
    }

    found.map(|(_, id, page)| (id, page)).or(placeholder)
}
