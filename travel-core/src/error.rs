//! Failure reasons for a single external API call.

use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ServiceId;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {service} failed: {source}")]
    Transport {
        service: ServiceId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: ServiceId,
        status: StatusCode,
        body: String,
    },

    #[error("{service} has no result for '{query}'")]
    NotFound { service: ServiceId, query: String },

    #[error("failed to parse {service} response: {source}")]
    Decode {
        service: ServiceId,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} article has no introduction")]
    EmptyExtract { service: ServiceId },

    #[error("{service} response is missing {what}")]
    MissingContent {
        service: ServiceId,
        what: &'static str,
    },
}

impl FetchError {
    pub fn service(&self) -> ServiceId {
        match self {
            FetchError::Transport { service, .. }
            | FetchError::Status { service, .. }
            | FetchError::NotFound { service, .. }
            | FetchError::Decode { service, .. }
            | FetchError::EmptyExtract { service }
            | FetchError::MissingContent { service, .. } => *service,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
