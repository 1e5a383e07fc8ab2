//! Core library for the `travel` site builder.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the photo, weather and encyclopedia services
//! - Fallback-applying fetchers and the per-page aggregator
//! - View models and HTML rendering for each page
//!
//! It is used by `travel-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod page;
pub mod provider;
pub mod render;
pub mod view;

pub use aggregate::Aggregator;
pub use config::{Config, DestinationInfo, Endpoints, ServiceConfig};
pub use error::FetchError;
pub use model::{DashboardData, DestinationData, Forecast, ForecastEntry, Photo, WeatherSnapshot};
pub use page::Page;
pub use provider::{PhotoProvider, Providers, ServiceId, SummaryProvider, WeatherProvider, providers_for, providers_from_config};
