pub mod catalog;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod error;
pub mod models;
pub mod scroll;

pub use client::{HttpNewsClient, NewsApi};
pub use config::ClientConfig;
pub use connectivity::{probe_once, spawn_connectivity_monitor, Connectivity, MonitorConfig, MonitorHandle};
pub use controller::{FetchMode, FetchOutcome, NewsController, ResultsView, SearchPhase, SearchState};
pub use error::{ApiError, ConfigError, FilterError, MonitorError};
pub use models::{HealthStatus, NewsFilters, NewsItem, NewsResponsePage, OptionalList};
pub use scroll::InfiniteScroll;
