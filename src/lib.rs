pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{AppConfig, LocalStorage};

pub use app::Marketplace;
pub use core::catalog::Catalog;
pub use core::query::{query, CatalogItem, CategoryFilter, QueryParams, SortMode};
pub use utils::error::{MarketError, Result};
