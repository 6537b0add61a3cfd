//! Storefront home view: active categories, each with its newest products.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::{CatalogAggregator, CatalogStore, CategoryGroup, PgCatalogStore};
