//! Storefront search over product names/SKUs and category names.

pub mod dto;
pub mod handler;
pub mod routes;
pub mod service;

pub use service::SearchService;
