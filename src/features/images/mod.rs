//! Catalog image upload/delete and the optimization redirect.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::{ImageOptimizer, ImageService};
