//! Object storage for catalog images.
//!
//! MinIO/S3-compatible client plus the pure URL mapping between object keys
//! and the public URLs stored on products, categories and slides.

mod minio_client;
mod urls;

pub use minio_client::MinIOClient;
pub use urls::StorageUrls;
