use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Maximum upload size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

pub const DEFAULT_IMAGE_FOLDER: &str = "misc";

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
];

pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Multipart form for image uploads (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Folder under `images/`, lowercase slug (default "misc")
    #[schema(example = "products")]
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedImageDto {
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteImageDto {
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Webp,
    Avif,
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct OptimizeImageQuery {
    /// Public URL of an image in this store
    pub url: String,
    /// Target width, one of the configured widths
    pub w: u32,
    /// Quality 1-100
    pub q: Option<u8>,
    /// Output format (default webp)
    #[serde(default)]
    pub format: ImageFormat,
}
