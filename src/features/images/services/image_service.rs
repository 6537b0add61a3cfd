use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::{extension_for, UploadedImageDto, DEFAULT_IMAGE_FOLDER};
use crate::modules::storage::MinIOClient;
use crate::shared::validation::SLUG_REGEX;

pub struct ImageService {
    storage: Arc<MinIOClient>,
}

/// Resolve the upload folder; blank means the default folder
fn resolve_folder(folder: Option<&str>) -> Result<&str> {
    match folder.map(str::trim).filter(|f| !f.is_empty()) {
        None => Ok(DEFAULT_IMAGE_FOLDER),
        Some(f) if SLUG_REGEX.is_match(f) => Ok(f),
        Some(f) => Err(AppError::BadRequest(format!(
            "Invalid folder '{}': use lowercase letters, digits and single hyphens",
            f
        ))),
    }
}

impl ImageService {
    pub fn new(storage: Arc<MinIOClient>) -> Self {
        Self { storage }
    }

    /// Store under `{public}/images/{folder}/{uuid}.{ext}`
    pub async fn upload(
        &self,
        data: Vec<u8>,
        content_type: &str,
        folder: Option<&str>,
    ) -> Result<UploadedImageDto> {
        let extension = extension_for(content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Image type '{}' is not allowed", content_type))
        })?;
        let folder = resolve_folder(folder)?;

        let urls = self.storage.urls();
        let key = urls.public_key(&format!("images/{}/{}.{}", folder, Uuid::new_v4(), extension));

        self.storage.upload(&key, &data, content_type).await?;
        tracing::info!("Image uploaded: key={}, size={}", key, data.len());

        Ok(UploadedImageDto {
            url: urls.public_url(&key),
            key,
            content_type: content_type.to_string(),
            size: data.len(),
        })
    }

    /// Delete by public URL. URLs outside this store are rejected.
    pub async fn delete_by_url(&self, url: &str) -> Result<()> {
        let key = self
            .storage
            .urls()
            .key_from_url(url)
            .filter(|key| self.storage.urls().is_public_key(key))
            .ok_or_else(|| AppError::BadRequest("URL does not belong to this store".to_string()))?;

        self.storage.delete(&key).await?;
        tracing::info!("Image deleted: key={}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_folder() {
        assert_eq!(resolve_folder(None).unwrap(), "misc");
        assert_eq!(resolve_folder(Some("  ")).unwrap(), "misc");
        assert_eq!(resolve_folder(Some("products")).unwrap(), "products");
        assert!(resolve_folder(Some("../etc")).is_err());
        assert!(resolve_folder(Some("Hero Banners")).is_err());
    }
}
