use crate::core::config::ImageConfig;
use crate::core::error::{AppError, Result};
use crate::features::images::dtos::OptimizeImageQuery;
use crate::modules::storage::StorageUrls;

/// Validates optimization requests and builds the external optimizer URL
pub struct ImageOptimizer {
    config: ImageConfig,
    urls: StorageUrls,
}

impl ImageOptimizer {
    pub fn new(config: ImageConfig, urls: StorageUrls) -> Self {
        Self { config, urls }
    }

    pub fn allowed_widths(&self) -> &[u32] {
        &self.config.allowed_widths
    }

    pub fn redirect_url(&self, query: &OptimizeImageQuery) -> Result<String> {
        if !self.urls.is_public_url(&query.url) {
            return Err(AppError::BadRequest(
                "url must point to an image in this store".to_string(),
            ));
        }

        if !self.config.allowed_widths.contains(&query.w) {
            return Err(AppError::BadRequest(format!(
                "w must be one of {:?}",
                self.config.allowed_widths
            )));
        }

        let quality = query.q.unwrap_or(self.config.default_quality);
        if !(1..=100).contains(&quality) {
            return Err(AppError::BadRequest(
                "q must be between 1 and 100".to_string(),
            ));
        }

        Ok(format!(
            "{}/?url={}&w={}&q={}&f={}",
            self.config.optimizer_url,
            urlencoding::encode(&query.url),
            query.w,
            quality,
            query.format.as_str()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::images::dtos::ImageFormat;
    use crate::shared::test_helpers::{optimizer_fixture as optimizer, OPTIMIZER_IMAGE_URL as IMAGE_URL};

    fn query(url: &str, w: u32, q: Option<u8>) -> OptimizeImageQuery {
        OptimizeImageQuery {
            url: url.to_string(),
            w,
            q,
            format: ImageFormat::default(),
        }
    }

    #[test]
    fn test_redirect_url_with_defaults() {
        let url = optimizer().redirect_url(&query(IMAGE_URL, 640, None)).unwrap();
        assert_eq!(
            url,
            "https://img.shop.test/?url=https%3A%2F%2Fmedia.shop.test%2Fstorefront-media%2Fpublic%2Fimages%2Fp%2Fa%20b.jpg&w=640&q=75&f=webp"
        );
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let optimizer = optimizer();
        assert!(optimizer.redirect_url(&query(IMAGE_URL, 500, None)).is_err());
        assert!(optimizer.redirect_url(&query(IMAGE_URL, 640, Some(0))).is_err());
        assert!(optimizer.redirect_url(&query(IMAGE_URL, 640, Some(101))).is_err());
        assert!(optimizer
            .redirect_url(&query("https://elsewhere.test/x.jpg", 640, None))
            .is_err());
    }

    #[test]
    fn test_explicit_quality_and_format() {
        let mut q = query(IMAGE_URL, 1280, Some(90));
        q.format = ImageFormat::Avif;
        let url = optimizer().redirect_url(&q).unwrap();
        assert!(url.ends_with("&w=1280&q=90&f=avif"));
    }
}
