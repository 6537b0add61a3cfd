use crate::core::config::MinIOConfig;

/// Maps object keys to public URLs and back
#[derive(Debug, Clone)]
pub struct StorageUrls {
    endpoint: String,
    public_endpoint: String,
    bucket: String,
    public_prefix: String,
}

impl StorageUrls {
    pub fn new(endpoint: &str, public_endpoint: &str, bucket: &str, public_prefix: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            public_endpoint: public_endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            public_prefix: public_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MinIOConfig) -> Self {
        Self::new(
            &config.endpoint,
            &config.public_endpoint,
            &config.bucket,
            &config.public_prefix,
        )
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Key under the public prefix, e.g. `public/images/shoes/<uuid>.webp`
    pub fn public_key(&self, path: &str) -> String {
        format!("{}/{}", self.public_prefix, path.trim_start_matches('/'))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket, key)
    }

    /// Object key for a URL on either endpoint of this bucket, `None` for foreign URLs
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        [&self.public_endpoint, &self.endpoint]
            .into_iter()
            .find_map(|base| url.strip_prefix(&format!("{}/{}/", base, self.bucket)))
            .filter(|key| !key.is_empty() && !key.split('/').any(|seg| seg == ".."))
            .map(str::to_string)
    }

    pub fn is_public_key(&self, key: &str) -> bool {
        key.starts_with(&format!("{}/", self.public_prefix))
    }

    /// True when `url` points at a public object of this store
    pub fn is_public_url(&self, url: &str) -> bool {
        self.key_from_url(url)
            .is_some_and(|key| self.is_public_key(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> StorageUrls {
        StorageUrls::new(
            "http://minio:9000",
            "https://media.shop.test/",
            "storefront-media",
            "public",
        )
    }

    #[test]
    fn test_public_url_round_trips_to_key() {
        let urls = urls();
        let key = urls.public_key("images/shoes/a.webp");
        assert_eq!(key, "public/images/shoes/a.webp");

        let url = urls.public_url(&key);
        assert_eq!(
            url,
            "https://media.shop.test/storefront-media/public/images/shoes/a.webp"
        );
        assert_eq!(urls.key_from_url(&url).as_deref(), Some(key.as_str()));
        assert!(urls.is_public_url(&url));
    }

    #[test]
    fn test_internal_endpoint_recognised() {
        let key = urls().key_from_url("http://minio:9000/storefront-media/public/x.png");
        assert_eq!(key.as_deref(), Some("public/x.png"));
    }

    #[test]
    fn test_foreign_and_tricky_urls_rejected() {
        let urls = urls();
        assert!(urls.key_from_url("https://evil.test/storefront-media/public/x.png").is_none());
        assert!(urls.key_from_url("https://media.shop.test/other-bucket/public/x.png").is_none());
        assert!(urls.key_from_url("https://media.shop.test/storefront-media/").is_none());
        assert!(urls
            .key_from_url("https://media.shop.test/storefront-media/public/../secret")
            .is_none());
        assert!(!urls.is_public_url("https://media.shop.test/storefront-media/private/x.png"));
    }
}
