use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::dtos::ProductResponseDto;

pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const MAX_SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search term, matched case-insensitively
    #[serde(default)]
    pub q: String,
    /// Max results per kind (1-50, default 10)
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchResultDto {
    pub query: String,
    pub products: Vec<ProductResponseDto>,
    pub categories: Vec<CategoryResponseDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamped() {
        let query = |limit| SearchQuery {
            q: "shoe".to_string(),
            limit,
        };
        assert_eq!(query(None).limit(), 10);
        assert_eq!(query(Some(0)).limit(), 1);
        assert_eq!(query(Some(500)).limit(), 50);
        assert_eq!(query(Some(25)).limit(), 25);
    }
}
