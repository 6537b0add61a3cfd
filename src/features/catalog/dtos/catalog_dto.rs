use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::catalog::services::CategoryGroup;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::products::dtos::ProductResponseDto;

/// One home-page section: a category and up to four of its newest products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryGroupDto {
    pub category: CategoryResponseDto,
    pub products: Vec<ProductResponseDto>,
}

impl From<CategoryGroup> for CategoryGroupDto {
    fn from(group: CategoryGroup) -> Self {
        Self {
            category: group.category.into(),
            products: group.products.into_iter().map(Into::into).collect(),
        }
    }
}
