use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::customers::{dtos as customers_dtos, handlers as customers_handlers};
use crate::features::districts::{dtos as districts_dtos, handlers as districts_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::search::{dto as search_dto, handler as search_handler};
use crate::features::sliders::{dtos as sliders_dtos, handlers as sliders_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog (public)
        catalog_handlers::get_home_catalog,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        products_handlers::list_products,
        products_handlers::get_product,
        sliders_handlers::list_sliders,
        districts_handlers::list_districts,
        search_handler::search,
        images_handlers::optimize_image,
        // Admin
        auth::handler::get_me,
        categories_handlers::admin_list_categories,
        categories_handlers::admin_get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        products_handlers::admin_list_products,
        products_handlers::admin_get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        sliders_handlers::admin_list_sliders,
        sliders_handlers::admin_get_slider,
        sliders_handlers::create_slider,
        sliders_handlers::update_slider,
        sliders_handlers::delete_slider,
        districts_handlers::admin_list_districts,
        districts_handlers::admin_get_district,
        districts_handlers::create_district,
        districts_handlers::update_district,
        districts_handlers::delete_district,
        customers_handlers::list_customers,
        customers_handlers::get_customer,
        customers_handlers::create_customer,
        customers_handlers::update_customer,
        customers_handlers::delete_customer,
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        images_handlers::upload_image,
        images_handlers::delete_image,
    ),
    components(
        schemas(
            Meta,
            ApiResponse<()>,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Catalog
            catalog_dtos::CategoryGroupDto,
            ApiResponse<Vec<catalog_dtos::CategoryGroupDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::AdminCategoryDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::AdminCategoryDto>>,
            ApiResponse<categories_dtos::AdminCategoryDto>,
            // Products
            products_dtos::ProductCategoryDto,
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Sliders
            sliders_dtos::SliderResponseDto,
            sliders_dtos::CarouselStateDto,
            sliders_dtos::SliderListResponseDto,
            sliders_dtos::AdminSliderDto,
            sliders_dtos::CreateSliderDto,
            sliders_dtos::UpdateSliderDto,
            ApiResponse<sliders_dtos::SliderListResponseDto>,
            ApiResponse<Vec<sliders_dtos::AdminSliderDto>>,
            ApiResponse<sliders_dtos::AdminSliderDto>,
            // Districts
            districts_dtos::DistrictResponseDto,
            districts_dtos::AdminDistrictDto,
            districts_dtos::CreateDistrictDto,
            districts_dtos::UpdateDistrictDto,
            ApiResponse<Vec<districts_dtos::DistrictResponseDto>>,
            ApiResponse<Vec<districts_dtos::AdminDistrictDto>>,
            ApiResponse<districts_dtos::AdminDistrictDto>,
            // Customers
            customers_dtos::CustomerResponseDto,
            customers_dtos::CreateCustomerDto,
            customers_dtos::UpdateCustomerDto,
            ApiResponse<Vec<customers_dtos::CustomerResponseDto>>,
            ApiResponse<customers_dtos::CustomerResponseDto>,
            // Users
            users_models::UserRole,
            users_dtos::AdminUserResponseDto,
            users_dtos::CreateAdminUserDto,
            users_dtos::UpdateAdminUserDto,
            ApiResponse<Vec<users_dtos::AdminUserResponseDto>>,
            ApiResponse<users_dtos::AdminUserResponseDto>,
            // Search
            search_dto::SearchResultDto,
            ApiResponse<search_dto::SearchResultDto>,
            // Images
            images_dtos::ImageFormat,
            images_dtos::UploadImageDto,
            images_dtos::UploadedImageDto,
            images_dtos::DeleteImageDto,
            ApiResponse<images_dtos::UploadedImageDto>,
        )
    ),
    tags(
        (name = "catalog", description = "Home page catalog grouped by category"),
        (name = "categories", description = "Product categories (public)"),
        (name = "products", description = "Product browsing (public)"),
        (name = "sliders", description = "Hero carousel slides (public)"),
        (name = "districts", description = "Shipping districts (public)"),
        (name = "search", description = "Product and category search"),
        (name = "images", description = "Image optimization redirect"),
        (name = "auth", description = "Caller identity"),
        (name = "admin-categories", description = "Category management (admin only)"),
        (name = "admin-products", description = "Product management (admin only)"),
        (name = "admin-sliders", description = "Slider management (admin only)"),
        (name = "admin-districts", description = "District management (admin only)"),
        (name = "admin-customers", description = "Customer management (admin only)"),
        (name = "admin-users", description = "Back-office accounts (admin only)"),
        (name = "admin-images", description = "Image upload and deletion (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Storefront catalog and back-office API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_storefront_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/catalog/home",
            "/api/sliders",
            "/api/search",
            "/api/images/optimize",
            "/api/admin/products/{id}",
            "/api/admin/users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
