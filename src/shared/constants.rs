/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Back-office administrator - full access to the admin API
pub const ROLE_ADMIN: &str = "admin";

/// Back-office staff account (recorded on admin users, no admin API access)
pub const ROLE_STAFF: &str = "staff";

// =============================================================================
// CATALOG
// =============================================================================

/// Maximum number of products shown under each category on the home page
pub const MAX_PRODUCTS_PER_CATEGORY: usize = 4;

/// Maximum number of images attached to one product
pub const MAX_PRODUCT_IMAGES: u64 = 10;
