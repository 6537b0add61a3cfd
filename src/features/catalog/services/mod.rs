mod aggregator;
mod catalog_store;

pub use aggregator::{CatalogAggregator, CategoryGroup, GroupAccumulator};
pub use catalog_store::{CatalogStore, PgCatalogStore};
