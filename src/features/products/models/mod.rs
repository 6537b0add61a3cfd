mod product;

pub use product::{Product, ProductWithCategory};
