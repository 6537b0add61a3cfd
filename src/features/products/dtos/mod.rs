mod product_dto;

pub use product_dto::{
    AdminProductQuery, CreateProductDto, ProductCategoryDto, ProductListQuery,
    ProductResponseDto, UpdateProductDto,
};
