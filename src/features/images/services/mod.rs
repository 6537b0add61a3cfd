mod image_service;
mod optimizer;

pub use image_service::ImageService;
pub use optimizer::ImageOptimizer;
