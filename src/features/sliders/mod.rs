// The server only reads the initial view; navigation and the timer run in the mounted carousel.
#[allow(dead_code)]
pub mod carousel;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SliderService;
