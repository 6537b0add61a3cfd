mod admin_slider_handler;
mod slider_handler;

pub use admin_slider_handler::*;
pub use slider_handler::*;
