mod admin_user_handler;

pub use admin_user_handler::*;
