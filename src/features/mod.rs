pub mod auth;
pub mod catalog;
pub mod categories;
pub mod customers;
pub mod districts;
pub mod images;
pub mod products;
pub mod search;
pub mod sliders;
pub mod users;
