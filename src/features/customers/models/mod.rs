mod customer;

pub use customer::{Customer, CustomerWithDistrict};
