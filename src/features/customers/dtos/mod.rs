mod customer_dto;

pub use customer_dto::{CreateCustomerDto, CustomerQuery, CustomerResponseDto, UpdateCustomerDto};
