mod district_dto;

pub use district_dto::{AdminDistrictDto, CreateDistrictDto, DistrictResponseDto, UpdateDistrictDto};
