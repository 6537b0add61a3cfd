mod slider_dto;

pub use slider_dto::{
    AdminSliderDto, CarouselStateDto, CreateSliderDto, SliderListResponseDto, SliderResponseDto,
    UpdateSliderDto,
};
