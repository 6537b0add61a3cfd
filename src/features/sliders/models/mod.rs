mod slider;

pub use slider::Slider;
