use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::sliders::carousel::CarouselController;
use crate::features::sliders::models::Slider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SliderResponseDto {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub display_order: i32,
}

impl From<Slider> for SliderResponseDto {
    fn from(s: Slider) -> Self {
        Self {
            id: s.id,
            title: s.title,
            subtitle: s.subtitle,
            image_url: s.image_url,
            link_url: s.link_url,
            button_text: s.button_text,
            display_order: s.display_order,
        }
    }
}

/// Initial carousel state for a freshly mounted slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarouselStateDto {
    pub index: usize,
    pub count: usize,
    pub autoplay_interval_secs: u64,
    /// Previous/next buttons should be disabled when false
    pub controls_enabled: bool,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SliderListResponseDto {
    pub slides: Vec<SliderResponseDto>,
    pub carousel: CarouselStateDto,
}

impl SliderListResponseDto {
    pub fn new(slides: Vec<SliderResponseDto>, autoplay_interval: Duration) -> Self {
        let controller = CarouselController::new(slides);
        let view = controller.view();
        Self {
            carousel: CarouselStateDto {
                index: view.index,
                count: view.count,
                autoplay_interval_secs: autoplay_interval.as_secs(),
                controls_enabled: view.controls_enabled,
                autoplay: view.controls_enabled,
            },
            slides: controller.slides().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSliderDto {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Slider> for AdminSliderDto {
    fn from(s: Slider) -> Self {
        Self {
            id: s.id,
            title: s.title,
            subtitle: s.subtitle,
            image_url: s.image_url,
            link_url: s.link_url,
            button_text: s.button_text,
            display_order: s.display_order,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSliderDto {
    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[validate(length(max = 300))]
    pub subtitle: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,

    #[validate(url(message = "link_url must be a valid URL"))]
    pub link_url: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub button_text: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSliderDto {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,

    #[validate(length(max = 300))]
    pub subtitle: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "link_url must be a valid URL"))]
    pub link_url: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub button_text: Option<String>,

    #[validate(range(min = 0))]
    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(order: i32) -> SliderResponseDto {
        SliderResponseDto {
            id: Uuid::new_v4(),
            title: format!("Slide {}", order),
            subtitle: None,
            image_url: "https://cdn.shop.test/hero.jpg".to_string(),
            link_url: None,
            button_text: None,
            display_order: order,
        }
    }

    #[test]
    fn test_list_response_carousel_state() {
        let interval = Duration::from_secs(5);

        let many = SliderListResponseDto::new(vec![slide(0), slide(1), slide(2)], interval);
        assert_eq!(many.slides.len(), 3);
        assert_eq!(
            many.carousel,
            CarouselStateDto {
                index: 0,
                count: 3,
                autoplay_interval_secs: 5,
                controls_enabled: true,
                autoplay: true,
            }
        );

        let single = SliderListResponseDto::new(vec![slide(0)], interval);
        assert!(!single.carousel.controls_enabled);
        assert!(!single.carousel.autoplay);

        let empty = SliderListResponseDto::new(Vec::new(), interval);
        assert_eq!(empty.carousel.count, 0);
    }

    #[test]
    fn test_create_validation() {
        let dto: CreateSliderDto = serde_json::from_value(serde_json::json!({
            "title": "Summer Sale",
            "image_url": "https://cdn.shop.test/summer.jpg",
            "link_url": "https://shop.test/sale"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.is_active);

        let dto: CreateSliderDto = serde_json::from_value(serde_json::json!({
            "title": "",
            "image_url": "not a url",
            "display_order": -1
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("image_url"));
        assert!(fields.contains_key("display_order"));
    }
}
