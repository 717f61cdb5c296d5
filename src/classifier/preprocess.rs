//! 모델 입력 전처리
//!
//! 정사각형으로 리사이즈(최근접 보간) 후 RGB 픽셀을 [0, 1]로 나눈
//! NHWC 텐서 `[1, size, size, 3]`를 만든다.

use super::ImageTensor;
use crate::error::{ArtAiError, Result};
use image::imageops::FilterType;
use image::DynamicImage;

/// 메모리의 이미지 바이트 읽기
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| ArtAiError::ImageLoad(e.to_string()))
}

pub fn preprocess(image: &DynamicImage, size: u32) -> ImageTensor {
    let resized = image.resize_exact(size, size, FilterType::Nearest).to_rgb8();

    let data: Vec<f32> = resized
        .pixels()
        .flat_map(|p| p.0)
        .map(|v| v as f32 / 255.0)
        .collect();

    ImageTensor {
        shape: [1, size as usize, size as usize, 3],
        data,
    }
}
