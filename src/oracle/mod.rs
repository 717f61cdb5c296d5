//! Vision Oracle 어댑터
//!
//! 이미지 + 프롬프트를 보내 자유 텍스트를 받는 생성형 비전 모델 경계.
//! - describe: 카테고리별 키워드와 설명 (서술형)
//! - rank_single: 사조 하나와 `사조: NN%` (단일 선택형)
//!
//! 두 호출 모두 호출 측이 정한 시간 안에 끝나지 않으면 `Timeout`으로 실패한다.

mod gemini;

pub use gemini::GeminiOracle;

use crate::error::{ArtAiError, Result};
use art_school_common::{build_describe_prompt, build_rank_prompt};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Oracle에 보내는 이미지
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// 파일에서 읽기 (MIME 타입은 확장자로 판단)
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ArtAiError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::new(bytes, mime_type_for(path)))
    }
}

/// 확장자에서 MIME 타입 추정 (알 수 없으면 image/jpeg)
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

/// 생성형 비전 모델
pub trait VisionOracle: Send + Sync {
    /// 이미지와 프롬프트로 텍스트 생성
    fn generate(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// 서술형 분석 요청
pub async fn describe<O: VisionOracle>(
    oracle: &O,
    image: &ImageInput,
    timeout: Duration,
) -> Result<String> {
    let prompt = build_describe_prompt();
    with_timeout("Oracle 서술형 분석", timeout, oracle.generate(image, &prompt)).await
}

/// 단일 선택형 순위 요청
pub async fn rank_single<O: VisionOracle>(
    oracle: &O,
    image: &ImageInput,
    timeout: Duration,
) -> Result<String> {
    let prompt = build_rank_prompt();
    with_timeout("Oracle 순위 분석", timeout, oracle.generate(image, &prompt)).await
}

/// 외부 호출에 제한 시간 적용
pub async fn with_timeout<T, F>(operation: &str, timeout: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = std::time::Instant::now();
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => {
            tracing::debug!(operation, elapsed_ms = started.elapsed().as_millis() as u64, "외부 호출 완료");
            result
        }
        Err(_) => Err(ArtAiError::Timeout {
            operation: operation.to_string(),
            seconds: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoOracle;

    impl VisionOracle for EchoOracle {
        async fn generate(&self, image: &ImageInput, prompt: &str) -> Result<String> {
            Ok(format!("{} {}", image.mime_type, prompt.lines().count()))
        }
    }

    struct SlowOracle;

    impl VisionOracle for SlowOracle {
        async fn generate(&self, _image: &ImageInput, _prompt: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(String::new())
        }
    }

    fn image() -> ImageInput {
        ImageInput::new(vec![0u8; 4], "image/png")
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = ImageInput::from_path(Path::new("/nonexistent/art.jpg"));
        assert!(matches!(result, Err(ArtAiError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_describe_and_rank_use_different_prompts() {
        let d = describe(&EchoOracle, &image(), Duration::from_secs(1)).await.unwrap();
        let r = rank_single(&EchoOracle, &image(), Duration::from_secs(1)).await.unwrap();
        assert!(d.starts_with("image/png"));
        assert_ne!(d, r);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_error() {
        let result = describe(&SlowOracle, &image(), Duration::from_millis(100)).await;
        assert!(matches!(result, Err(ArtAiError::Timeout { .. })));
    }
}
