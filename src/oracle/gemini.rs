//! Gemini API 연동
//!
//! 이미지(base64 inline_data) + 프롬프트를 generateContent로 보내고
//! 첫 번째 후보의 텍스트 파트를 이어 붙여 반환한다.

use super::{ImageInput, VisionOracle};
use crate::config::Config;
use crate::error::{ArtAiError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API 요청
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Gemini API 응답
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

pub struct GeminiOracle {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiOracle {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArtAiError::ApiCall(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_api_key()?, config.model.clone(), config.timeout())
    }

    /// API 엔드포인트 변경 (프록시・테스트 서버)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

fn build_request(image: &ImageInput, prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: STANDARD.encode(&image.bytes),
                    },
                },
            ],
        }],
    }
}

/// 응답 JSON에서 텍스트 추출
fn extract_text(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ArtAiError::ApiParse(format!("응답 JSON 해석 실패: {}", e)))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ArtAiError::ApiParse("응답에 텍스트가 없습니다".into()));
    }
    Ok(text)
}

impl VisionOracle for GeminiOracle {
    async fn generate(&self, image: &ImageInput, prompt: &str) -> Result<String> {
        let request = build_request(image, prompt);
        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            image_bytes = image.bytes.len(),
            "Gemini 요청"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ArtAiError::ApiCall(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ArtAiError::ApiCall(e.to_string()))?;

        if !status.is_success() {
            return Err(ArtAiError::ApiCall(format!("API 오류 {}: {}", status, body)));
        }

        let text = extract_text(&body)?;
        tracing::debug!(response_chars = text.chars().count(), "Gemini 응답");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_shape() {
        let image = ImageInput::new(vec![1, 2, 3], "image/png");
        let json = serde_json::to_value(build_request(&image, "프롬프트")).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "프롬프트");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "AQID");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"바로크"},{"text":": 88%"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "바로크: 88%");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let result = extract_text(r#"{"candidates":[]}"#);
        assert!(matches!(result, Err(ArtAiError::ApiParse(_))));

        let result = extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(result, Err(ArtAiError::ApiParse(_))));
    }

    #[test]
    fn test_extract_text_invalid_json() {
        assert!(matches!(extract_text("not json"), Err(ArtAiError::ApiParse(_))));
    }

    #[test]
    fn test_endpoint() {
        let oracle = GeminiOracle::new("key", "gemini-1.5-flash", Duration::from_secs(1))
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(oracle.endpoint(), "http://localhost:8080/gemini-1.5-flash:generateContent");
        assert_eq!(oracle.model(), "gemini-1.5-flash");
    }
}
