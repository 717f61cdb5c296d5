use crate::error::{ArtAiError, Result};
use art_school_common::Lexicon;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 환경 변수 이름 (설정 파일의 키보다 우선)
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
    /// 분류 모델 폴더 (다중분류 + 사조별 이진분류)
    pub models_dir: PathBuf,
    /// 업로드 이미지 저장 폴더
    pub uploads_dir: PathBuf,
    /// 모델 입력 해상도 (정사각형 한 변)
    pub image_size: u32,
    /// 어휘사전 JSON (없으면 내장 어휘사전)
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".into(),
            timeout_seconds: 120,
            models_dir: PathBuf::from("models"),
            uploads_dir: PathBuf::from("uploads"),
            image_size: 224,
            lexicon_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "설정 파일 로드");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ArtAiError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("art-school-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 환경 변수 우선
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ArtAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 설정된 어휘사전 (경로가 없으면 내장)
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ArtAiError::FileNotFound(path.display().to_string()));
                }
                Ok(Lexicon::from_file(path)?)
            }
            None => Ok(Lexicon::builtin()),
        }
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}
