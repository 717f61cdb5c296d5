use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtAiError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("API 키가 설정되지 않았습니다. `art-ai config --set-api-key YOUR_KEY` 또는 GEMINI_API_KEY 환경 변수로 설정하세요")]
    MissingApiKey,

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("이미지 읽기 오류: {0}")]
    ImageLoad(String),

    #[error("모델 로드 실패: {0}")]
    ModelLoad(String),

    #[error("모델 추론 오류: {0}")]
    Inference(String),

    #[error("API 호출 오류: {0}")]
    ApiCall(String),

    #[error("API 응답 해석 실패: {0}")]
    ApiParse(String),

    #[error("{operation} 시간 초과 ({seconds}초)")]
    Timeout { operation: String, seconds: u64 },

    #[error("이미지가 없습니다: {0}")]
    NoImagesFound(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] art_school_common::Error),
}

pub type Result<T> = std::result::Result<T, ArtAiError>;
