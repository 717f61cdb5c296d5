//! ONNX Runtime 모델

use super::{ImageTensor, ProbabilityModel};
use crate::error::{ArtAiError, Result};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// ONNX 세션 하나 (입력 1개, 출력 1개)
pub struct OnnxModel {
    name: String,
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |e: ort::Error| ArtAiError::ModelLoad(format!("{}: {}", path.display(), e));

        let session = Session::builder()
            .and_then(|b| b.with_log_level(LogLevel::Error))
            .and_then(|b| b.commit_from_file(path))
            .map_err(load_error)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| ArtAiError::ModelLoad(format!("{}: 입력이 없습니다", path.display())))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ArtAiError::ModelLoad(format!("{}: 출력이 없습니다", path.display())))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        tracing::debug!(model = %name, input = %input_name, output = %output_name, "ONNX 모델 로드");

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl ProbabilityModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>> {
        let dims: Vec<i64> = input.shape.iter().map(|&d| d as i64).collect();
        let tensor = TensorRef::from_array_view((dims, input.data.as_slice()))
            .map_err(|e| ArtAiError::Inference(format!("{}: 입력 텐서 생성 실패: {}", self.name, e)))?;

        let inputs = ort::inputs![self.input_name.as_str() => tensor];

        let mut session = self
            .session
            .lock()
            .map_err(|_| ArtAiError::Inference(format!("{}: 세션 잠금 실패", self.name)))?;

        let outputs = session
            .run(inputs)
            .map_err(|e| ArtAiError::Inference(format!("{}: {}", self.name, e)))?;

        let (_, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| ArtAiError::Inference(format!("{}: 출력 추출 실패: {}", self.name, e)))?;

        Ok(data.to_vec())
    }
}
