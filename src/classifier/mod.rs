//! 로컬 분류기 어댑터
//!
//! - 다중분류 모델 1개: 9개 사조 확률 벡터 → 최대값 사조
//! - 사조별 이진분류 모델: 단일 확률 → 백분율 (소수점 2자리)
//!
//! 모델은 시작 시 한 번 로드하고 이후 읽기만 한다.
//! 다중분류 모델이 없으면 실행할 수 없지만, 이진분류 모델이 없는 사조는 유사도 0으로 처리한다.

mod preprocess;
#[cfg(feature = "onnx")]
mod onnx;

pub use preprocess::{decode_image, preprocess};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;

use crate::error::{ArtAiError, Result};
use art_school_common::School;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 다중분류 모델 파일명
pub const MULTICLASS_MODEL_FILE: &str = "art_classification_model.onnx";

/// 사조별 이진분류 모델 파일명
pub fn binary_model_file(school: School) -> String {
    format!("{}_이진분류.onnx", school.name())
}

/// NHWC f32 텐서
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

/// 확률을 출력하는 모델
pub trait ProbabilityModel: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>>;
}

/// 다중분류 + 이진분류 묶음
pub struct LocalClassifier {
    multiclass: Box<dyn ProbabilityModel>,
    binary: HashMap<School, Box<dyn ProbabilityModel>>,
}

impl LocalClassifier {
    pub fn new(multiclass: Box<dyn ProbabilityModel>) -> Self {
        Self {
            multiclass,
            binary: HashMap::new(),
        }
    }

    pub fn with_binary(mut self, school: School, model: Box<dyn ProbabilityModel>) -> Self {
        self.binary.insert(school, model);
        self
    }

    pub fn has_binary(&self, school: School) -> bool {
        self.binary.contains_key(&school)
    }

    /// 이진분류 모델이 등록된 사조 (사조 순서)
    pub fn binary_schools(&self) -> Vec<School> {
        School::ALL.iter().copied().filter(|s| self.has_binary(*s)).collect()
    }

    /// 모델 폴더에서 로드
    ///
    /// `art_classification_model.onnx`는 필수, `{사조}_이진분류.onnx`는 있는 것만.
    #[cfg(feature = "onnx")]
    pub fn load(models_dir: &Path) -> Result<Self> {
        let multiclass_path = models_dir.join(MULTICLASS_MODEL_FILE);
        if !multiclass_path.exists() {
            return Err(ArtAiError::ModelLoad(format!(
                "다중분류 모델이 없습니다: {}",
                multiclass_path.display()
            )));
        }

        let mut classifier = Self::new(Box::new(OnnxModel::load(&multiclass_path)?));

        for (school, path) in binary_model_paths(models_dir) {
            if !path.exists() {
                tracing::warn!(school = %school, path = %path.display(), "이진분류 모델 없음 (유사도 0으로 처리)");
                continue;
            }
            classifier = classifier.with_binary(school, Box::new(OnnxModel::load(&path)?));
        }

        tracing::info!(
            binary = classifier.binary.len(),
            dir = %models_dir.display(),
            "분류 모델 로드 완료"
        );
        Ok(classifier)
    }

    #[cfg(not(feature = "onnx"))]
    pub fn load(models_dir: &Path) -> Result<Self> {
        Err(ArtAiError::ModelLoad(format!(
            "onnx 기능 없이 빌드되어 모델을 읽을 수 없습니다: {}",
            models_dir.display()
        )))
    }

    /// 다중분류 결과 사조 (확률 최대, 동점이면 앞선 사조)
    pub fn classify_school(&self, input: &ImageTensor) -> Result<School> {
        let probs = self.multiclass.predict(input)?;
        let school = argmax_school(&probs).ok_or_else(|| {
            ArtAiError::Inference(format!(
                "{}: 출력 길이가 {}개여야 하지만 {}개입니다",
                self.multiclass.name(),
                School::ALL.len(),
                probs.len()
            ))
        })?;
        tracing::debug!(school = %school, "다중분류 예측");
        Ok(school)
    }

    /// 사조 이진분류 유사도 (%, 소수점 2자리). 모델이 없으면 0.
    pub fn score_school(&self, input: &ImageTensor, school: School) -> Result<f64> {
        let Some(model) = self.binary.get(&school) else {
            tracing::debug!(school = %school, "이진분류 모델 없음");
            return Ok(0.0);
        };

        let probs = model.predict(input)?;
        let p = probs.first().copied().ok_or_else(|| {
            ArtAiError::Inference(format!("{}: 출력이 비어 있습니다", model.name()))
        })?;

        let score = to_percentage(p);
        tracing::debug!(school = %school, score, "이진분류 유사도");
        Ok(score)
    }
}

/// 사조별 이진분류 모델 경로
pub fn binary_model_paths(models_dir: &Path) -> Vec<(School, PathBuf)> {
    School::ALL
        .iter()
        .map(|&s| (s, models_dir.join(binary_model_file(s))))
        .collect()
}

/// 확률 벡터의 최대값 사조
///
/// 길이가 사조 수와 다르면 None. 동점이면 앞선 사조, NaN은 건너뛴다.
pub fn argmax_school(probs: &[f32]) -> Option<School> {
    if probs.len() != School::ALL.len() {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((i, p)),
        }
    }

    best.and_then(|(i, _)| School::from_index(i))
}

/// 확률 → 백분율 (소수점 2자리 반올림)
pub fn to_percentage(p: f32) -> f64 {
    (p as f64 * 100.0 * 100.0).round() / 100.0
}
