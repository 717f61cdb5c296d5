//! 하이브리드 분석 파이프라인
//!
//! 1. Oracle 서술형・순위 요청과 로컬 분류(다중분류 → 해당 사조 이진분류)를 동시에 실행
//! 2. 세 예측을 투표해 최종 사조 결정
//! 3. Oracle 유사도와 로컬 이진분류 유사도를 평균
//! 4. 설명문을 어휘사전과 매칭해 결과 조립
//!
//! 로컬 분류는 Oracle 응답을 기다리지 않는다.
//!
//! 하나라도 실패하면 요청 전체가 실패한다. 재시도는 하지 않는다.

pub mod cache;

pub use cache::CacheFile;

use crate::classifier::{decode_image, preprocess, ImageTensor, LocalClassifier};
use crate::config::Config;
use crate::error::{ArtAiError, Result};
use crate::oracle::{describe, rank_single, with_timeout, ImageInput, VisionOracle};
use art_school_common::{
    build_result, decide_school, AnalysisResult, KoreanTokenizer, Lexicon, RawSignals,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Oracle 원문 응답 두 개
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponses {
    pub description: String,
    pub ranking: String,
}

/// 파이프라인 설정
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// 외부 호출 하나당 제한 시간
    pub timeout: Duration,
    /// 모델 입력 해상도
    pub image_size: u32,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        let config = Config::default();
        Self::from(&config)
    }
}

impl From<&Config> for AnalyzerOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.timeout(),
            image_size: config.image_size,
        }
    }
}

/// 분석 1건의 결과와 Oracle 원문
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub responses: OracleResponses,
    /// 캐시에서 가져온 응답이면 true
    pub from_cache: bool,
}

/// 분석기
///
/// 어휘사전과 모델은 생성 시 주입되고 이후 읽기만 한다.
pub struct Analyzer<O: VisionOracle> {
    oracle: O,
    classifier: Arc<LocalClassifier>,
    lexicon: Arc<Lexicon>,
    tokenizer: KoreanTokenizer,
    options: AnalyzerOptions,
}

impl<O: VisionOracle> Analyzer<O> {
    pub fn new(oracle: O, classifier: LocalClassifier, lexicon: Lexicon, options: AnalyzerOptions) -> Self {
        Self {
            oracle,
            classifier: Arc::new(classifier),
            lexicon: Arc::new(lexicon),
            tokenizer: KoreanTokenizer::new(),
            options,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Oracle 두 요청을 동시에 실행
    pub async fn fetch_responses(&self, image: &ImageInput) -> Result<OracleResponses> {
        let timeout = self.options.timeout;
        let (description, ranking) = tokio::join!(
            describe(&self.oracle, image, timeout),
            rank_single(&self.oracle, image, timeout),
        );
        Ok(OracleResponses {
            description: description?,
            ranking: ranking?,
        })
    }

    /// 이미지 한 장 분석
    ///
    /// `cached`가 있으면 Oracle 호출을 건너뛴다.
    pub async fn analyze(
        &self,
        file_name: &str,
        image: &ImageInput,
        cached: Option<OracleResponses>,
    ) -> Result<Analysis> {
        let decoded = decode_image(&image.bytes)?;
        let tensor = Arc::new(preprocess(&decoded, self.options.image_size));
        drop(decoded);

        let from_cache = cached.is_some();
        let oracle_future = async {
            match cached {
                Some(responses) => Ok(responses),
                None => self.fetch_responses(image).await,
            }
        };
        let classify_future = self.run_classifier("로컬 분류", tensor, |c, t| {
            let school = c.classify_school(t)?;
            let score = c.score_school(t, school)?;
            Ok((school, score))
        });

        let (responses, local) = tokio::join!(oracle_future, classify_future);
        let responses = responses?;
        let (classifier_school, classifier_confidence) = local?;

        let raw = RawSignals {
            description: responses.description.clone(),
            ranking: responses.ranking.clone(),
            classifier_school,
        };
        let decision = decide_school(&raw, &self.lexicon);

        let result = build_result(
            file_name,
            &raw,
            decision,
            classifier_confidence,
            &self.lexicon,
            &self.tokenizer,
        );
        tracing::info!(
            file = file_name,
            school = %result.school,
            confidence = result.confidence,
            from_cache,
            "분석 완료"
        );

        Ok(Analysis {
            result,
            responses,
            from_cache,
        })
    }

    /// 파일 분석 (캐시가 있으면 조회하고, 새로 받은 응답은 캐시에 추가)
    pub async fn analyze_path(&self, path: &Path, cache: Option<&mut CacheFile>) -> Result<Analysis> {
        let image = ImageInput::from_path(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(cache) = cache else {
            return self.analyze(&file_name, &image, None).await;
        };

        let hash = cache::compute_bytes_hash(&image.bytes);
        let cached = cache.entry(&hash).map(|entry| {
            tracing::debug!(
                file = %file_name,
                cached_file = %entry.file_name,
                cached_at = %entry.cached_at,
                "캐시 적중"
            );
            entry.responses.clone()
        });

        let analysis = self.analyze(&file_name, &image, cached).await?;
        if !analysis.from_cache {
            cache.insert(hash, file_name, image.bytes.len() as u64, analysis.responses.clone());
        }
        Ok(analysis)
    }

    /// 분류 모델을 블로킹 스레드에서 제한 시간 안에 실행
    async fn run_classifier<T, F>(&self, operation: &str, tensor: Arc<ImageTensor>, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&LocalClassifier, &ImageTensor) -> Result<T> + Send + 'static,
    {
        let classifier = self.classifier.clone();
        let task = tokio::task::spawn_blocking(move || f(&classifier, &tensor));
        with_timeout(operation, self.options.timeout, async {
            task.await
                .map_err(|e| ArtAiError::Inference(format!("{} 작업 실패: {}", operation, e)))?
        })
        .await
    }
}
