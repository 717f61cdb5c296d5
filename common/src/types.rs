//! 분석 결과 타입 정의
//!
//! - CategoryKeywords: 카테고리별 키워드 묶음 (매칭 결과・Oracle 키워드 공용)
//! - OracleScore: Oracle 순위 응답에서 읽은 유사도
//! - PredictionSignal: 투표에 들어가는 개별 예측
//! - AnalysisResult: 업로드 1건의 최종 출력

use crate::school::{Category, School};
use crate::summary::{KeywordSummary, SentenceGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 카테고리별 키워드 (대표 예술가 제외 4개 카테고리)
///
/// 키워드는 어휘사전 정의 순서를 따르며 중복이 없다.
/// 같은 값이면 같은 근거로 보고 문장 그룹핑 키로 사용한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryKeywords {
    pub construction: Vec<String>,
    pub technique: Vec<String>,
    pub color: Vec<String>,
    pub theme: Vec<String>,
}

impl CategoryKeywords {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Construction => &self.construction,
            Category::Technique => &self.technique,
            Category::Color => &self.color,
            Category::Theme => &self.theme,
            Category::Artists => &[],
        }
    }

    /// 키워드 추가 (이미 있으면 무시, 대표 예술가는 무시)
    pub fn insert(&mut self, category: Category, keyword: &str) {
        let list = match category {
            Category::Construction => &mut self.construction,
            Category::Technique => &mut self.technique,
            Category::Color => &mut self.color,
            Category::Theme => &mut self.theme,
            Category::Artists => return,
        };
        if !list.iter().any(|k| k == keyword) {
            list.push(keyword.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::MATCHED.iter().all(|c| self.get(*c).is_empty())
    }

    /// 전체 키워드 수
    pub fn len(&self) -> usize {
        Category::MATCHED.iter().map(|c| self.get(*c).len()).sum()
    }

    /// (카테고리, 키워드) 순회
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> + '_ {
        Category::MATCHED
            .iter()
            .flat_map(move |&c| self.get(c).iter().map(move |k| (c, k.as_str())))
    }
}

/// Oracle 순위 응답의 유사도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OracleScore {
    /// `사조: NN%` 형식에서 읽은 값
    Percent(u32),
    /// 형식이 맞지 않아 읽지 못함
    BelowThreshold,
}

impl OracleScore {
    pub const BELOW_THRESHOLD_TEXT: &'static str = "유사도 0.5% 이하입니다.";

    pub fn percent(&self) -> Option<u32> {
        match self {
            OracleScore::Percent(p) => Some(*p),
            OracleScore::BelowThreshold => None,
        }
    }
}

impl fmt::Display for OracleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleScore::Percent(p) => write!(f, "{}%", p),
            OracleScore::BelowThreshold => f.write_str(Self::BELOW_THRESHOLD_TEXT),
        }
    }
}

/// 예측 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalSource {
    /// Oracle 서술형 응답에서 추출
    OracleDescription,
    /// Oracle 단일 선택 응답에서 추출
    OracleRanking,
    /// 로컬 다중분류 모델
    LocalClassifier,
}

impl fmt::Display for SignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalSource::OracleDescription => f.write_str("Oracle 설명"),
            SignalSource::OracleRanking => f.write_str("Oracle 순위"),
            SignalSource::LocalClassifier => f.write_str("로컬 분류기"),
        }
    }
}

/// 투표에 들어가는 예측 하나
///
/// `school`이 None이면 서술형 응답에서 사조를 찾지 못한 경우(미상)이며 기권으로 처리한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSignal {
    pub source: SignalSource,
    pub school: Option<School>,
    /// 0〜100 (%), 없으면 None
    pub confidence: Option<f64>,
}

impl PredictionSignal {
    pub fn new(source: SignalSource, school: Option<School>, confidence: Option<f64>) -> Self {
        Self { source, school, confidence }
    }
}

/// 업로드 1건의 최종 분석 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 업로드 파일명
    pub file_name: String,

    /// 최종 사조 (투표 결과)
    pub school: School,

    /// 최종 유사도 (%, 정수)
    pub confidence: u32,

    /// Oracle 서술형 응답 원문
    pub oracle_text: String,

    /// 서술형 응답에서 추출한 사조 (미상이면 None)
    pub oracle_school: Option<School>,

    /// Oracle 순위 응답 원문
    pub ranking_text: String,

    /// 순위 응답에서 추출한 사조
    pub ranking_school: School,

    /// 순위 응답의 유사도
    pub ranking_score: OracleScore,

    /// 로컬 다중분류 모델 예측
    pub classifier_school: School,

    /// 로컬 이진분류 모델 유사도 (%, 소수점 2자리)
    pub classifier_confidence: f64,

    /// 득표 (어휘사전 순서, 득표한 사조만)
    pub votes: Vec<(School, u32)>,

    /// Oracle이 제시한 카테고리별 키워드
    #[serde(default)]
    pub oracle_keywords: CategoryKeywords,

    /// 최종 사조의 어휘 요약
    pub summary: KeywordSummary,

    /// 근거가 같은 문장끼리 묶은 매칭 결과
    #[serde(default)]
    pub sentence_groups: Vec<SentenceGroup>,

    /// 대표 예술가
    #[serde(default)]
    pub artists: Vec<String>,
}

impl AnalysisResult {
    /// `사조: NN%` 형식의 요약 한 줄
    pub fn headline(&self) -> String {
        format!("{}: {}%", self.school.name(), self.confidence)
    }
}
