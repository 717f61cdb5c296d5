//! 결과 조립 로직 (CLI/테스트 공통)
//!
//! 두 단계로 나뉜다.
//! 1. decide_school: 세 예측을 추출해 투표
//! 2. build_result: 유사도 혼합 + 설명문 매칭 + 요약 생성
//!
//! 모델 호출과 Oracle 호출은 여기서 하지 않는다. 순수 함수만 둔다.

use crate::lexicon::Lexicon;
use crate::matcher::match_description;
use crate::morpheme::Tokenizer;
use crate::parser::{extract_confidence, extract_school, extract_school_with_fallback, parse_keyword_blocks};
use crate::school::{Category, School};
use crate::summary::{group_sentences, KeywordSummary};
use crate::types::{AnalysisResult, OracleScore, PredictionSignal, SignalSource};
use crate::voter::{blend_score, vote, VoteTally};

/// 외부 호출에서 받은 원시 예측
#[derive(Debug, Clone)]
pub struct RawSignals {
    /// Oracle 서술형 응답
    pub description: String,
    /// Oracle 단일 선택 응답
    pub ranking: String,
    /// 로컬 다중분류 모델 예측
    pub classifier_school: School,
}

/// 투표 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub oracle_school: Option<School>,
    pub ranking_school: School,
    pub ranking_score: OracleScore,
    pub classifier_school: School,
    pub votes: Vec<(School, u32)>,
    /// 최종 사조
    pub school: School,
}

impl Decision {
    /// 투표에 들어간 세 예측
    pub fn signals(&self) -> [PredictionSignal; 3] {
        [
            PredictionSignal::new(SignalSource::OracleDescription, self.oracle_school, None),
            PredictionSignal::new(
                SignalSource::OracleRanking,
                Some(self.ranking_school),
                self.ranking_score.percent().map(f64::from),
            ),
            PredictionSignal::new(SignalSource::LocalClassifier, Some(self.classifier_school), None),
        ]
    }
}

/// 세 예측을 추출해 최종 사조 결정
///
/// 순위 응답은 항상 사조를 내므로 투표가 비는 일은 없지만,
/// 만약 비면 순위 사조를 쓴다.
pub fn decide_school(raw: &RawSignals, lexicon: &Lexicon) -> Decision {
    let oracle_school = extract_school(&raw.description, lexicon);
    let ranking_school = extract_school_with_fallback(&raw.ranking, lexicon);
    let ranking_score = extract_confidence(&raw.ranking, ranking_school);

    let mut decision = Decision {
        oracle_school,
        ranking_school,
        ranking_score,
        classifier_school: raw.classifier_school,
        votes: Vec::new(),
        school: ranking_school,
    };

    let signals = decision.signals();
    decision.votes = VoteTally::from_signals(&signals).entries();
    decision.school = vote(&signals).unwrap_or(ranking_school);

    tracing::debug!(
        oracle = ?decision.oracle_school,
        ranking = %decision.ranking_school,
        classifier = %decision.classifier_school,
        winner = %decision.school,
        "최종 사조 결정"
    );

    decision
}

/// 최종 결과 조립
///
/// `classifier_confidence`는 다중분류가 고른 사조(`classifier_school`)의 이진분류 유사도(%)다.
pub fn build_result(
    file_name: &str,
    raw: &RawSignals,
    decision: Decision,
    classifier_confidence: f64,
    lexicon: &Lexicon,
    tokenizer: &dyn Tokenizer,
) -> AnalysisResult {
    let confidence = blend_score(&decision.ranking_score, classifier_confidence);
    let entry = lexicon.entry(decision.school);

    let matches = match_description(&raw.description, entry, tokenizer);
    let sentence_groups = group_sentences(&matches);

    AnalysisResult {
        file_name: file_name.to_string(),
        school: decision.school,
        confidence,
        oracle_text: raw.description.clone(),
        oracle_school: decision.oracle_school,
        ranking_text: raw.ranking.clone(),
        ranking_school: decision.ranking_school,
        ranking_score: decision.ranking_score,
        classifier_school: decision.classifier_school,
        classifier_confidence,
        votes: decision.votes,
        oracle_keywords: parse_keyword_blocks(&raw.description),
        summary: KeywordSummary::from_entry(entry),
        sentence_groups,
        artists: entry.keywords(Category::Artists).to_vec(),
    }
}
