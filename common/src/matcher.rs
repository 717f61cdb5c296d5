//! 어휘사전 매칭
//!
//! Oracle 설명문을 문장 단위로 나누고, 문장마다 최종 사조의 어휘사전 키워드가
//! 등장하는지 판정한다.
//!
//! 키워드 판정 (둘 중 하나라도 만족하면 매칭):
//! 1. 키워드 형태소 중 문장 형태소에 있는 비율이 0.8 이상
//! 2. 키워드가 문장에 그대로 포함됨 (비율과 무관하게 항상 우선)

use crate::lexicon::LexiconEntry;
use crate::morpheme::Tokenizer;
use crate::school::Category;
use crate::types::CategoryKeywords;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 형태소 겹침 비율 임계값
pub const MATCH_RATIO_THRESHOLD: f64 = 0.8;

/// 한 문장의 매칭 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub sentence: String,
    pub keywords: CategoryKeywords,
}

/// 키워드 형태소가 문장 형태소에 포함된 비율
///
/// 키워드 형태소가 비어 있으면 0.0
pub fn overlap_ratio(keyword_morphs: &[String], sentence_morphs: &[String]) -> f64 {
    if keyword_morphs.is_empty() {
        return 0.0;
    }
    let found = keyword_morphs
        .iter()
        .filter(|m| sentence_morphs.contains(m))
        .count();
    found as f64 / keyword_morphs.len() as f64
}

/// 키워드 하나의 매칭 판정
pub fn keyword_matches(
    sentence: &str,
    sentence_morphs: &[String],
    keyword: &str,
    tokenizer: &dyn Tokenizer,
) -> bool {
    if sentence.contains(keyword) {
        return true;
    }
    let keyword_morphs = tokenizer.morphs(keyword);
    overlap_ratio(&keyword_morphs, sentence_morphs) >= MATCH_RATIO_THRESHOLD
}

/// 한 문장을 사조 어휘사전과 매칭
///
/// 대표 예술가 카테고리는 매칭하지 않는다.
pub fn match_sentence(
    sentence: &str,
    entry: &LexiconEntry,
    tokenizer: &dyn Tokenizer,
) -> CategoryKeywords {
    let sentence_morphs = tokenizer.morphs(sentence);
    let mut matched = CategoryKeywords::default();

    for category in Category::MATCHED {
        for keyword in entry.keywords(category) {
            if keyword_matches(sentence, &sentence_morphs, keyword, tokenizer) {
                matched.insert(category, keyword);
            }
        }
    }

    matched
}

/// 설명문을 문장으로 분리
///
/// 마크다운 강조(`**`)를 지우고 `.` `?` `!` 와 줄바꿈에서 자른다.
pub fn split_sentences(description: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref EMPHASIS_RE: Regex = Regex::new(r"\*\*+").unwrap();
        static ref SENTENCE_END_RE: Regex = Regex::new(r"[.?!\n]+\s*").unwrap();
    }

    let cleaned = EMPHASIS_RE.replace_all(description.trim(), "");
    SENTENCE_END_RE
        .split(&cleaned)
        .map(|s| s.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// 설명문 전체를 매칭
///
/// 키워드가 하나라도 매칭된 문장만, 처음 등장한 순서대로 반환한다.
/// 완전히 같은 문장은 한 번만 나온다.
pub fn match_description(
    description: &str,
    entry: &LexiconEntry,
    tokenizer: &dyn Tokenizer,
) -> Vec<SentenceMatch> {
    let mut results: Vec<SentenceMatch> = Vec::new();

    for sentence in split_sentences(description) {
        if results.iter().any(|r| r.sentence == sentence) {
            continue;
        }
        let keywords = match_sentence(&sentence, entry, tokenizer);
        if keywords.is_empty() {
            continue;
        }
        tracing::debug!(sentence = %sentence, matched = keywords.len(), "문장 매칭");
        results.push(SentenceMatch { sentence, keywords });
    }

    results
}
