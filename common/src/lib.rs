//! 미술 사조 분석 공통 라이브러리
//!
//! CLI와 통합 테스트가 공유하는 어휘사전・매칭・투표・렌더링 로직.
//! 네트워크와 모델 추론은 포함하지 않는다.

pub mod school;
pub mod lexicon;
pub mod error;
pub mod prompts;
pub mod types;
pub mod morpheme;
pub mod matcher;
pub mod voter;
pub mod parser;
pub mod summary;
pub mod analyzer;

pub use school::{Category, School};
pub use lexicon::{Lexicon, LexiconEntry};
pub use error::{Error, Result};
pub use prompts::{build_describe_prompt, build_rank_prompt};
pub use types::{AnalysisResult, CategoryKeywords, OracleScore, PredictionSignal, SignalSource};
pub use morpheme::{KoreanTokenizer, Tokenizer};
pub use matcher::{match_description, match_sentence, split_sentences, SentenceMatch};
pub use voter::{blend_confidence, blend_score, vote, VoteTally, DEFAULT_ORACLE_PERCENT};
pub use parser::{extract_confidence, extract_school, extract_school_with_fallback, parse_keyword_blocks};
pub use summary::{
    escape_html, group_sentences, highlight_keywords, render_groups_html, render_groups_text,
    render_summary_html, KeywordSummary, SentenceGroup,
};
pub use analyzer::{build_result, decide_school, Decision, RawSignals};
