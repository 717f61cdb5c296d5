//! 형태소 분리
//!
//! 키워드와 문장을 같은 규칙으로 잘라 겹치는 비율을 계산하기 위한 토크나이저.
//! 어절(공백・문장부호 단위)을 나눈 뒤 끝의 조사와 `-적`/`-적인` 접미사를 떼어
//! 어간과 함께 형태소로 내보낸다.

/// 형태소 분리기
///
/// 같은 입력에 대해 항상 같은 결과를 내야 한다.
pub trait Tokenizer: Send + Sync {
    fn morphs(&self, text: &str) -> Vec<String>;
}

/// 규칙 기반 한국어 토크나이저
#[derive(Debug, Clone, Copy, Default)]
pub struct KoreanTokenizer;

/// 조사 (긴 것부터 검사)
const PARTICLES: &[&str] = &[
    "에서는", "으로는", "에게서", "이라는", "에서", "으로", "에게", "부터", "까지", "처럼", "보다",
    "라는", "과", "와", "은", "는", "이", "가", "을", "를", "의", "에", "로", "도", "만",
];

/// 한 글자 조사를 떼려면 남는 어간이 이 글자 수 이상이어야 한다
const MIN_STEM_CHARS: usize = 2;

impl KoreanTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn split_eojeol(word: &str, out: &mut Vec<String>) {
        if !word.chars().any(is_hangul) {
            out.push(word.to_lowercase());
            return;
        }

        let (stem, particle) = strip_particle(word);
        split_derivation(stem, out);
        if let Some(p) = particle {
            out.push(p.to_string());
        }
    }
}

impl Tokenizer for KoreanTokenizer {
    fn morphs(&self, text: &str) -> Vec<String> {
        let mut morphs = Vec::new();
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            Self::split_eojeol(word, &mut morphs);
        }
        morphs
    }
}

fn is_hangul(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// 어절 끝의 조사 분리
fn strip_particle(word: &str) -> (&str, Option<&'static str>) {
    for &particle in PARTICLES {
        if let Some(stem) = word.strip_suffix(particle) {
            let min_stem = if char_len(particle) == 1 { MIN_STEM_CHARS } else { 1 };
            if char_len(stem) >= min_stem {
                return (stem, Some(particle));
            }
        }
    }
    (word, None)
}

/// `-적인` / `-적` 접미사 분리 (예: 사실적인 → 사실 + 적 + 인)
fn split_derivation(stem: &str, out: &mut Vec<String>) {
    if let Some(base) = stem.strip_suffix("적인") {
        if char_len(base) >= MIN_STEM_CHARS {
            out.push(base.to_string());
            out.push("적".to_string());
            out.push("인".to_string());
            return;
        }
    }
    if let Some(base) = stem.strip_suffix('적') {
        if char_len(base) >= MIN_STEM_CHARS {
            out.push(base.to_string());
            out.push("적".to_string());
            return;
        }
    }
    out.push(stem.to_string());
}
