//! Oracle 응답 파서
//!
//! - extract_school: 서술형 응답에서 사조 추출 (없으면 미상)
//! - extract_school_with_fallback: 순위 응답에서 사조 추출 (없으면 첫 번째 사조)
//! - extract_confidence: `사조: NN%` 유사도 추출
//! - parse_keyword_blocks: `구성 - 단어1, 단어2 : 설명` 키워드 블록 추출

use crate::lexicon::Lexicon;
use crate::school::{Category, School};
use crate::types::{CategoryKeywords, OracleScore};
use regex::Regex;

/// 텍스트에 이름이 포함된 사조 (어휘사전 순서로 첫 번째)
///
/// 텍스트 안의 위치가 아니라 어휘사전 순서가 우선한다.
///
/// # Examples
/// ```
/// use art_school_common::{extract_school, Lexicon, School};
///
/// let lexicon = Lexicon::builtin();
/// let text = "인상주의 기법과 바로크 조명이 섞여 있다";
/// assert_eq!(extract_school(text, &lexicon), Some(School::Baroque));
/// assert_eq!(extract_school("알 수 없음", &lexicon), None);
/// ```
pub fn extract_school(text: &str, lexicon: &Lexicon) -> Option<School> {
    lexicon.schools().find(|s| text.contains(s.name()))
}

/// `extract_school`과 같지만 찾지 못하면 어휘사전의 첫 번째 사조
///
/// 순위 프롬프트는 목록 중 하나를 반드시 고르게 하므로 미상을 내지 않는다.
pub fn extract_school_with_fallback(text: &str, lexicon: &Lexicon) -> School {
    match extract_school(text, lexicon) {
        Some(school) => school,
        None => {
            let fallback = lexicon.first_school();
            tracing::warn!(fallback = %fallback, "순위 응답에서 사조를 찾지 못해 첫 번째 사조 사용");
            fallback
        }
    }
}

/// `"<사조>: NN%"` 형식의 유사도 추출
///
/// 사조 이름과 정확히 일치해야 하며, 없으면 `OracleScore::BelowThreshold`.
/// 100을 넘는 값은 100으로 자른다.
pub fn extract_confidence(text: &str, school: School) -> OracleScore {
    lazy_static::lazy_static! {
        // School::ALL 순서
        static ref CONFIDENCE_RES: Vec<Regex> = School::ALL
            .iter()
            .map(|s| {
                Regex::new(&format!(r"{}\s*:\s*(\d+)%", regex::escape(s.name()))).unwrap()
            })
            .collect();
    }

    CONFIDENCE_RES[school.index()]
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .map(|p| OracleScore::Percent(p.min(100)))
        .unwrap_or(OracleScore::BelowThreshold)
}

/// 서술형 응답의 카테고리별 키워드 블록 추출
///
/// `구성 - 원근법, 균형 : 설명` 형식의 줄에서 `-`와 `:` 사이를 쉼표로 나눈다.
/// 마크다운 강조와 목록 기호는 무시한다.
pub fn parse_keyword_blocks(text: &str) -> CategoryKeywords {
    lazy_static::lazy_static! {
        static ref EMPHASIS_RE: Regex = Regex::new(r"\*\*+").unwrap();
        static ref BLOCK_RE: Regex =
            Regex::new(r"^[\s\-*•#\d.]*(구성|기법|색감|주제)\s*[-–]\s*(.*?)\s*:").unwrap();
    }

    let mut keywords = CategoryKeywords::default();
    for line in text.lines() {
        let line = EMPHASIS_RE.replace_all(line, "");
        let Some(caps) = BLOCK_RE.captures(&line) else {
            continue;
        };
        let Some(category) = Category::from_label(&caps[1]) else {
            continue;
        };
        for keyword in caps[2].split(',').map(str::trim).filter(|k| !k.is_empty()) {
            keywords.insert(category, keyword);
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_school 테스트
    // =============================================

    #[test]
    fn test_extract_school_every_school() {
        let lexicon = Lexicon::builtin();
        for school in School::ALL {
            let text = format!("이 작품은 {} 양식을 따른다", school.name());
            assert_eq!(extract_school(&text, &lexicon), Some(school));
        }
    }

    #[test]
    fn test_extract_school_prefers_lexicon_order() {
        let lexicon = Lexicon::builtin();
        // 텍스트에서는 인상주의가 먼저 나오지만 어휘사전에서는 로코코가 앞선다
        let text = "인상주의의 빛 표현과 로코코의 색감";
        assert_eq!(extract_school(text, &lexicon), Some(School::Rococo));
    }

    #[test]
    fn test_extract_school_unknown() {
        let lexicon = Lexicon::builtin();
        assert_eq!(extract_school("고딕 양식의 제단화", &lexicon), None);
        assert_eq!(extract_school("", &lexicon), None);
    }

    #[test]
    fn test_extract_school_with_fallback() {
        let lexicon = Lexicon::builtin();
        assert_eq!(extract_school_with_fallback("낭만주의: 88%", &lexicon), School::Romanticism);
        assert_eq!(extract_school_with_fallback("모르겠습니다", &lexicon), School::Renaissance);
    }

    // =============================================
    // extract_confidence 테스트
    // =============================================

    #[test]
    fn test_extract_confidence() {
        assert_eq!(
            extract_confidence("낭만주의: 88%", School::Romanticism),
            OracleScore::Percent(88)
        );
        assert_eq!(
            extract_confidence("결과\n입체파&추상화 :  71%\n", School::CubismAbstraction),
            OracleScore::Percent(71)
        );
    }

    #[test]
    fn test_extract_confidence_anchored_to_school() {
        assert_eq!(
            extract_confidence("바로크: 88%", School::Romanticism),
            OracleScore::BelowThreshold
        );
    }

    #[test]
    fn test_extract_confidence_malformed() {
        assert_eq!(
            extract_confidence("낭만주의 - 아주 높음", School::Romanticism),
            OracleScore::BelowThreshold
        );
        assert_eq!(
            extract_confidence("낭만주의: 88.5%", School::Romanticism),
            OracleScore::BelowThreshold
        );
    }

    #[test]
    fn test_extract_confidence_every_school() {
        for school in School::ALL {
            let text = format!("분석 결과\n{}: 42%", school.name());
            assert_eq!(extract_confidence(&text, school), OracleScore::Percent(42), "{}", school);
        }
    }

    #[test]
    fn test_extract_confidence_clamped() {
        assert_eq!(
            extract_confidence("바로크: 150%", School::Baroque),
            OracleScore::Percent(100)
        );
    }

    // =============================================
    // parse_keyword_blocks 테스트
    // =============================================

    #[test]
    fn test_parse_keyword_blocks() {
        let text = "이 그림은 르네상스 작품입니다.\n\
                    **구성 - 원근법, 균형, 대칭 :** 안정적인 화면\n\
                    기법 - 스푸마토 : 부드러운 윤곽\n\
                    - 색감 – 따뜻한 색조, 명암 대비: 설명\n\
                    주제 - 종교 : 성모자";
        let keywords = parse_keyword_blocks(text);
        assert_eq!(keywords.get(Category::Construction), &["원근법", "균형", "대칭"]);
        assert_eq!(keywords.get(Category::Technique), &["스푸마토"]);
        assert_eq!(keywords.get(Category::Color), &["따뜻한 색조", "명암 대비"]);
        assert_eq!(keywords.get(Category::Theme), &["종교"]);
    }

    #[test]
    fn test_parse_keyword_blocks_none() {
        assert!(parse_keyword_blocks("형식 없는 자유 서술").is_empty());
    }
}
