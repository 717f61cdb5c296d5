//! 프롬프트 생성 모듈
//!
//! Oracle(생성형 비전 모델)에 보내는 두 가지 고정 프롬프트:
//! - build_describe_prompt: 카테고리별 키워드+설명 (서술형)
//! - build_rank_prompt: 사조 하나만 골라 유사도 보고 (단일 선택형)

use crate::school::{Category, School};

/// 서술형 분석 프롬프트
///
/// 응답은 `구성 - 단어1, 단어2 : 설명` 형식의 4줄을 기대한다.
pub fn build_describe_prompt() -> String {
    let format_lines = Category::MATCHED
        .iter()
        .map(|c| format!("{} - 핵심 단어1, 단어2 : 설명", c.label()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"이 그림은 어떤 미술 사조에 속하는지 분석하고 다음 형식으로 정리해줘.
각 항목마다 핵심 단어(키워드)를 먼저 제시하고, 이어서 해당 설명을 작성해줘.
형식:
{format_lines}"#
    )
}

/// 단일 선택형 순위 프롬프트
///
/// 응답은 `사조: NN%` 한 줄을 기대한다.
pub fn build_rank_prompt() -> String {
    let school_list = School::ALL
        .iter()
        .map(|s| format!("- {}", s.name()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"다음 중 이 그림에 가장 가까운 하나의 미술 사조를 아래 목록에서 선택하고, 형식에 맞춰 유사도를 출력하세요.
아래 목록 중 **하나만** 선택하세요:

{school_list}

형식 예시 (학파와 확률만 보여주세요):
{example}: 92%"#,
        example = School::FALLBACK.name()
    )
}
