//! 요약 렌더링
//!
//! 매칭 결과를 사람이 읽는 형태로 정리한다.
//! - KeywordSummary: 카테고리별 키워드 한 줄 요약 (비어 있으면 자리표시)
//! - SentenceGroup: 매칭 근거가 같은 문장 묶음 + 4칸 표
//! - highlight_keywords: 문장 안 키워드를 카테고리 색으로 강조
//!
//! 출력은 HTML 조각 또는 일반 텍스트이며, 페이지 조립은 호출 측의 몫이다.

use crate::lexicon::LexiconEntry;
use crate::matcher::SentenceMatch;
use crate::school::Category;
use crate::types::CategoryKeywords;
use serde::{Deserialize, Serialize};

/// 키워드 구분자
pub const KEYWORD_SEPARATOR: &str = ", ";

/// 빈 칸 자리표시
pub const EMPTY_PLACEHOLDER: &str = "—";

/// 매칭된 문장이 없을 때의 안내
pub const NO_MATCH_MESSAGE: &str = "관련 어휘와 일치하는 설명이 없습니다.";

/// 카테고리 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl SummaryRow {
    /// 구분자로 이은 키워드, 비어 있으면 자리표시
    pub fn joined(&self) -> String {
        join_or_placeholder(&self.keywords)
    }
}

/// 카테고리별 키워드 요약 (구성・기법・색감・주제 순)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub rows: Vec<SummaryRow>,
}

impl KeywordSummary {
    /// 사조 어휘사전 항목 전체 요약
    pub fn from_entry(entry: &LexiconEntry) -> Self {
        Self {
            rows: Category::MATCHED
                .iter()
                .map(|&category| SummaryRow {
                    category,
                    keywords: entry.keywords(category).to_vec(),
                })
                .collect(),
        }
    }

    /// 매칭된 키워드 요약
    pub fn from_keywords(keywords: &CategoryKeywords) -> Self {
        Self {
            rows: Category::MATCHED
                .iter()
                .map(|&category| SummaryRow {
                    category,
                    keywords: keywords.get(category).to_vec(),
                })
                .collect(),
        }
    }

    pub fn row(&self, category: Category) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.category == category)
    }

    /// 카테고리 칸 텍스트 (행이 없으면 자리표시)
    pub fn joined(&self, category: Category) -> String {
        self.row(category)
            .map(SummaryRow::joined)
            .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
    }
}

/// 매칭 근거가 같은 문장 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceGroup {
    /// 공통 매칭 키워드 (그룹 키)
    pub keywords: CategoryKeywords,
    /// 원문 문장 (등장 순서)
    pub sentences: Vec<String>,
    /// 키워드를 강조한 HTML 문장 (sentences와 같은 순서)
    pub highlighted: Vec<String>,
}

/// 문장 매칭 결과를 근거별로 묶기
///
/// 그룹 순서는 근거가 처음 등장한 순서를 따른다.
pub fn group_sentences(matches: &[SentenceMatch]) -> Vec<SentenceGroup> {
    let mut groups: Vec<SentenceGroup> = Vec::new();

    for m in matches {
        let highlighted = highlight_keywords(&escape_html(&m.sentence), &m.keywords);
        match groups.iter_mut().find(|g| g.keywords == m.keywords) {
            Some(group) => {
                group.sentences.push(m.sentence.clone());
                group.highlighted.push(highlighted);
            }
            None => groups.push(SentenceGroup {
                keywords: m.keywords.clone(),
                sentences: vec![m.sentence.clone()],
                highlighted: vec![highlighted],
            }),
        }
    }

    groups
}

/// 문장 안의 키워드를 카테고리 색 `<b>`로 감싼다
///
/// 카테고리 순서대로, 같은 카테고리 안에서는 긴 키워드부터 처리한다.
/// 이미 `<b ...>...</b>`로 감싼 구간과 태그 내부는 건드리지 않으므로
/// 짧은 키워드가 긴 키워드 강조 안에서 다시 감싸지지 않고,
/// 강조된 결과에 다시 적용해도 결과가 같다.
///
/// `text`는 HTML 이스케이프된 문자열이어야 한다. 원문에 `<b>` 태그가
/// 섞여 있으면 그 구간도 강조 구간으로 보고 건너뛴다.
pub fn highlight_keywords(text: &str, keywords: &CategoryKeywords) -> String {
    let mut result = text.to_string();

    for category in Category::MATCHED {
        let mut sorted: Vec<&String> = keywords.get(category).iter().collect();
        sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));

        for keyword in sorted {
            result = wrap_outside_markup(&result, &escape_html(keyword), category.color());
        }
    }

    result
}

fn wrap_outside_markup(text: &str, keyword: &str, color: &str) -> String {
    if keyword.is_empty() {
        return text.to_string();
    }

    let replacement = format!("<b style='color:{}'>{}</b>", color, keyword);
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        result.push_str(&rest[..start].replace(keyword, &replacement));
        let end = start + protected_span_len(&rest[start..]);
        result.push_str(&rest[start..end]);
        rest = &rest[end..];
    }
    result.push_str(&rest.replace(keyword, &replacement));

    result
}

/// `<`로 시작하는 보호 구간 길이 (강조 구간 전체 또는 태그 하나)
fn protected_span_len(s: &str) -> usize {
    if s.starts_with("<b ") || s.starts_with("<b>") {
        if let Some(close) = s.find("</b>") {
            return close + "</b>".len();
        }
    }
    s.find('>').map(|i| i + 1).unwrap_or(s.len())
}

/// HTML 특수문자 이스케이프
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn join_or_placeholder(keywords: &[String]) -> String {
    if keywords.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        keywords.join(KEYWORD_SEPARATOR)
    }
}

/// 키워드 요약 HTML (카테고리 색 라벨 + 키워드)
pub fn render_summary_html(summary: &KeywordSummary) -> String {
    let mut html = String::new();
    for row in &summary.rows {
        let color = row.category.color();
        html.push_str(&format!(
            "<div style='margin-bottom: 0.5rem;'>\
             <strong style='color:{color}'>{label}</strong> – \
             <span style='color:{color}'>{keywords}</span></div>\n",
            color = color,
            label = row.category.label(),
            keywords = escape_html(&row.joined()),
        ));
    }
    html
}

/// 문장 그룹 HTML (그룹마다 1행 4열 표 + 강조 문장)
pub fn render_groups_html(groups: &[SentenceGroup]) -> String {
    if groups.is_empty() {
        return format!("<p>{}</p>\n", NO_MATCH_MESSAGE);
    }

    let mut html = String::new();
    for group in groups {
        html.push_str(
            "<table style='width: 100%; text-align: center; border-collapse: collapse; margin-bottom: 0.5rem;'>\n<tr>",
        );
        for category in Category::MATCHED {
            html.push_str(&format!(
                "<th style='background-color: {};'>{}</th>",
                category.header_background(),
                category.label()
            ));
        }
        html.push_str("</tr>\n<tr>");
        for category in Category::MATCHED {
            html.push_str(&format!(
                "<td>{}</td>",
                escape_html(&join_or_placeholder(group.keywords.get(category)))
            ));
        }
        html.push_str("</tr>\n</table>\n");

        for sentence in &group.highlighted {
            html.push_str(&format!("<p style='margin: 0.3rem 0;'>{}</p>\n", sentence));
        }
    }
    html
}

/// 문장 그룹 텍스트 (터미널 출력용)
pub fn render_groups_text(groups: &[SentenceGroup]) -> String {
    if groups.is_empty() {
        return format!("{}\n", NO_MATCH_MESSAGE);
    }

    let mut text = String::new();
    for (i, group) in groups.iter().enumerate() {
        text.push_str(&format!("[{}]\n", i + 1));
        for category in Category::MATCHED {
            text.push_str(&format!(
                "  {}: {}\n",
                category.label(),
                join_or_placeholder(group.keywords.get(category))
            ));
        }
        for sentence in &group.sentences {
            text.push_str(&format!("  📝 {}\n", sentence));
        }
    }
    text
}
