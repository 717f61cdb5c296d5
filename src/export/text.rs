//! 터미널용 텍스트 보고서

use super::{classifier_label, format_votes, headline_line, school_label};
use art_school_common::{render_groups_text, AnalysisResult, Category, KeywordSummary};

pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("🎨 미술 사조 분석 결과\n");
    out.push_str(&format!("파일: {}\n", result.file_name));
    out.push_str(&headline_line(result));
    out.push_str("\n\n");

    out.push_str("[예측]\n");
    out.push_str(&format!("  Oracle 설명: {}\n", school_label(result.oracle_school)));
    out.push_str(&format!(
        "  Oracle 순위: {} ({})\n",
        result.ranking_school.name(),
        result.ranking_score
    ));
    out.push_str(&format!("  로컬 분류기: {}\n", classifier_label(result)));
    out.push_str(&format!("  득표: {}\n\n", format_votes(&result.votes)));

    out.push_str(&format!("[어휘 요약 - {}]\n", result.school.name()));
    push_summary(&mut out, &result.summary);
    out.push('\n');

    if !result.oracle_keywords.is_empty() {
        out.push_str("[Oracle 키워드]\n");
        push_summary(&mut out, &KeywordSummary::from_keywords(&result.oracle_keywords));
        out.push('\n');
    }

    out.push_str("[어휘사전 기반 주요 문장]\n");
    out.push_str(&render_groups_text(&result.sentence_groups));
    out.push('\n');

    out.push_str("[대표 예술가]\n");
    out.push_str(&format!("  {}\n\n", result.artists.join(", ")));

    out.push_str("[Oracle 분석 원문]\n");
    out.push_str(result.oracle_text.trim());
    out.push('\n');

    out
}

fn push_summary(out: &mut String, summary: &KeywordSummary) {
    for category in Category::MATCHED {
        out.push_str(&format!("  {}: {}\n", category.label(), summary.joined(category)));
    }
}
