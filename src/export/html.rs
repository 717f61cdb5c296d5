//! HTML 보고서
//!
//! 외부 리소스 없이 한 파일로 열리는 페이지를 만든다.

use super::{classifier_label, format_votes, headline_line, school_label};
use art_school_common::{
    escape_html, render_groups_html, render_summary_html, AnalysisResult, KeywordSummary,
};

const STYLE: &str = "\
body { font-family: 'Noto Sans KR', sans-serif; max-width: 860px; margin: 2rem auto; color: #222; }
h1 { font-size: 1.6rem; }
h2 { font-size: 1.3rem; border-bottom: 2px solid #eee; padding-bottom: 0.3rem; }
.result-box { background: #f8f9fa; border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }
.artwork { max-width: 100%; max-height: 480px; display: block; margin: 1rem auto; }
table { border: 1px solid #ddd; }
th, td { border: 1px solid #ddd; padding: 0.4rem; }
.artist { display: inline-block; background: #eef; border-radius: 12px; padding: 0.2rem 0.7rem; margin: 0.2rem; }
.oracle-text { white-space: pre-wrap; background: #fafafa; padding: 1rem; border-left: 4px solid #ccc; }
";

pub fn render_report(result: &AnalysisResult, image_ref: Option<&str>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang='ko'>\n<head>\n<meta charset='utf-8'>\n");
    html.push_str(&format!(
        "<title>{} 분석 결과</title>\n<style>\n{}</style>\n</head>\n<body>\n",
        escape_html(&result.file_name),
        STYLE
    ));
    html.push_str("<h1>🎨 미술 사조 분석 결과</h1>\n");

    if let Some(src) = image_ref {
        html.push_str(&format!(
            "<img class='artwork' src='{}' alt='{}'>\n",
            escape_html(src),
            escape_html(&result.file_name)
        ));
    }

    html.push_str("<div class='result-box'>\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&headline_line(result))));
    html.push_str(&format!(
        "<p><strong>최종 학파:</strong> {}<br><strong>최종 유사도:</strong> {}%</p>\n",
        escape_html(result.school.name()),
        result.confidence
    ));
    html.push_str("</div>\n");

    html.push_str("<h2>예측 상세</h2>\n<table style='width: 100%; border-collapse: collapse;'>\n");
    let rows = [
        ("Oracle 설명", escape_html(school_label(result.oracle_school))),
        (
            "Oracle 순위",
            format!(
                "{} ({})",
                escape_html(result.ranking_school.name()),
                escape_html(&result.ranking_score.to_string())
            ),
        ),
        ("로컬 분류기", escape_html(&classifier_label(result))),
        ("득표", escape_html(&format_votes(&result.votes))),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, value));
    }
    html.push_str("</table>\n");

    html.push_str(&format!(
        "<h2>분석 요약 - {}</h2>\n",
        escape_html(result.school.name())
    ));
    html.push_str(&render_summary_html(&result.summary));

    if !result.oracle_keywords.is_empty() {
        html.push_str("<h2>Oracle 키워드</h2>\n");
        html.push_str(&render_summary_html(&KeywordSummary::from_keywords(
            &result.oracle_keywords,
        )));
    }

    html.push_str("<h2>어휘사전 기반 주요 문장</h2>\n");
    html.push_str(&render_groups_html(&result.sentence_groups));

    html.push_str("<h2>대표 예술가</h2>\n<div>");
    for artist in &result.artists {
        html.push_str(&format!("<span class='artist'>{}</span>", escape_html(artist)));
    }
    html.push_str("</div>\n");

    html.push_str("<h2>Oracle 분석 원문</h2>\n");
    html.push_str(&format!(
        "<div class='oracle-text'>{}</div>\n",
        escape_html(result.oracle_text.trim())
    ));

    html.push_str(&format!(
        "<p style='color: #888; font-size: 0.8rem;'>생성: {}</p>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    html.push_str("</body>\n</html>\n");
    html
}
