//! 보고서 출력
//!
//! 분석 결과를 HTML・텍스트・JSON으로 쓴다.
//! 세 형식 모두 `최종 결과 ▶ 사조: NN%` 한 줄을 포함하며 `parse_headline`으로 다시 읽을 수 있다.

pub mod html;
pub mod text;

use crate::cli::OutputFormat;
use crate::error::Result;
use art_school_common::{AnalysisResult, School};
use regex::Regex;
use std::path::{Path, PathBuf};

/// 헤드라인 표식
pub const HEADLINE_LABEL: &str = "최종 결과 ▶";

/// 서술형 응답에서 사조를 찾지 못했을 때의 표기
pub const UNKNOWN_SCHOOL_LABEL: &str = "미상";

/// 득표 한 줄 (`르네상스 1, 바로크 2`)
pub fn format_votes(votes: &[(School, u32)]) -> String {
    votes
        .iter()
        .map(|(s, n)| format!("{} {}", s.name(), n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn school_label(school: Option<School>) -> &'static str {
    school.map(|s| s.name()).unwrap_or(UNKNOWN_SCHOOL_LABEL)
}

/// 로컬 분류 한 줄 (`낭만주의 (90.00%)`): 다중분류 사조와 그 사조의 이진분류 유사도
fn classifier_label(result: &AnalysisResult) -> String {
    format!(
        "{} ({:.2}%)",
        result.classifier_school.name(),
        result.classifier_confidence
    )
}

/// 보고서 파일 경로: `{이미지 파일명 stem}_분석.{확장자}`
pub fn report_path(output_dir: &Path, file_name: &str, extension: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "result".to_string());
    output_dir.join(format!("{}_분석.{}", stem, extension))
}

/// 결과 하나를 형식에 맞게 저장
///
/// `image_ref`는 HTML 보고서에 넣을 이미지 경로(보고서 기준 상대 경로 권장).
pub fn export_result(
    result: &AnalysisResult,
    format: OutputFormat,
    output_dir: &Path,
    image_ref: Option<&str>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    if format.includes_html() {
        let path = report_path(output_dir, &result.file_name, "html");
        std::fs::write(&path, html::render_report(result, image_ref))?;
        written.push(path);
    }

    if format.includes_text() {
        let path = report_path(output_dir, &result.file_name, "txt");
        std::fs::write(&path, text::render_report(result))?;
        written.push(path);
    }

    if format.includes_json() {
        let path = report_path(output_dir, &result.file_name, "json");
        std::fs::write(&path, serde_json::to_string_pretty(result)?)?;
        written.push(path);
    }

    for path in &written {
        tracing::debug!(path = %path.display(), "보고서 저장");
    }
    Ok(written)
}

/// 일괄 분석 결과 JSON 배열 저장
pub fn export_batch_json(results: &[AnalysisResult], output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("results.json");
    std::fs::write(&path, serde_json::to_string_pretty(results)?)?;
    Ok(path)
}

/// 헤드라인 한 줄
pub fn headline_line(result: &AnalysisResult) -> String {
    format!("{} {}", HEADLINE_LABEL, result.headline())
}

/// 보고서에서 최종 사조와 유사도 다시 읽기
pub fn parse_headline(report: &str) -> Option<(School, u32)> {
    lazy_static::lazy_static! {
        static ref HEADLINE_RE: Regex =
            Regex::new(r"최종 결과 ▶\s*([^:<\n]+?)\s*:\s*(\d+)%").unwrap();
    }

    let unescaped = report.replace("&amp;", "&");
    let caps = HEADLINE_RE.captures(&unescaped)?;
    let school = School::from_name(caps[1].trim())?;
    let confidence = caps[2].parse().ok()?;
    Some((school, confidence))
}
