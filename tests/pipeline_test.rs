//! 분석 파이프라인 테스트
//!
//! 스텁 Oracle과 스텁 모델로 업로드부터 보고서까지 검증

use art_school_ai::analyzer::{Analyzer, AnalyzerOptions, CacheFile};
use art_school_ai::classifier::{ImageTensor, LocalClassifier, ProbabilityModel};
use art_school_ai::cli::OutputFormat;
use art_school_ai::error::{ArtAiError, Result};
use art_school_ai::export;
use art_school_ai::oracle::{ImageInput, VisionOracle};
use art_school_ai::uploads::UploadStore;
use art_school_common::{Category, Lexicon, OracleScore, School};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;

const DESCRIPTION: &str = "\
이 그림은 바로크 양식으로 보입니다.
**구성 - 대각선 구도, 역동적 구도 :** 대각선 구도가 화면에 긴장감을 줍니다.
기법 - 테네브리즘, 극적 조명 : 어두운 배경 속 극적 조명이 인물을 비춥니다.
색감 - 금빛 강조 : 금빛 강조가 돋보입니다.
주제 - 종교적 환희 : 성인의 종교적 환희를 그렸습니다.";

struct StubOracle {
    description: String,
    ranking: String,
    calls: AtomicUsize,
}

impl StubOracle {
    fn new(description: &str, ranking: &str) -> Self {
        Self {
            description: description.to_string(),
            ranking: ranking.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl VisionOracle for StubOracle {
    async fn generate(&self, _image: &ImageInput, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("하나만") {
            Ok(self.ranking.clone())
        } else {
            Ok(self.description.clone())
        }
    }
}

struct HangingOracle;

impl VisionOracle for HangingOracle {
    async fn generate(&self, _image: &ImageInput, _prompt: &str) -> Result<String> {
        std::future::pending::<()>().await;
        Ok(String::new())
    }
}

struct FixedModel(Vec<f32>);

impl ProbabilityModel for FixedModel {
    fn name(&self) -> &str {
        "stub"
    }

    fn predict(&self, _input: &ImageTensor) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

fn classifier(top: School, binary: &[(School, f32)]) -> LocalClassifier {
    let mut probs = vec![0.05f32; 9];
    probs[top.index()] = 0.6;
    let mut c = LocalClassifier::new(Box::new(FixedModel(probs)));
    for &(school, p) in binary {
        c = c.with_binary(school, Box::new(FixedModel(vec![p])));
    }
    c
}

fn options() -> AnalyzerOptions {
    AnalyzerOptions {
        timeout: Duration::from_secs(5),
        image_size: 16,
    }
}

fn write_png(path: &Path) {
    let img = image::RgbImage::from_pixel(32, 24, image::Rgb([90, 60, 30]));
    img.save(path).expect("png 저장 실패");
}

fn upload(dir: &Path, name: &str) -> PathBuf {
    let source = dir.join(name);
    write_png(&source);
    UploadStore::new(dir.join("uploads"))
        .store_file(&source)
        .expect("업로드 실패")
}

#[tokio::test]
async fn test_full_pipeline_baroque() {
    let dir = tempdir().unwrap();
    let stored = upload(dir.path(), "caravaggio.png");

    let analyzer = Analyzer::new(
        StubOracle::new(DESCRIPTION, "바로크: 88%"),
        classifier(School::Romanticism, &[(School::Baroque, 0.4), (School::Romanticism, 0.9)]),
        Lexicon::builtin(),
        options(),
    );

    let analysis = analyzer.analyze_path(&stored, None).await.unwrap();
    let result = &analysis.result;

    assert_eq!(result.file_name, "caravaggio.png");
    assert_eq!(result.oracle_school, Some(School::Baroque));
    assert_eq!(result.ranking_score, OracleScore::Percent(88));
    assert_eq!(result.classifier_school, School::Romanticism);
    assert_eq!(result.school, School::Baroque);
    // 이진분류는 다중분류가 고른 낭만주의 모델 (90%), 투표 결과와 무관
    assert_eq!(result.classifier_confidence, 90.0);
    assert_eq!(result.confidence, 89);

    assert_eq!(
        result.oracle_keywords.get(Category::Technique),
        &["테네브리즘", "극적 조명"]
    );
    assert!(result
        .sentence_groups
        .iter()
        .any(|g| g.keywords.get(Category::Color).contains(&"금빛 강조".to_string())));
    assert_eq!(result.artists[0], "카라바조");
}

#[tokio::test]
async fn test_unknown_description_and_unformatted_ranking() {
    let dir = tempdir().unwrap();
    let stored = upload(dir.path(), "mystery.png");

    let analyzer = Analyzer::new(
        StubOracle::new("특정 사조로 보기 어렵습니다.", "확신할 수 없습니다"),
        classifier(School::Realism, &[]),
        Lexicon::builtin(),
        options(),
    );

    let result = analyzer.analyze_path(&stored, None).await.unwrap().result;
    assert_eq!(result.oracle_school, None);
    // 순위 응답은 첫 번째 사조로 대체되고, 1:1 동점은 어휘사전 순서로 르네상스
    assert_eq!(result.ranking_school, School::Renaissance);
    assert_eq!(result.ranking_score, OracleScore::BelowThreshold);
    assert_eq!(result.school, School::Renaissance);
    // (50 + 0) / 2
    assert_eq!(result.confidence, 25);
}

#[tokio::test]
async fn test_cache_skips_second_oracle_round() {
    let dir = tempdir().unwrap();
    let stored = upload(dir.path(), "repeat.png");

    let analyzer = Analyzer::new(
        StubOracle::new(DESCRIPTION, "바로크: 88%"),
        classifier(School::Baroque, &[(School::Baroque, 0.5)]),
        Lexicon::builtin(),
        options(),
    );

    let mut cache = CacheFile::load(dir.path());
    let first = analyzer.analyze_path(&stored, Some(&mut cache)).await.unwrap();
    assert!(!first.from_cache);
    assert_eq!(cache.len(), 1);
    cache.save(dir.path()).unwrap();

    let mut reloaded = CacheFile::load(dir.path());
    let second = analyzer.analyze_path(&stored, Some(&mut reloaded)).await.unwrap();
    assert!(second.from_cache);
    assert_eq!(second.result.school, first.result.school);
    assert_eq!(second.result.confidence, first.result.confidence);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_oracle_times_out() {
    let dir = tempdir().unwrap();
    let stored = upload(dir.path(), "slow.png");

    let analyzer = Analyzer::new(
        HangingOracle,
        classifier(School::Baroque, &[]),
        Lexicon::builtin(),
        AnalyzerOptions {
            timeout: Duration::from_millis(200),
            image_size: 16,
        },
    );

    let result = analyzer.analyze_path(&stored, None).await;
    assert!(matches!(result, Err(ArtAiError::Timeout { .. })));
}

#[tokio::test]
async fn test_report_round_trip_every_school() {
    let dir = tempdir().unwrap();
    let stored = upload(dir.path(), "any.png");

    for school in School::ALL {
        let description = format!("이 작품은 {} 양식입니다.", school.name());
        let ranking = format!("{}: 81%", school.name());
        let analyzer = Analyzer::new(
            StubOracle::new(&description, &ranking),
            classifier(school, &[(school, 0.7)]),
            Lexicon::builtin(),
            options(),
        );
        let result = analyzer.analyze_path(&stored, None).await.unwrap().result;
        assert_eq!(result.school, school);
        assert_eq!(result.confidence, 76);

        let out = dir.path().join("reports").join(school.name());
        let written = export::export_result(&result, OutputFormat::All, &out, Some("any.png")).unwrap();
        assert_eq!(written.len(), 3);

        for path in &written {
            let content = std::fs::read_to_string(path).unwrap();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let parsed: art_school_common::AnalysisResult = serde_json::from_str(&content).unwrap();
                assert_eq!((parsed.school, parsed.confidence), (school, 76));
            } else {
                assert_eq!(export::parse_headline(&content), Some((school, 76)), "{}", path.display());
            }
        }
    }
}

#[test]
fn test_reupload_same_name_overwrites() {
    let dir = tempdir().unwrap();
    let store = UploadStore::new(dir.path().join("uploads"));

    let a = dir.path().join("a");
    let b = dir.path().join("b");
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    std::fs::write(a.join("work.png"), b"first").unwrap();
    std::fs::write(b.join("work.png"), b"second").unwrap();

    let first = store.store_file(&a.join("work.png")).unwrap();
    let second = store.store_file(&b.join("work.png")).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second).unwrap(), b"second");
}
