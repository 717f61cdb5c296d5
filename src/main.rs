use anyhow::Context;
use art_school_ai::analyzer::{Analyzer, AnalyzerOptions, CacheFile};
use art_school_ai::classifier::LocalClassifier;
use art_school_ai::cli::{Cli, Commands, OutputFormat};
use art_school_ai::config::Config;
use art_school_ai::oracle::GeminiOracle;
use art_school_ai::uploads::UploadStore;
use art_school_ai::{export, scanner, schools};
use art_school_common::{AnalysisResult, Lexicon, School};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, output, format, use_cache } => {
            println!("🎨 art-ai - 작품 분석\n");

            // 1. 업로드 저장
            println!("[1/3] 이미지 저장 중...");
            let store = UploadStore::new(&config.uploads_dir);
            let stored = store.store_file(&image)?;
            println!("✔ 저장: {}\n", stored.display());

            // 2. 분석
            println!("[2/3] AI 분석 중...{}", if use_cache { " (캐시 사용)" } else { "" });
            let analyzer = build_analyzer(&config)?;
            let mut cache = use_cache.then(|| CacheFile::load(store.dir()));
            let analysis = analyzer.analyze_path(&stored, cache.as_mut()).await?;
            if let Some(cache) = &cache {
                cache.save(store.dir())?;
            }
            println!(
                "✔ 분석 완료{}\n",
                if analysis.from_cache { " (캐시)" } else { "" }
            );

            // 3. 보고서
            println!("[3/3] 보고서 저장 중...");
            let output_dir = output.unwrap_or_else(|| store.dir().to_path_buf());
            let image_ref = image_ref_for(&stored, &output_dir);
            let written = export::export_result(&analysis.result, format, &output_dir, Some(&image_ref))?;
            for path in &written {
                println!("✔ 출력: {}", path.display());
            }

            println!();
            if format == OutputFormat::Text {
                println!("{}", export::text::render_report(&analysis.result));
            } else {
                print_summary(&analysis.result);
            }
            println!("✅ 완료");
        }

        Commands::Batch { folder, recursive, output, format, use_cache } => {
            println!("🚀 art-ai - 일괄 분석\n");

            println!("[1/3] 이미지 검색 중...");
            let images = scanner::scan_folder(&folder, recursive)?;
            println!("✔ {}장 발견\n", images.len());
            if images.is_empty() {
                return Err(art_school_ai::error::ArtAiError::NoImagesFound(folder.display().to_string()).into());
            }

            println!("[2/3] AI 분석 중...{}", if use_cache { " (캐시 사용)" } else { "" });
            let analyzer = build_analyzer(&config)?;
            let mut cache = use_cache.then(|| CacheFile::load(&folder));

            let pb = ProgressBar::new(images.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .context("진행 표시 템플릿")?
                    .progress_chars("=>-"),
            );

            let mut analyzed = Vec::new();
            let mut failures = 0usize;
            for info in &images {
                pb.set_message(info.file_name.clone());
                match analyzer.analyze_path(&info.path, cache.as_mut()).await {
                    Ok(analysis) => analyzed.push((info, analysis.result)),
                    Err(e) => {
                        failures += 1;
                        pb.suspend(|| eprintln!("⚠ {}: {}", info.file_name, e));
                    }
                }
                pb.inc(1);
            }
            pb.finish_with_message("완료");

            if let Some(cache) = &cache {
                cache.save(&folder)?;
            }
            println!("✔ 성공 {}장, 실패 {}장\n", analyzed.len(), failures);

            println!("[3/3] 보고서 저장 중...");
            let output_dir = output.unwrap_or_else(|| folder.clone());
            for (info, result) in &analyzed {
                let image_ref = image_ref_for(&info.path, &output_dir);
                export::export_result(result, format, &output_dir, Some(&image_ref))?;
            }
            let results: Vec<AnalysisResult> = analyzed.into_iter().map(|(_, r)| r).collect();
            if format.includes_json() {
                let path = export::export_batch_json(&results, &output_dir)?;
                println!("✔ 전체 결과: {}", path.display());
            }

            println!();
            for result in &results {
                println!("  {} → {}", result.file_name, result.headline());
            }
            println!("\n✅ 완료");
        }

        Commands::Schools { name, lexicon } => {
            let lexicon = match lexicon {
                Some(path) => Lexicon::from_file(&path)
                    .with_context(|| format!("어휘사전 읽기 실패: {}", path.display()))?,
                None => config.load_lexicon()?,
            };

            match name {
                Some(name) => {
                    let school: School = name.parse().map_err(anyhow::Error::msg)?;
                    println!("{}", schools::render_school_detail(lexicon.entry(school)));
                }
                None => print!("{}", schools::render_school_list(&lexicon)),
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API 키를 설정했습니다");
            }

            if show {
                println!("설정: {}", Config::config_path()?.display());
                println!("  모델: {}", config.model);
                println!("  제한 시간: {}초", config.timeout_seconds);
                println!("  모델 폴더: {}", config.models_dir.display());
                println!("  업로드 폴더: {}", config.uploads_dir.display());
                println!("  입력 해상도: {}px", config.image_size);
                println!(
                    "  어휘사전: {}",
                    config
                        .lexicon_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "내장".to_string())
                );
                println!(
                    "  API 키: {}",
                    if config.get_api_key().is_ok() { "설정됨" } else { "미설정" }
                );
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| config.uploads_dir.clone());
            let cache_path = CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("캐시 정보:");
                    println!("  경로: {}", cache_path.display());
                    println!("  항목: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  크기: {} bytes", meta.len());
                    }
                } else {
                    println!("캐시 파일이 없습니다: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ 캐시를 삭제했습니다: {}", cache_path.display()),
                    Ok(false) => println!("캐시 파일이 없습니다"),
                    Err(e) => println!("캐시 삭제 오류: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// `--verbose`면 debug, 아니면 warn. RUST_LOG가 있으면 그대로 사용.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_analyzer(config: &Config) -> anyhow::Result<Analyzer<GeminiOracle>> {
    let oracle = GeminiOracle::from_config(config)?;
    let classifier = LocalClassifier::load(&config.models_dir)
        .with_context(|| format!("모델 폴더: {}", config.models_dir.display()))?;
    let lexicon = config.load_lexicon()?;
    Ok(Analyzer::new(oracle, classifier, lexicon, AnalyzerOptions::from(config)))
}

/// 보고서에서 이미지를 가리킬 경로 (같은 폴더면 파일명만)
fn image_ref_for(image: &Path, output_dir: &Path) -> String {
    let image_dir = image.parent().map(Path::to_path_buf).unwrap_or_default();
    let same_dir = match (image_dir.canonicalize(), output_dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => image_dir == output_dir,
    };
    if same_dir {
        image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    } else {
        image
            .canonicalize()
            .unwrap_or_else(|_| PathBuf::from(image))
            .display()
            .to_string()
    }
}

fn print_summary(result: &AnalysisResult) {
    println!("📌 {}", export::headline_line(result));
    println!("   대표 예술가: {}", schools::artist_preview(&result.artists));
}
