use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "art-ai")]
#[command(about = "미술 작품 이미지의 사조를 분석하는 하이브리드 AI 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력 (RUST_LOG가 있으면 그쪽이 우선)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 이미지 한 장을 분석해 보고서 출력
    Analyze {
        /// 작품 이미지 파일
        #[arg(required = true)]
        image: PathBuf,

        /// 보고서 출력 폴더 (기본: 업로드 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 출력 형식 (html/json/text/all)
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Oracle 응답 캐시 사용
        #[arg(long)]
        use_cache: bool,
    },

    /// 폴더의 이미지를 모두 분석
    Batch {
        /// 이미지 폴더
        #[arg(required = true)]
        folder: PathBuf,

        /// 하위 폴더까지 검색
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 보고서 출력 폴더 (기본: 입력 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 출력 형식 (html/json/text/all)
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Oracle 응답 캐시 사용
        #[arg(long)]
        use_cache: bool,
    },

    /// 사조별 어휘사전 보기
    Schools {
        /// 사조 이름 (생략하면 전체 목록)
        name: Option<String>,

        /// 어휘사전 JSON 파일 (생략하면 내장 어휘사전)
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// 설정
    Config {
        /// API 키 설정
        #[arg(long)]
        set_api_key: Option<String>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },

    /// Oracle 응답 캐시 관리
    Cache {
        /// 캐시 삭제
        #[arg(long)]
        clear: bool,

        /// 대상 폴더 (생략하면 업로드 폴더)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 캐시 정보 표시
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
    Text,
    All,
}

impl OutputFormat {
    pub fn includes_html(&self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::All)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }

    pub fn includes_text(&self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::All)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            "all" => Ok(OutputFormat::All),
            _ => Err(format!("알 수 없는 형식: {}. html, json, text, all 중 하나를 쓰세요", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("all".parse::<OutputFormat>().unwrap(), OutputFormat::All);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_includes() {
        assert!(OutputFormat::All.includes_html());
        assert!(OutputFormat::All.includes_json());
        assert!(OutputFormat::All.includes_text());
        assert!(!OutputFormat::Json.includes_html());
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from(["art-ai", "analyze", "mona.jpg", "--format", "json", "--use-cache"])
            .unwrap();
        match cli.command {
            Commands::Analyze { image, format, use_cache, output } => {
                assert_eq!(image, PathBuf::from("mona.jpg"));
                assert_eq!(format, OutputFormat::Json);
                assert!(use_cache);
                assert!(output.is_none());
            }
            _ => panic!("analyze 명령이어야 합니다"),
        }
    }

    #[test]
    fn test_parse_batch_recursive_verbose() {
        let cli = Cli::try_parse_from(["art-ai", "-v", "batch", "works", "-r"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Batch { recursive: true, .. }));
    }
}
