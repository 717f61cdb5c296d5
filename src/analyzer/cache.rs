//! Oracle 응답 캐시 모듈
//!
//! 이미지 바이트의 SHA-256 해시를 키로 두 Oracle 응답(서술형・순위)을 저장해
//! 같은 이미지를 다시 분석할 때 외부 호출을 건너뛴다.
//! 실패한 호출은 저장하지 않는다.

use super::OracleResponses;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".oracle-cache.json";

/// 캐시 파일 구조
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// 버전 (호환성 검사용)
    version: u32,
    /// 이미지 해시 → 응답
    entries: HashMap<String, CacheEntry>,
}

/// 캐시 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    /// 저장 시각 (RFC 3339)
    pub cached_at: String,
    pub responses: OracleResponses,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// 캐시 파일 읽기 (없거나 깨졌거나 버전이 다르면 빈 캐시)
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) => {
                if cache.version != Self::CURRENT_VERSION {
                    tracing::warn!(
                        found = cache.version,
                        expected = Self::CURRENT_VERSION,
                        "캐시 버전 불일치, 새로 만듭니다"
                    );
                    return Self::default();
                }
                cache
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %cache_path.display(), "캐시 파일을 읽지 못해 새로 만듭니다");
                Self::default()
            }
        }
    }

    /// 캐시 파일 저장
    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// 캐시 파일 삭제 (있었으면 true)
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, hash: &str) -> Option<&OracleResponses> {
        self.entries.get(hash).map(|e| &e.responses)
    }

    pub fn entry(&self, hash: &str) -> Option<&CacheEntry> {
        self.entries.get(hash)
    }

    pub fn insert(&mut self, hash: String, file_name: String, file_size: u64, responses: OracleResponses) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                cached_at: chrono::Local::now().to_rfc3339(),
                responses,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 바이트 SHA-256 (소문자 hex)
pub fn compute_bytes_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// 파일 SHA-256
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(compute_bytes_hash(&bytes))
}
