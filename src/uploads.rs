//! 업로드 저장소
//!
//! 업로드 이미지를 고정 폴더에 파일명 그대로 저장한다.
//! 경로는 버리고 파일명만 쓰며, 같은 이름은 덮어쓴다.

use crate::error::{ArtAiError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 저장 위치 (파일명 부분만 사용)
    pub fn path_for(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.dir.join(sanitize_file_name(file_name)?))
    }

    /// 로컬 파일을 업로드 폴더로 복사
    pub fn store_file(&self, source: &Path) -> Result<PathBuf> {
        if !source.is_file() {
            return Err(ArtAiError::FileNotFound(source.display().to_string()));
        }
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let target = self.path_for(&name)?;

        std::fs::create_dir_all(&self.dir)?;
        // 이미 업로드 폴더 안의 같은 파일이면 복사하지 않는다
        if target.exists() && same_file(source, &target) {
            return Ok(target);
        }
        std::fs::copy(source, &target)?;
        tracing::debug!(from = %source.display(), to = %target.display(), "업로드 저장");
        Ok(target)
    }

    /// 바이트를 업로드 폴더에 저장
    pub fn store_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let target = self.path_for(file_name)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&target, bytes)?;
        Ok(target)
    }
}

/// 경로 구분자(`/`, `\`) 뒤의 파일명만 남긴다
pub fn sanitize_file_name(file_name: &str) -> Result<String> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(ArtAiError::ImageLoad(format!("잘못된 파일명: {:?}", file_name)));
    }
    Ok(name.to_string())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
