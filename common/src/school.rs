//! 미술 사조・어휘 카테고리 정의
//!
//! - School: 분류 라벨로 쓰이는 9개 서양 미술 사조 (고정 순서)
//! - Category: 어휘사전의 5개 카테고리

use serde::{Deserialize, Serialize};
use std::fmt;

/// 서양 미술 사조
///
/// 선언 순서가 곧 어휘사전 순서이며, 다중분류 모델의 출력 라벨 순서와 같다.
/// 텍스트 추출과 투표 동점 처리는 모두 이 순서를 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum School {
    Renaissance,
    Baroque,
    Rococo,
    Neoclassicism,
    Romanticism,
    Naturalism,
    Realism,
    Impressionism,
    CubismAbstraction,
}

impl School {
    /// 고정 순서의 전체 사조 목록
    pub const ALL: [School; 9] = [
        School::Renaissance,
        School::Baroque,
        School::Rococo,
        School::Neoclassicism,
        School::Romanticism,
        School::Naturalism,
        School::Realism,
        School::Impressionism,
        School::CubismAbstraction,
    ];

    /// 순위 응답에서 사조를 찾지 못했을 때 사용하는 사조 (목록의 첫 번째)
    pub const FALLBACK: School = School::ALL[0];

    /// 한국어 표기 (프롬프트・어휘사전・보고서 공통)
    pub fn name(&self) -> &'static str {
        match self {
            School::Renaissance => "르네상스",
            School::Baroque => "바로크",
            School::Rococo => "로코코",
            School::Neoclassicism => "신고전주의",
            School::Romanticism => "낭만주의",
            School::Naturalism => "자연주의",
            School::Realism => "사실주의",
            School::Impressionism => "인상주의",
            School::CubismAbstraction => "입체파&추상화",
        }
    }

    /// 고정 순서에서의 위치
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 위치로 사조 조회
    pub fn from_index(index: usize) -> Option<School> {
        School::ALL.get(index).copied()
    }

    /// 한국어 표기로 사조 조회 (완전 일치)
    pub fn from_name(name: &str) -> Option<School> {
        let name = name.trim();
        School::ALL.iter().copied().find(|s| s.name() == name)
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for School {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        School::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = School::ALL.iter().map(|s| s.name()).collect();
            format!("알 수 없는 사조: {}. 사용 가능: {}", s, names.join(", "))
        })
    }
}

/// 어휘사전 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Construction,
    Technique,
    Color,
    Theme,
    Artists,
}

impl Category {
    /// 전체 카테고리 (어휘사전 순서)
    pub const ALL: [Category; 5] = [
        Category::Construction,
        Category::Technique,
        Category::Color,
        Category::Theme,
        Category::Artists,
    ];

    /// 문장 매칭 대상 카테고리 (대표 예술가 제외)
    pub const MATCHED: [Category; 4] = [
        Category::Construction,
        Category::Technique,
        Category::Color,
        Category::Theme,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Construction => "구성",
            Category::Technique => "기법",
            Category::Color => "색감",
            Category::Theme => "주제",
            Category::Artists => "대표 예술가",
        }
    }

    /// 강조 색상
    pub fn color(&self) -> &'static str {
        match self {
            Category::Construction => "#e74c3c", // 빨강
            Category::Technique => "#3498db",    // 파랑
            Category::Color => "#f39c12",        // 노랑
            Category::Theme => "#27ae60",        // 초록
            Category::Artists => "#000",
        }
    }

    /// 표 머리글 배경색
    pub fn header_background(&self) -> &'static str {
        match self {
            Category::Construction => "#ffe3e3",
            Category::Technique => "#d0ebff",
            Category::Color => "#fff3bf",
            Category::Theme => "#d3f9d8",
            Category::Artists => "#eee",
        }
    }

    /// 문장 매칭 대상 여부
    pub fn is_matched(&self) -> bool {
        !matches!(self, Category::Artists)
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
