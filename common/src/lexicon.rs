//! 사조별 어휘사전
//!
//! 사조마다 구성・기법・색감・주제・대표 예술가 5개 카테고리의 키워드 목록을 가진다.
//! 프로세스 시작 시 한 번 만들어 파이프라인에 주입하며, 이후 변경하지 않는다.

use crate::error::{Error, Result};
use crate::school::{Category, School};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 한 사조의 카테고리별 키워드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub school: School,
    pub construction: Vec<String>,
    pub technique: Vec<String>,
    pub color: Vec<String>,
    pub theme: Vec<String>,
    pub artists: Vec<String>,
}

impl LexiconEntry {
    fn from_static(school: School, lists: [&[&str]; 5]) -> Self {
        let own = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            school,
            construction: own(lists[0]),
            technique: own(lists[1]),
            color: own(lists[2]),
            theme: own(lists[3]),
            artists: own(lists[4]),
        }
    }

    /// 카테고리의 키워드 목록 (정의 순서 유지)
    pub fn keywords(&self, category: Category) -> &[String] {
        match category {
            Category::Construction => &self.construction,
            Category::Technique => &self.technique,
            Category::Color => &self.color,
            Category::Theme => &self.theme,
            Category::Artists => &self.artists,
        }
    }

    fn keywords_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Construction => &mut self.construction,
            Category::Technique => &mut self.technique,
            Category::Color => &mut self.color,
            Category::Theme => &mut self.theme,
            Category::Artists => &mut self.artists,
        }
    }
}

/// 어휘사전 전체
///
/// 항목은 항상 `School::ALL` 순서로 사조당 하나씩 존재한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// 내장 어휘사전
    pub fn builtin() -> Self {
        let entries = School::ALL
            .iter()
            .map(|&school| LexiconEntry::from_static(school, builtin_lists(school)))
            .collect();
        Self { entries }
    }

    /// JSON 문자열에서 읽기
    ///
    /// 형식: `{"르네상스": {"구성": [...], "기법": [...], ...}, ...}`
    /// 9개 사조 모두, 그리고 각 사조에 5개 카테고리 모두가 있어야 한다.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, Vec<String>>> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(School::ALL.len());
        for school in School::ALL {
            let categories = raw.get(school.name()).ok_or_else(|| {
                Error::Config(format!("어휘사전에 사조가 없습니다: {}", school))
            })?;

            let mut entry = LexiconEntry::from_static(school, [&[], &[], &[], &[], &[]]);
            for category in Category::ALL {
                let keywords = categories.get(category.label()).ok_or_else(|| {
                    Error::Config(format!("{}: 카테고리가 없습니다: {}", school, category))
                })?;
                *entry.keywords_mut(category) = keywords.clone();
            }
            entries.push(entry);
        }

        for name in raw.keys() {
            if School::from_name(name).is_none() {
                return Err(Error::Config(format!("알 수 없는 사조: {}", name)));
            }
        }

        Ok(Self { entries })
    }

    /// JSON 파일에서 읽기
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn entry(&self, school: School) -> &LexiconEntry {
        // entries는 School::ALL 순서로 구성되므로 인덱스가 곧 위치
        &self.entries[school.index()]
    }

    /// 어휘사전 순서의 사조 목록
    pub fn schools(&self) -> impl Iterator<Item = School> + '_ {
        self.entries.iter().map(|e| e.school)
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// 어휘사전의 첫 번째 사조 (순위 응답 대체값)
    pub fn first_school(&self) -> School {
        self.entries.first().map(|e| e.school).unwrap_or(School::FALLBACK)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_lists(school: School) -> [&'static [&'static str]; 5] {
    match school {
        School::Renaissance => [
            &["원근법", "균형", "조화", "수학적 비례", "대칭"],
            &["선 원근법", "공기 원근법(스푸마토)", "명암법(키아로스쿠로)", "해부학적 접근"],
            &["따뜻한 색조", "명암 대비", "부드러운 색조 변화"],
            &["인체 중심", "자연", "신화", "종교"],
            &["레오나르도 다빈치", "미켈란젤로", "라파엘로", "도나텔로", "뒤러", "반에이크", "브뤼헐"],
        ],
        School::Baroque => [
            &["역동적 구도", "대각선 구도", "비대칭 균형", "과장된 움직임", "연극적 장면 구성"],
            &["키아로스쿠로", "테네브리즘", "강한 명암 대비", "극적 조명", "사실적 세부 묘사", "감각적 표현"],
            &["풍부한 색채", "강렬한 명암 대비", "금빛 강조", "어두운 배경과 강한 빛의 대비"],
            &["왕권의 신성함", "극적 감정 표현", "종교적 환희", "역사적 사건", "연극적 장면", "감각적 경험"],
            &["카라바조", "루벤스", "렘브란트", "벨라스케스", "베르니니", "페르메이르", "할스"],
        ],
        School::Rococo => [
            &["곡선 구도", "섬세한 균형", "부드러운 흐름", "우아한 화면 구성"],
            &["가벼운 붓 터치", "부드러운 색감", "섬세한 장식적 표현", "풍속화 기법", "초상화 기법"],
            &["파스텔 색조", "따뜻한 색감", "은은한 명암", "감각적 색채 배치"],
            &["귀족 문화", "유희와 쾌락", "세련된 감각", "풍속적 장면", "낭만적 분위기"],
            &["와토", "부셰", "프라고나르", "고야", "샤르댕", "레이놀즈", "게인즈버러"],
        ],
        School::Neoclassicism => [
            &["엄격한 비례", "대칭적 구도", "명확한 윤곽", "정적인 화면 질서"],
            &["정확한 선묘", "매끄러운 붓 터치", "형태의 명확성", "해부학적 접근", "조각적 인체 표현"],
            &["절제된 색채", "균형 잡힌 명암", "선명한 색상", "차분한 분위기"],
            &["고대 신화", "역사적 사건", "이성적 질서", "도덕적 교훈", "고전적 이상미"],
            &["다비드", "앵그르", "부게로"],
        ],
        School::Romanticism => [
            &["역동적 구도", "비대칭 균형", "감정적 흐름", "연극적 장면 구성"],
            &["자유로운 붓 터치", "명암의 강한 대비", "선명한 색채", "극적 조명", "표현적 기법"],
            &["강렬한 색감", "극적인 명암 대비", "감정적 색채 표현", "루벤스풍 색채 활용"],
            &["민족적 정체성", "감정적 해방", "혁명과 자유", "극적 사건", "자연과 초월적 감성"],
            &["들라크루아", "제리코", "터너", "고야", "프리드리히"],
        ],
        School::Naturalism => [
            &["사실적 구도", "조화로운 자연 배치", "균형 잡힌 풍경 표현"],
            &["야외 사생", "사실적 묘사", "섬세한 붓 터치", "자연 채광 활용"],
            &["자연스러운 색감", "부드러운 명암", "따뜻한 토속적 색조", "사실적인 빛 표현"],
            &["전원 풍경", "자연 속 삶", "소박한 농민의 일상", "자연의 생명력"],
            &["밀레", "코로", "터너", "컨스터블"],
        ],
        School::Realism => [
            &["균형 잡힌 구도", "일상적 장면 중심"],
            &["정밀한 묘사", "명확한 윤곽선", "자연스러운 명암 표현"],
            &["차분한 색감", "자연스러운 명암", "현실적인 색채 사용"],
            &["노동자", "평범한 시민", "사회 현실", "산업화", "빈부 격차"],
            &["쿠르베", "도미에", "밀레", "코로", "호머", "휘슬러", "호퍼"],
        ],
        School::Impressionism => [
            &["개방적인 구도", "특정 순간의 포착", "자연스러운 시선 이동 유도"],
            &["짧고 분할된 붓 터치", "색의 병치", "빛과 대기 표현 강조"],
            &["밝고 순수한 색채", "빛과 대기의 흐름에 따른 색상 변주"],
            &["일상적 장면", "도시와 자연 풍경", "순간적인 빛과 색채의 변화 포착"],
            &["마네", "모네", "르누아르", "드가", "피사로", "카유보트"],
        ],
        School::CubismAbstraction => [
            &["다중 시점", "원근법 파괴", "기하학적 구성", "화면의 평면화"],
            &["대상 분해 및 재구성", "점·선·면을 활용한 조형적 표현", "콜라주 기법"],
            &["단순한 색채", "원색 강조(차가운 추상)", "감성적 색면 표현(뜨거운 추상)"],
            &["본질 탐구", "재현의 거부", "감성과 직관의 표현", "기하학적 질서"],
            &["피카소", "브라크", "레제", "칸딘스키", "몬드리안", "말레비치", "로스코"],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_school_in_order() {
        let lexicon = Lexicon::builtin();
        let schools: Vec<School> = lexicon.schools().collect();
        assert_eq!(schools, School::ALL.to_vec());
        assert_eq!(lexicon.first_school(), School::Renaissance);
    }

    #[test]
    fn test_builtin_entries_have_all_categories() {
        let lexicon = Lexicon::builtin();
        for entry in lexicon.entries() {
            for category in Category::ALL {
                assert!(
                    !entry.keywords(category).is_empty(),
                    "{} {} 비어 있음",
                    entry.school,
                    category
                );
            }
        }
    }

    #[test]
    fn test_entry_keeps_definition_order() {
        let lexicon = Lexicon::builtin();
        let entry = lexicon.entry(School::Renaissance);
        assert_eq!(entry.school, School::Renaissance);
        assert_eq!(
            entry.keywords(Category::Construction),
            &["원근법", "균형", "조화", "수학적 비례", "대칭"]
        );
        assert_eq!(entry.keywords(Category::Artists)[0], "레오나르도 다빈치");
    }

    #[test]
    fn test_from_json_roundtrip_of_builtin_shape() {
        let mut map = serde_json::Map::new();
        for entry in Lexicon::builtin().entries() {
            let mut cats = serde_json::Map::new();
            for category in Category::ALL {
                cats.insert(
                    category.label().to_string(),
                    serde_json::json!(entry.keywords(category)),
                );
            }
            map.insert(entry.school.name().to_string(), serde_json::Value::Object(cats));
        }
        let json = serde_json::Value::Object(map).to_string();

        let lexicon = Lexicon::from_json(&json).unwrap();
        assert_eq!(lexicon, Lexicon::builtin());
    }

    #[test]
    fn test_from_json_missing_school() {
        let json = r#"{"르네상스": {"구성": [], "기법": [], "색감": [], "주제": [], "대표 예술가": []}}"#;
        let err = Lexicon::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("바로크")));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Lexicon::from_json("{"), Err(Error::Json(_))));
    }
}
