//! 사조별 어휘사전 보기
//!
//! 목록에서는 대표 예술가를 앞의 세 명만 보이고 나머지는 `+N명`으로 줄인다.
//! 한 사조만 볼 때는 전부 보인다.

use art_school_common::{Category, Lexicon, LexiconEntry};

/// 목록에서 보여줄 대표 예술가 수
pub const ARTIST_PREVIEW: usize = 3;

/// 대표 예술가 미리보기 (`a, b, c +2명`)
pub fn artist_preview(artists: &[String]) -> String {
    let shown = artists
        .iter()
        .take(ARTIST_PREVIEW)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if artists.len() > ARTIST_PREVIEW {
        format!("{} +{}명", shown, artists.len() - ARTIST_PREVIEW)
    } else {
        shown
    }
}

/// 전체 사조 목록
pub fn render_school_list(lexicon: &Lexicon) -> String {
    let mut out = String::new();
    for (i, entry) in lexicon.entries().iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, entry.school.name()));
        for category in Category::MATCHED {
            out.push_str(&format!(
                "   {}: {}\n",
                category.label(),
                entry.keywords(category).join(", ")
            ));
        }
        out.push_str(&format!(
            "   {}: {}\n\n",
            Category::Artists.label(),
            artist_preview(&entry.artists)
        ));
    }
    out
}

/// 사조 하나 상세
pub fn render_school_detail(entry: &LexiconEntry) -> String {
    let mut out = format!("🎨 {}\n", entry.school.name());
    for category in Category::ALL {
        out.push_str(&format!("\n[{}]\n", category.label()));
        for keyword in entry.keywords(category) {
            out.push_str(&format!("  - {}\n", keyword));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use art_school_common::School;

    #[test]
    fn test_artist_preview() {
        let artists: Vec<String> = ["다비드", "앵그르", "부게로"].iter().map(|s| s.to_string()).collect();
        assert_eq!(artist_preview(&artists), "다비드, 앵그르, 부게로");

        let lexicon = Lexicon::builtin();
        assert_eq!(
            artist_preview(&lexicon.entry(School::Baroque).artists),
            "카라바조, 루벤스, 렘브란트 +4명"
        );
        assert_eq!(artist_preview(&[]), "");
    }

    #[test]
    fn test_school_list_in_lexicon_order() {
        let list = render_school_list(&Lexicon::builtin());
        assert!(list.starts_with("1. 르네상스\n"));
        assert!(list.contains("9. 입체파&추상화\n"));
        assert!(list.find("2. 바로크").unwrap() < list.find("3. 로코코").unwrap());
    }

    #[test]
    fn test_school_detail_shows_all_artists() {
        let lexicon = Lexicon::builtin();
        let detail = render_school_detail(lexicon.entry(School::Baroque));
        assert!(detail.contains("[대표 예술가]"));
        assert!(detail.contains("  - 할스\n"));
        assert!(!detail.contains("+4명"));
    }
}
