//! 앙상블 투표
//!
//! 세 예측(Oracle 설명・Oracle 순위・로컬 다중분류)의 다수결과
//! 두 유사도(Oracle 순위・로컬 이진분류)의 평균을 계산한다.

use crate::school::School;
use crate::types::{OracleScore, PredictionSignal};

/// Oracle 유사도를 읽지 못했을 때 대신 쓰는 값 (%)
pub const DEFAULT_ORACLE_PERCENT: u32 = 50;

/// 사조별 득표
///
/// 요청마다 새로 만들며, 어휘사전 순서로 센다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: [u32; School::ALL.len()],
}

impl VoteTally {
    /// 예측에서 득표 집계 (사조 미상은 기권)
    pub fn from_signals(signals: &[PredictionSignal]) -> Self {
        let mut tally = Self::default();
        for signal in signals {
            if let Some(school) = signal.school {
                tally.counts[school.index()] += 1;
            }
        }
        tally
    }

    pub fn count(&self, school: School) -> u32 {
        self.counts[school.index()]
    }

    /// 최다 득표 사조
    ///
    /// 동점이면 어휘사전 순서가 앞선 사조. 모두 기권이면 None.
    pub fn winner(&self) -> Option<School> {
        let max = *self.counts.iter().max()?;
        if max == 0 {
            return None;
        }
        School::ALL.iter().copied().find(|s| self.count(*s) == max)
    }

    /// 득표한 사조만 (어휘사전 순서)
    pub fn entries(&self) -> Vec<(School, u32)> {
        School::ALL
            .iter()
            .map(|s| (*s, self.count(*s)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

/// 세 예측의 다수결
///
/// 두 개 이상 일치하면 그 사조, 모두 다르면 어휘사전 순서가 가장 앞선 사조.
pub fn vote(signals: &[PredictionSignal; 3]) -> Option<School> {
    let tally = VoteTally::from_signals(signals);
    let winner = tally.winner();
    tracing::debug!(votes = ?tally.entries(), winner = ?winner, "투표 집계");
    winner
}

/// `"88%"` 형식의 유사도 문자열 해석
///
/// 앞뒤 공백과 끝의 `%`를 무시하고 정수만 받는다.
pub fn parse_percentage(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<u32>().ok()
}

/// Oracle 유사도와 로컬 유사도의 평균 (정수 반올림)
///
/// Oracle 값을 읽지 못하면 `DEFAULT_ORACLE_PERCENT`로 대신한다.
/// 반올림은 0.5에서 짝수 쪽으로 맞춘다.
pub fn blend_confidence(oracle_pct: &str, classifier_pct: f64) -> u32 {
    let oracle = match parse_percentage(oracle_pct) {
        Some(p) => p,
        None => {
            tracing::warn!(
                oracle = oracle_pct,
                default = DEFAULT_ORACLE_PERCENT,
                "Oracle 유사도를 읽지 못해 기본값 사용"
            );
            DEFAULT_ORACLE_PERCENT
        }
    };
    mean_rounded(oracle as f64, classifier_pct)
}

/// `OracleScore` 버전의 `blend_confidence`
pub fn blend_score(score: &OracleScore, classifier_pct: f64) -> u32 {
    blend_confidence(&score.to_string(), classifier_pct)
}

fn mean_rounded(a: f64, b: f64) -> u32 {
    let mean = ((a + b) / 2.0).round_ties_even();
    mean.clamp(0.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalSource;

    fn signals(a: Option<School>, b: School, c: School) -> [PredictionSignal; 3] {
        [
            PredictionSignal::new(SignalSource::OracleDescription, a, None),
            PredictionSignal::new(SignalSource::OracleRanking, Some(b), None),
            PredictionSignal::new(SignalSource::LocalClassifier, Some(c), None),
        ]
    }

    #[test]
    fn test_two_of_three_win() {
        let s = signals(Some(School::Impressionism), School::Baroque, School::Impressionism);
        assert_eq!(vote(&s), Some(School::Impressionism));

        let s = signals(Some(School::Rococo), School::Realism, School::Realism);
        assert_eq!(vote(&s), Some(School::Realism));
    }

    #[test]
    fn test_three_way_tie_uses_lexicon_order() {
        // 입력 순서와 무관하게 어휘사전 순서가 앞선 바로크
        let s = signals(Some(School::Impressionism), School::Romanticism, School::Baroque);
        assert_eq!(vote(&s), Some(School::Baroque));
    }

    #[test]
    fn test_unknown_abstains() {
        let s = signals(None, School::Naturalism, School::Rococo);
        assert_eq!(vote(&s), Some(School::Rococo));

        let s = signals(None, School::Naturalism, School::Naturalism);
        assert_eq!(vote(&s), Some(School::Naturalism));
    }

    #[test]
    fn test_all_abstain() {
        let s = [PredictionSignal::new(SignalSource::OracleDescription, None, None); 3];
        assert_eq!(vote(&s), None);
    }

    #[test]
    fn test_tally_entries() {
        let s = signals(Some(School::Baroque), School::Renaissance, School::Baroque);
        let tally = VoteTally::from_signals(&s);
        assert_eq!(tally.entries(), vec![(School::Renaissance, 1), (School::Baroque, 2)]);
        assert_eq!(tally.count(School::Rococo), 0);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("88%"), Some(88));
        assert_eq!(parse_percentage(" 7 % "), Some(7));
        assert_eq!(parse_percentage("92"), Some(92));
        assert_eq!(parse_percentage("유사도 0.5% 이하입니다."), None);
        assert_eq!(parse_percentage("88.5%"), None);
        assert_eq!(parse_percentage(""), None);
    }

    #[test]
    fn test_blend_confidence() {
        assert_eq!(blend_confidence("88%", 40.0), 64);
        assert_eq!(blend_confidence("not a number", 40.0), 45);
        assert_eq!(blend_confidence("100%", 0.0), 50);
    }

    #[test]
    fn test_blend_rounds_half_to_even() {
        // (89 + 0) / 2 = 44.5 → 44, (91 + 0) / 2 = 45.5 → 46
        assert_eq!(blend_confidence("89%", 0.0), 44);
        assert_eq!(blend_confidence("91%", 0.0), 46);
        // 소수 유사도
        assert_eq!(blend_confidence("80%", 73.46), 77);
    }

    #[test]
    fn test_blend_score() {
        assert_eq!(blend_score(&OracleScore::Percent(88), 40.0), 64);
        assert_eq!(blend_score(&OracleScore::BelowThreshold, 40.0), 45);
    }
}
