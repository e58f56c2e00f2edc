//! 이해도 점수 계산
//!
//! 형태소 키별 출현 횟수를 세고, 아는 키의 출현 비율을 정수 백분율(버림)로 냅니다.
//! 같은 키가 세 번 나오면 세 번 모두 계산에 들어갑니다 (종류가 아니라 출현 기준).

use std::collections::HashMap;
use std::fmt;

use crate::core::{Morpheme, MorphKey};
use crate::known::{KnownMorphError, KnownMorphSet};

/// 점수 계산 실패 원인
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComprehensionError {
    /// 정규화 후 텍스트가 비어 있음
    EmptyInput,
    /// 분류 후 남은 형태소가 없음 (분석기 사용 불가 포함)
    NoMorphemesExtracted,
    /// 유효한 아는 형태소 행이 없음
    NoKnownDataLoaded,
}

impl fmt::Display for ComprehensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 확장 프로그램이 그대로 표시하는 문구
        match self {
            ComprehensionError::EmptyInput => write!(f, "No text provided"),
            ComprehensionError::NoMorphemesExtracted => {
                write!(f, "Could not extract morphemes from text")
            }
            ComprehensionError::NoKnownDataLoaded => write!(f, "No known morphs loaded"),
        }
    }
}

impl std::error::Error for ComprehensionError {}

impl From<KnownMorphError> for ComprehensionError {
    fn from(_: KnownMorphError) -> Self {
        ComprehensionError::NoKnownDataLoaded
    }
}

/// 점수 계산 세부 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// 서로 다른 형태소 키 수
    pub unique_morphs: usize,
    /// 전체 출현 수
    pub total_occurrences: usize,
    /// 아는 키의 출현 수
    pub known_occurrences: usize,
    /// 모르는 키의 출현 수
    pub unknown_occurrences: usize,
    /// 이해도 (0 ~ 100, 버림)
    pub score: u8,
}

/// 형태소 목록의 이해도 계산
///
/// 형태소가 하나도 없으면 0점이 아니라 [`ComprehensionError::NoMorphemesExtracted`]
pub fn score(
    morphemes: &[Morpheme],
    known: &KnownMorphSet,
) -> Result<ScoreBreakdown, ComprehensionError> {
    if morphemes.is_empty() {
        return Err(ComprehensionError::NoMorphemesExtracted);
    }

    let counts = count_occurrences(morphemes);

    let total_occurrences: usize = counts.values().sum();
    let known_occurrences: usize = counts
        .iter()
        .filter(|(key, _)| known.contains(key))
        .map(|(_, count)| count)
        .sum();

    Ok(ScoreBreakdown {
        unique_morphs: counts.len(),
        total_occurrences,
        known_occurrences,
        unknown_occurrences: total_occurrences - known_occurrences,
        score: percentage(known_occurrences, total_occurrences),
    })
}

/// 형태소 키별 출현 횟수
pub fn count_occurrences(morphemes: &[Morpheme]) -> HashMap<MorphKey, usize> {
    let mut counts = HashMap::new();
    for morpheme in morphemes {
        *counts.entry(morpheme.key()).or_insert(0) += 1;
    }
    counts
}

/// known / total 백분율 (버림). total이 0이면 0
///
/// 정수 연산이라 99.9%는 99, 2/3은 66이 됩니다.
pub fn percentage(known: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let known = known.min(total) as u64;
    (known * 100 / total as u64) as u8
}
