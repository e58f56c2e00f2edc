//! MeCab 출력 파싱 및 품사 필터
//!
//! 분석기 출력 줄을 형태소로 바꾸고, 어휘가 아닌 토큰(기호, 보조기호, 공백)을 걸러냅니다.
//! 필드가 부족한 줄은 조용히 버리며 전체 분석을 중단하지 않습니다.

use super::morph::Morpheme;

/// 점수 계산에서 제외하는 품사
pub const EXCLUDED_PARTS_OF_SPEECH: [&str; 3] = [
    "記号",     // 기호
    "補助記号", // 보조기호
    "空白",     // 공백
];

/// 문장 끝 표시
const EOS_MARKER: &str = "EOS";

/// 원형 판정에 필요한 최소 자질 수 (품사 ~ 원형)
const MIN_FEATURE_FIELDS: usize = 7;

/// 자질 목록에서 원형 위치
const DICTIONARY_FORM_FIELD: usize = 6;

/// 제외 대상 품사인지 확인
pub fn is_excluded_pos(part_of_speech: &str) -> bool {
    EXCLUDED_PARTS_OF_SPEECH.contains(&part_of_speech)
}

/// MeCab 출력 한 줄을 형태소로 파싱
///
/// 형식: `표층형\t품사,세부1,세부2,세부3,활용형,활용꼴,원형,...`
///
/// EOS, 빈 줄, 탭이 없는 줄, 자질이 7개 미만인 줄은 None
pub fn parse_line(line: &str) -> Option<Morpheme> {
    if line == EOS_MARKER || line.trim().is_empty() {
        return None;
    }

    let (surface, features) = line.split_once('\t')?;
    // 세 번째 열 이후는 사용하지 않음
    let features = features.split('\t').next().unwrap_or_default();

    let fields: Vec<&str> = features.split(',').collect();
    if fields.len() < MIN_FEATURE_FIELDS {
        return None;
    }

    Some(Morpheme::new(
        surface,
        fields[DICTIONARY_FORM_FIELD],
        fields[0],
    ))
}

/// MeCab 출력 전체를 형태소 목록으로 파싱 (필터 적용 전)
pub fn parse_lattice(output: &str) -> Vec<Morpheme> {
    output.lines().filter_map(parse_line).collect()
}

/// 제외 품사를 걸러낸 형태소 목록 (순서 유지)
pub fn filter_lexical(morphemes: Vec<Morpheme>) -> Vec<Morpheme> {
    morphemes
        .into_iter()
        .filter(|m| !is_excluded_pos(&m.part_of_speech))
        .collect()
}

/// 파싱과 품사 필터를 한 번에 수행
pub fn classify_lattice(output: &str) -> Vec<Morpheme> {
    filter_lexical(parse_lattice(output))
}
