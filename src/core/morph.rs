//! 형태소와 형태소 키
//!
//! 형태소 키는 "아는 형태소" 판정의 단위입니다.
//! 원형(dictionary form)과 표층형(surface)을 구분자 없이 이어 붙인 문자열이며,
//! 기존 known morphs CSV와 호환되도록 이 규칙을 그대로 유지합니다.
//! 구분자가 없으므로 ("ab", "c")와 ("a", "bc")는 같은 키가 됩니다.

use std::borrow::Borrow;
use std::fmt;

/// 분석기가 원형을 알 수 없을 때 보고하는 값
pub const UNKNOWN_BASE_FORM: &str = "*";

/// 분석기 출력 단위 하나
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Morpheme {
    /// 원문에 나타난 형태 (활용형)
    pub surface: String,
    /// 원형. 분석기가 원형을 주지 않으면 surface와 같음
    pub dictionary_form: String,
    /// 품사 태그
    pub part_of_speech: String,
}

impl Morpheme {
    /// 새 형태소 생성
    ///
    /// 원형이 비어 있거나 `*`이면 표층형을 원형으로 사용합니다.
    pub fn new(
        surface: impl Into<String>,
        dictionary_form: impl Into<String>,
        part_of_speech: impl Into<String>,
    ) -> Self {
        let surface = surface.into();
        let dictionary_form = resolve_dictionary_form(dictionary_form.into(), &surface);
        Self {
            surface,
            dictionary_form,
            part_of_speech: part_of_speech.into(),
        }
    }

    /// 이 형태소의 키
    pub fn key(&self) -> MorphKey {
        MorphKey::from_morpheme(self)
    }
}

fn resolve_dictionary_form(dictionary_form: String, surface: &str) -> String {
    if dictionary_form.is_empty() || dictionary_form == UNKNOWN_BASE_FORM {
        surface.to_string()
    } else {
        dictionary_form
    }
}

/// 형태소 식별 키: 원형 + 표층형
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MorphKey(String);

impl MorphKey {
    /// 원형과 표층형으로 키 생성 (구분자 없음)
    pub fn new(dictionary_form: &str, surface: &str) -> Self {
        let mut key = String::with_capacity(dictionary_form.len() + surface.len());
        key.push_str(dictionary_form);
        key.push_str(surface);
        Self(key)
    }

    /// 형태소에서 키 생성
    ///
    /// 원형이 `*`이면 표층형을 원형 자리에 사용합니다 (표층형이 두 번 들어감).
    pub fn from_morpheme(morpheme: &Morpheme) -> Self {
        let dictionary_form = if morpheme.dictionary_form == UNKNOWN_BASE_FORM {
            morpheme.surface.as_str()
        } else {
            morpheme.dictionary_form.as_str()
        };
        Self::new(dictionary_form, &morpheme.surface)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MorphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MorphKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&Morpheme> for MorphKey {
    fn from(morpheme: &Morpheme) -> Self {
        Self::from_morpheme(morpheme)
    }
}
