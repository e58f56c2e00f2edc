//! 아는 형태소 데이터 로드
//!
//! 헤더가 있는 CSV에서 원형 열과 활용형 열을 골라 [`KnownMorphSet`]을 만듭니다.
//! 요청 단위 집합과 프로세스 공유 집합 모두 이 로더를 사용합니다.
//!
//! # 파일 형식
//! ```text
//! Morph-Lemma,Morph-Inflection,Morph-Priority
//! 食べる,食べた,120
//! 猫,猫,30
//! ```
//! 두 열 중 하나라도 없거나 공백뿐인 행은 건너뜁니다. 나머지 열은 무시합니다.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::MorphKey;

use super::set::KnownMorphSet;

/// 원형 열 기본 이름
pub const DEFAULT_LEMMA_COLUMN: &str = "Morph-Lemma";
/// 활용형 열 기본 이름
pub const DEFAULT_INFLECTION_COLUMN: &str = "Morph-Inflection";

/// 아는 형태소 로드 에러
#[derive(Debug)]
pub enum KnownMorphError {
    /// 파일 읽기 실패
    Io(std::io::Error),
    /// CSV 헤더 파싱 실패
    Csv(String),
    /// 유효한 행이 하나도 없음
    NoKnownDataLoaded,
}

impl fmt::Display for KnownMorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownMorphError::Io(e) => write!(f, "파일 읽기 오류: {}", e),
            KnownMorphError::Csv(s) => write!(f, "CSV 파싱 오류: {}", s),
            KnownMorphError::NoKnownDataLoaded => write!(f, "유효한 형태소 행이 없습니다"),
        }
    }
}

impl std::error::Error for KnownMorphError {}

impl From<std::io::Error> for KnownMorphError {
    fn from(e: std::io::Error) -> Self {
        KnownMorphError::Io(e)
    }
}

impl From<csv::Error> for KnownMorphError {
    fn from(e: csv::Error) -> Self {
        KnownMorphError::Csv(e.to_string())
    }
}

/// 원형/활용형 열 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownMorphColumns {
    pub lemma: String,
    pub inflection: String,
}

impl Default for KnownMorphColumns {
    fn default() -> Self {
        Self {
            lemma: DEFAULT_LEMMA_COLUMN.to_string(),
            inflection: DEFAULT_INFLECTION_COLUMN.to_string(),
        }
    }
}

impl KnownMorphColumns {
    pub fn new(lemma: impl Into<String>, inflection: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            inflection: inflection.into(),
        }
    }
}

/// 구조화된 입력 한 행
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownMorphRow {
    /// 원형 필드 (없으면 None)
    pub dictionary_form: Option<String>,
    /// 활용형(표층형) 필드 (없으면 None)
    pub surface: Option<String>,
}

impl KnownMorphRow {
    pub fn new(dictionary_form: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            dictionary_form: Some(dictionary_form.into()),
            surface: Some(surface.into()),
        }
    }

    /// 이름 붙은 필드 맵에서 두 열을 골라 행 생성
    pub fn from_fields(fields: &HashMap<String, String>, columns: &KnownMorphColumns) -> Self {
        Self {
            dictionary_form: fields.get(&columns.lemma).cloned(),
            surface: fields.get(&columns.inflection).cloned(),
        }
    }

    /// 두 필드가 모두 공백이 아니면 키 생성
    pub fn key(&self) -> Option<MorphKey> {
        let dictionary_form = self.dictionary_form.as_deref()?.trim();
        let surface = self.surface.as_deref()?.trim();

        if dictionary_form.is_empty() || surface.is_empty() {
            return None;
        }

        Some(MorphKey::new(dictionary_form, surface))
    }
}

/// 행 목록으로 집합 생성 (실패 없음)
///
/// # Returns
/// (집합, 받아들인 행 수). 중복 행도 각각 센다.
pub fn build<I>(rows: I) -> (KnownMorphSet, usize)
where
    I: IntoIterator<Item = KnownMorphRow>,
{
    let mut set = KnownMorphSet::new();
    let mut accepted = 0;

    for row in rows {
        if let Some(key) = row.key() {
            set.insert(key);
            accepted += 1;
        }
    }

    (set, accepted)
}

/// 행 목록으로 집합 생성
///
/// 받아들인 행이 하나도 없을 때만 [`KnownMorphError::NoKnownDataLoaded`]
pub fn load<I>(rows: I) -> Result<(KnownMorphSet, usize), KnownMorphError>
where
    I: IntoIterator<Item = KnownMorphRow>,
{
    let (set, accepted) = build(rows);
    if accepted == 0 {
        return Err(KnownMorphError::NoKnownDataLoaded);
    }
    Ok((set, accepted))
}

/// CSV를 행 목록으로 읽기
///
/// 헤더 이름으로 열을 찾으며, 열이 없거나 짧은 행은 해당 필드를 None으로 둡니다.
/// 디코딩할 수 없는 행은 건너뜁니다.
pub fn read_rows<R: Read>(
    input: R,
    columns: &KnownMorphColumns,
) -> Result<Vec<KnownMorphRow>, KnownMorphError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => continue,
        };

        // 짧은 행은 뒤쪽 필드가 빠지고, 같은 이름의 열은 앞의 것을 사용
        let mut fields = HashMap::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(record.iter()) {
            fields.entry(name.clone()).or_insert_with(|| value.to_string());
        }

        rows.push(KnownMorphRow::from_fields(&fields, columns));
    }

    Ok(rows)
}

/// CSV 문자열로 집합 생성
pub fn load_csv_str(
    content: &str,
    columns: &KnownMorphColumns,
) -> Result<(KnownMorphSet, usize), KnownMorphError> {
    load(read_rows(content.as_bytes(), columns)?)
}

/// CSV 파일로 집합 생성
pub fn load_csv_path(
    path: impl AsRef<Path>,
    columns: &KnownMorphColumns,
) -> Result<(KnownMorphSet, usize), KnownMorphError> {
    let file = File::open(path)?;
    load(read_rows(BufReader::new(file), columns)?)
}
