//! 이해도 분석 파이프라인
//!
//! 정규화 → 형태소 분석 → 품사 필터 → 점수 계산을 한 번에 수행합니다.
//! 아는 형태소 집합은 요청마다 넘기거나(요청 단위) 공유 저장소를 사용(프로세스 단위)합니다.
//! 실패는 모두 `success = false`인 [`ComprehensionResult`]로 돌려줍니다.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{default_health_phrase, WakaruConfig};
use crate::core::{normalize, Morpheme};
use crate::known::{loader, KnownMorphColumns, KnownMorphError, KnownMorphRow, KnownMorphSet, KnownMorphStore};
use crate::scorer::{self, ComprehensionError, ScoreBreakdown};
use crate::tokenizer::{MecabTokenizer, Tokenizer};

/// 분석 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensionResult {
    /// 점수 계산 성공 여부
    pub success: bool,
    /// 이해도 (0 ~ 100). 실패 시 없음
    #[serde(rename = "comprehension_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// 원문 글자 수
    pub subtitle_length: usize,
    /// 품사 필터 후 형태소 수
    pub morpheme_count: usize,
    /// 사용한 아는 형태소 집합의 키 수
    pub known_morphs_total: usize,
    /// 실패 사유
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 세부 집계 (직렬화하지 않음)
    #[serde(skip)]
    pub breakdown: Option<ScoreBreakdown>,
    /// 실패 종류 (직렬화하지 않음)
    #[serde(skip)]
    pub failure: Option<ComprehensionError>,
}

impl ComprehensionResult {
    fn succeeded(
        breakdown: ScoreBreakdown,
        subtitle_length: usize,
        morpheme_count: usize,
        known_morphs_total: usize,
    ) -> Self {
        Self {
            success: true,
            score: Some(breakdown.score),
            subtitle_length,
            morpheme_count,
            known_morphs_total,
            error: None,
            breakdown: Some(breakdown),
            failure: None,
        }
    }

    /// 실패 결과 생성
    pub fn failed(error: ComprehensionError, subtitle_length: usize, known_morphs_total: usize) -> Self {
        Self {
            success: false,
            score: None,
            subtitle_length,
            morpheme_count: 0,
            known_morphs_total,
            error: Some(error.to_string()),
            breakdown: None,
            failure: Some(error),
        }
    }
}

/// 상태 확인 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// 하위 분석기를 호출할 수 있는지 (실행 파일 존재 등)
    pub tokenizer_available: bool,
    /// 확인용 문구에서 형태소가 하나 이상 나오는지
    pub tokenizer_working: bool,
    /// 공유 집합이 비어 있지 않은지
    pub known_morphs_loaded: bool,
    /// 공유 집합의 키 수
    pub known_morphs_count: usize,
}

/// 이해도 분석기
///
/// # Examples
/// ```
/// use wakaru::analyzer::ComprehensionAnalyzer;
/// use wakaru::core::Morpheme;
/// use wakaru::known::KnownMorphRow;
/// use wakaru::tokenizer::Tokenizer;
///
/// struct Words;
///
/// impl Tokenizer for Words {
///     fn tokenize(&self, text: &str) -> Vec<Morpheme> {
///         text.split(' ').map(|w| Morpheme::new(w, w, "名詞")).collect()
///     }
/// }
///
/// let analyzer = ComprehensionAnalyzer::new(Words);
/// let result = analyzer.analyze_with_rows("猫 犬 猫", vec![KnownMorphRow::new("猫", "猫")]);
/// assert_eq!(result.score, Some(66));
/// ```
#[derive(Debug)]
pub struct ComprehensionAnalyzer<T = MecabTokenizer> {
    tokenizer: T,
    store: Arc<KnownMorphStore>,
    columns: KnownMorphColumns,
    health_phrase: String,
}

impl ComprehensionAnalyzer<MecabTokenizer> {
    /// 설정 파일 값과 공유 저장소로 생성
    pub fn from_config(config: &WakaruConfig, store: Arc<KnownMorphStore>) -> Self {
        Self::with_store(MecabTokenizer::from_config(config), store)
            .with_columns(config.columns())
            .with_health_phrase(config.health_phrase.clone())
    }
}

impl<T: Tokenizer> ComprehensionAnalyzer<T> {
    /// 빈 공유 저장소로 생성
    pub fn new(tokenizer: T) -> Self {
        Self::with_store(tokenizer, Arc::new(KnownMorphStore::new()))
    }

    /// 공유 저장소를 지정하여 생성
    pub fn with_store(tokenizer: T, store: Arc<KnownMorphStore>) -> Self {
        Self {
            tokenizer,
            store,
            columns: KnownMorphColumns::default(),
            health_phrase: default_health_phrase(),
        }
    }

    /// CSV 열 이름 설정
    pub fn with_columns(mut self, columns: KnownMorphColumns) -> Self {
        self.columns = columns;
        self
    }

    /// 상태 확인 문구 설정
    pub fn with_health_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.health_phrase = phrase.into();
        self
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn store(&self) -> &Arc<KnownMorphStore> {
        &self.store
    }

    pub fn columns(&self) -> &KnownMorphColumns {
        &self.columns
    }

    /// 정규화 후 형태소 추출 (품사 필터 적용)
    pub fn extract_morphemes(&self, text: &str) -> Vec<Morpheme> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        self.tokenizer.tokenize(&normalized)
    }

    /// 요청 단위 집합으로 분석
    pub fn analyze_with(&self, text: &str, known: &KnownMorphSet) -> ComprehensionResult {
        let subtitle_length = text.chars().count();

        let normalized = normalize(text);
        if normalized.is_empty() {
            return ComprehensionResult::failed(
                ComprehensionError::EmptyInput,
                subtitle_length,
                known.len(),
            );
        }

        let morphemes = self.tokenizer.tokenize(&normalized);
        match scorer::score(&morphemes, known) {
            Ok(breakdown) => {
                log::debug!(
                    "분석 완료: {}% (고유 {}개, 출현 {}회 중 {}회 아는 형태소)",
                    breakdown.score,
                    breakdown.unique_morphs,
                    breakdown.total_occurrences,
                    breakdown.known_occurrences
                );
                ComprehensionResult::succeeded(breakdown, subtitle_length, morphemes.len(), known.len())
            }
            Err(error) => ComprehensionResult::failed(error, subtitle_length, known.len()),
        }
    }

    /// 행 목록으로 요청 단위 집합을 만들어 분석
    ///
    /// 유효한 행이 없으면 텍스트를 분석하지 않고 `NoKnownDataLoaded`
    pub fn analyze_with_rows<I>(&self, text: &str, rows: I) -> ComprehensionResult
    where
        I: IntoIterator<Item = KnownMorphRow>,
    {
        match loader::load(rows) {
            Ok((known, _)) => self.analyze_with(text, &known),
            Err(e) => self.load_failure(text, e),
        }
    }

    /// CSV 문자열로 요청 단위 집합을 만들어 분석
    pub fn analyze_with_csv(&self, text: &str, csv: &str) -> ComprehensionResult {
        match loader::load_csv_str(csv, &self.columns) {
            Ok((known, _)) => self.analyze_with(text, &known),
            Err(e) => self.load_failure(text, e),
        }
    }

    /// 공유 집합으로 분석
    ///
    /// 공유 집합이 비어 있으면 `NoKnownDataLoaded`
    pub fn analyze(&self, text: &str) -> ComprehensionResult {
        let known = self.store.snapshot();
        if known.is_empty() {
            return ComprehensionResult::failed(
                ComprehensionError::NoKnownDataLoaded,
                text.chars().count(),
                0,
            );
        }
        self.analyze_with(text, &known)
    }

    /// CSV 문자열로 공유 집합 교체
    pub fn load_shared_csv(&self, csv: &str) -> Result<usize, KnownMorphError> {
        self.store.load_csv_str(csv, &self.columns)
    }

    /// 행 목록으로 공유 집합 교체
    pub fn load_shared_rows<I>(&self, rows: I) -> Result<usize, KnownMorphError>
    where
        I: IntoIterator<Item = KnownMorphRow>,
    {
        self.store.load_rows(rows)
    }

    /// 분석기가 확인 문구에서 형태소를 하나 이상 만드는지
    pub fn tokenizer_working(&self) -> bool {
        !self.extract_morphemes(&self.health_phrase).is_empty()
    }

    /// 공유 집합의 키 수
    pub fn known_morphs_count(&self) -> usize {
        self.store.len()
    }

    /// 상태 확인
    pub fn health(&self) -> HealthStatus {
        let known_morphs_count = self.known_morphs_count();
        HealthStatus {
            tokenizer_available: self.tokenizer.is_available(),
            tokenizer_working: self.tokenizer_working(),
            known_morphs_loaded: known_morphs_count > 0,
            known_morphs_count,
        }
    }

    fn load_failure(&self, text: &str, error: KnownMorphError) -> ComprehensionResult {
        log::warn!("요청 형태소 데이터 로드 실패: {}", error);
        ComprehensionResult::failed(error.into(), text.chars().count(), 0)
    }
}
