//! 프로세스 공유 아는 형태소 집합
//!
//! 새 집합은 잠금 밖에서 완성한 뒤 `Arc`를 통째로 교체합니다.
//! 읽는 쪽은 스냅샷 `Arc`를 복제해 사용하므로 반쯤 채워진 집합을 볼 일이 없습니다.
//! 로드가 실패하면 기존 집합은 그대로 남습니다.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;

use super::loader::{self, KnownMorphColumns, KnownMorphError, KnownMorphRow};
use super::set::KnownMorphSet;

lazy_static! {
    static ref GLOBAL_STORE: Arc<KnownMorphStore> = Arc::new(KnownMorphStore::new());
}

/// 프로세스 전역 저장소
pub fn global() -> Arc<KnownMorphStore> {
    Arc::clone(&*GLOBAL_STORE)
}

/// 교체 가능한 공유 집합
#[derive(Debug, Default)]
pub struct KnownMorphStore {
    current: RwLock<Arc<KnownMorphSet>>,
}

impl KnownMorphStore {
    /// 빈 집합으로 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 집합으로 생성
    pub fn with_set(set: KnownMorphSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// 현재 집합의 스냅샷
    pub fn snapshot(&self) -> Arc<KnownMorphSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// 현재 집합의 키 수
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// 완성된 집합으로 교체하고 이전 집합 반환
    pub fn replace(&self, set: KnownMorphSet) -> Arc<KnownMorphSet> {
        let next = Arc::new(set);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// 행 목록으로 새 집합을 만들어 교체
    ///
    /// 받아들인 행이 없으면 에러를 반환하고 기존 집합은 유지합니다.
    pub fn load_rows<I>(&self, rows: I) -> Result<usize, KnownMorphError>
    where
        I: IntoIterator<Item = KnownMorphRow>,
    {
        let (set, accepted) = loader::load(rows)?;
        self.publish(set, accepted);
        Ok(accepted)
    }

    /// CSV 문자열로 교체
    pub fn load_csv_str(
        &self,
        content: &str,
        columns: &KnownMorphColumns,
    ) -> Result<usize, KnownMorphError> {
        let (set, accepted) = loader::load_csv_str(content, columns)?;
        self.publish(set, accepted);
        Ok(accepted)
    }

    /// CSV 파일로 교체
    pub fn load_csv_path(
        &self,
        path: impl AsRef<Path>,
        columns: &KnownMorphColumns,
    ) -> Result<usize, KnownMorphError> {
        let path = path.as_ref();
        let (set, accepted) = loader::load_csv_path(path, columns)?;
        log::debug!("아는 형태소 파일 로드: {}", path.display());
        self.publish(set, accepted);
        Ok(accepted)
    }

    fn publish(&self, set: KnownMorphSet, accepted: usize) {
        let unique = set.len();
        self.replace(set);
        log::info!("아는 형태소 {}행 로드 (고유 키 {}개)", accepted, unique);
    }
}
