//! 아는 형태소 집합

use std::collections::hash_set;
use std::collections::HashSet;

use crate::core::MorphKey;

/// 학습자가 이미 아는 형태소 키 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownMorphSet {
    keys: HashSet<MorphKey>,
}

impl KnownMorphSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키 추가. 새로 추가되면 true
    pub fn insert(&mut self, key: MorphKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &MorphKey) -> bool {
        self.keys.contains(key)
    }

    /// 문자열 키로 조회
    pub fn contains_str(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// 서로 다른 키 수
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, MorphKey> {
        self.keys.iter()
    }
}

impl FromIterator<MorphKey> for KnownMorphSet {
    fn from_iter<T: IntoIterator<Item = MorphKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a KnownMorphSet {
    type Item = &'a MorphKey;
    type IntoIter = hash_set::Iter<'a, MorphKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
