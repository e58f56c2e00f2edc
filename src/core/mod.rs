//! 형태소 처리 핵심 로직 (정규화, 형태소 키, 품사 분류)

pub mod classifier;
pub mod morph;
pub mod normalizer;

pub use morph::{Morpheme, MorphKey};
pub use normalizer::normalize;
