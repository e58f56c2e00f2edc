pub mod analyzer;
pub mod config;
pub mod core;
pub mod known;
pub mod scorer;
pub mod tokenizer;

pub use analyzer::{ComprehensionAnalyzer, ComprehensionResult, HealthStatus};
pub use crate::core::{normalize, Morpheme, MorphKey};
pub use known::{KnownMorphSet, KnownMorphStore};
pub use scorer::{score, ComprehensionError, ScoreBreakdown};
