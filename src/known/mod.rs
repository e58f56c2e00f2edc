//! 아는 형태소 집합과 로더
//!
//! 요청마다 새로 만드는 집합과 프로세스 전체가 공유하는 집합([`KnownMorphStore`])이
//! 같은 로더([`loader::load`])를 사용합니다.

pub mod loader;
mod set;
pub mod store;

pub use loader::{KnownMorphColumns, KnownMorphError, KnownMorphRow};
pub use set::KnownMorphSet;
pub use store::KnownMorphStore;
