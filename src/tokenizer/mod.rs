//! 형태소 분석기 경계
//!
//! 나머지 코드는 [`Tokenizer`] 트레이트에만 의존합니다.
//! 실제 분석기(MeCab 프로세스 등)는 [`MorphAnalyzer`]로 감싸 [`MecabTokenizer`]에 주입합니다.
//!
//! ```
//! use wakaru::tokenizer::{MecabTokenizer, MorphAnalyzer, Tokenizer, TokenizerError};
//!
//! struct Canned;
//!
//! impl MorphAnalyzer for Canned {
//!     fn parse(&self, _text: &str) -> Result<String, TokenizerError> {
//!         Ok("猫\t名詞,一般,*,*,*,*,猫,ネコ,ネコ\nEOS\n".to_string())
//!     }
//! }
//!
//! let tokenizer = MecabTokenizer::new(Canned);
//! assert_eq!(tokenizer.tokenize("猫").len(), 1);
//! ```

mod mecab;

use std::fmt;

use crate::core::Morpheme;

pub use mecab::{input_lines, MecabCommand, MecabTokenizer, MAX_INPUT_LINE_BYTES};

/// 텍스트를 형태소 목록으로 바꾸는 기능
///
/// 구현체는 실패를 밖으로 전파하지 않고 빈 목록을 반환해야 합니다.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Morpheme>;

    /// 하위 분석기를 호출할 수 있는 상태인지
    fn is_available(&self) -> bool {
        true
    }
}

/// MeCab 형식 출력을 만드는 하위 분석기
pub trait MorphAnalyzer: Send + Sync {
    /// 텍스트를 분석해 MeCab 기본 출력 형식(줄 단위, EOS 종료)으로 반환
    fn parse(&self, text: &str) -> Result<String, TokenizerError>;

    /// 분석기를 호출할 수 있는 상태인지
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<Morpheme> {
        (**self).tokenize(text)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for std::sync::Arc<T> {
    fn tokenize(&self, text: &str) -> Vec<Morpheme> {
        (**self).tokenize(text)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// 하위 분석기 에러
///
/// 어댑터 내부에서만 쓰이고 [`Tokenizer::tokenize`] 밖으로는 나가지 않습니다.
#[derive(Debug)]
pub enum TokenizerError {
    /// 분석기 실행 실패 (실행 파일 없음 등)
    Spawn(std::io::Error),
    /// 입출력 실패
    Io(std::io::Error),
    /// 분석기가 실패 코드로 종료
    Failed(String),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::Spawn(e) => write!(f, "분석기 실행 실패: {}", e),
            TokenizerError::Io(e) => write!(f, "분석기 입출력 오류: {}", e),
            TokenizerError::Failed(s) => write!(f, "분석기 오류 종료: {}", s),
        }
    }
}

impl std::error::Error for TokenizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokenizerError::Spawn(e) | TokenizerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TokenizerError {
    fn from(e: std::io::Error) -> Self {
        TokenizerError::Io(e)
    }
}
