//! MeCab 기반 분석기 어댑터

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use crate::config::WakaruConfig;
use crate::core::classifier::classify_lattice;
use crate::core::Morpheme;

use super::{MorphAnalyzer, Tokenizer, TokenizerError};

/// mecab에 넘기는 한 줄의 최대 바이트 수
///
/// mecab CLI의 기본 입력 버퍼는 8192바이트이고, 이를 넘는 줄은 임의 위치에서 잘립니다.
pub const MAX_INPUT_LINE_BYTES: usize = 4096;

/// 줄을 끊는 문장 끝 구두점
const SENTENCE_TERMINATORS: [&str; 3] = ["。", "！", "？"];

/// `mecab` 실행 파일을 호출하는 분석기
///
/// 텍스트를 문장 단위 줄로 나눠 표준 입력으로 넘기고 표준 출력의 기본 형식 결과를 읽습니다.
#[derive(Debug, Clone)]
pub struct MecabCommand {
    program: String,
    args: Vec<String>,
}

impl Default for MecabCommand {
    fn default() -> Self {
        Self::new("mecab")
    }
}

impl MecabCommand {
    /// 실행 파일 경로로 생성
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// 추가 인자 설정 (예: `-d <사전 경로>`)
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// 설정 파일 값으로 생성
    pub fn from_config(config: &WakaruConfig) -> Self {
        Self::new(config.mecab_path.clone()).with_args(config.mecab_args.iter().cloned())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MorphAnalyzer for MecabCommand {
    fn parse(&self, text: &str) -> Result<String, TokenizerError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(TokenizerError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TokenizerError::Failed("표준 입력 파이프를 열 수 없음".into()))?;

        // 출력 파이프가 가득 차서 멈추지 않도록 입력은 별도 스레드에서 기록
        let mut input = input_lines(text, MAX_INPUT_LINE_BYTES).join("\n");
        input.push('\n');
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer.join();

        // 조기 종료한 프로세스의 끊긴 파이프보다 종료 코드를 먼저 보고
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TokenizerError::Failed(format!(
                "{} ({})",
                output.status,
                stderr.trim()
            )));
        }
        match written {
            Ok(result) => result?,
            Err(_) => return Err(TokenizerError::Failed("입력 스레드 비정상 종료".into())),
        }

        Ok(decode_lines(&output.stdout))
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .args(&self.args)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

/// 텍스트를 mecab 입력 줄로 분할
///
/// 문장 끝 구두점 뒤에서 줄을 끊고, 한 줄이 `max_bytes`를 넘지 않도록 공백에서 다시 끊습니다.
/// 공백 없이 `max_bytes`를 넘는 덩어리는 문자 경계에서 자릅니다.
pub fn input_lines(text: &str, max_bytes: usize) -> Vec<String> {
    let max_bytes = max_bytes.max(4);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        for piece in split_at_char_boundary(word, max_bytes) {
            let needed = if line.is_empty() { piece.len() } else { line.len() + 1 + piece.len() };
            if needed > max_bytes && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(piece);
        }

        if SENTENCE_TERMINATORS.contains(&word) {
            lines.push(std::mem::take(&mut line));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_at_char_boundary(word: &str, max_bytes: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;
    while rest.len() > max_bytes {
        let mut cut = max_bytes;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}

/// 분석기 출력을 줄 단위로 디코딩
///
/// UTF-8이 아닌 줄은 형식이 잘못된 줄로 보고 버립니다.
fn decode_lines(stdout: &[u8]) -> String {
    let mut decoded = String::with_capacity(stdout.len());
    let mut dropped = 0;

    for line in stdout.split(|&b| b == b'\n') {
        match std::str::from_utf8(line) {
            Ok(line) => {
                decoded.push_str(line);
                decoded.push('\n');
            }
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("UTF-8이 아닌 분석기 출력 {}줄 제외", dropped);
    }
    decoded
}

/// MeCab 형식 분석기를 [`Tokenizer`]로 감싼 어댑터
///
/// 분석기 실패 시 경고만 남기고 빈 목록을 반환합니다.
/// 반환되는 형태소는 품사 필터까지 적용된 상태입니다.
#[derive(Debug, Clone, Default)]
pub struct MecabTokenizer<A = MecabCommand> {
    analyzer: A,
}

impl<A: MorphAnalyzer> MecabTokenizer<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }
}

impl MecabTokenizer<MecabCommand> {
    /// 설정 파일 값으로 생성
    pub fn from_config(config: &WakaruConfig) -> Self {
        Self::new(MecabCommand::from_config(config))
    }
}

impl<A: MorphAnalyzer> Tokenizer for MecabTokenizer<A> {
    fn tokenize(&self, text: &str) -> Vec<Morpheme> {
        // 빈 입력은 분석기를 호출하지 않음
        if text.trim().is_empty() {
            return Vec::new();
        }

        match self.analyzer.parse(text) {
            Ok(output) => classify_lattice(&output),
            Err(e) => {
                log::warn!("형태소 분석 실패: {}", e);
                Vec::new()
            }
        }
    }

    fn is_available(&self) -> bool {
        self.analyzer.is_available()
    }
}
