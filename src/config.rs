//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::known::loader::{DEFAULT_INFLECTION_COLUMN, DEFAULT_LEMMA_COLUMN};
use crate::known::KnownMorphColumns;

/// wakaru 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WakaruConfig {
    /// mecab 실행 파일 경로
    #[serde(default = "default_mecab_path")]
    pub mecab_path: String,
    /// mecab 추가 인자 (예: ["-d", "/usr/lib/mecab/dic/ipadic"])
    #[serde(default)]
    pub mecab_args: Vec<String>,
    /// 시작 시 공유 집합으로 읽을 아는 형태소 CSV
    #[serde(default)]
    pub known_morphs_path: Option<PathBuf>,
    /// CSV 원형 열 이름
    #[serde(default = "default_lemma_column")]
    pub lemma_column: String,
    /// CSV 활용형 열 이름
    #[serde(default = "default_inflection_column")]
    pub inflection_column: String,
    /// 분석기 상태 확인용 문구
    #[serde(default = "default_health_phrase")]
    pub health_phrase: String,
    /// 로그 필터 (RUST_LOG가 있으면 그쪽 우선)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_mecab_path() -> String {
    "mecab".to_string()
}

fn default_lemma_column() -> String {
    DEFAULT_LEMMA_COLUMN.to_string()
}

fn default_inflection_column() -> String {
    DEFAULT_INFLECTION_COLUMN.to_string()
}

pub(crate) fn default_health_phrase() -> String {
    "こんにちは".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for WakaruConfig {
    fn default() -> Self {
        Self {
            mecab_path: default_mecab_path(),
            mecab_args: Vec::new(),
            known_morphs_path: None,
            lemma_column: default_lemma_column(),
            inflection_column: default_inflection_column(),
            health_phrase: default_health_phrase(),
            log_level: default_log_level(),
        }
    }
}

impl WakaruConfig {
    /// CSV 열 이름 설정
    pub fn columns(&self) -> KnownMorphColumns {
        KnownMorphColumns::new(self.lemma_column.clone(), self.inflection_column.clone())
    }
}

/// 설정 파일 경로: $XDG_CONFIG_HOME/wakaru/config.json 또는 ~/.config/wakaru/config.json
pub fn config_path() -> PathBuf {
    let absolute_dir = |var: &str| {
        std::env::var(var)
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_absolute() && p.is_dir())
    };

    let base = absolute_dir("XDG_CONFIG_HOME")
        .or_else(|| absolute_dir("HOME").map(|home| home.join(".config")))
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    base.join("wakaru").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> WakaruConfig {
    load_config_from(&config_path())
}

/// 지정 경로에서 설정 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: &Path) -> WakaruConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {}", e);
            WakaruConfig::default()
        }),
        Err(_) => WakaruConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &WakaruConfig) -> Result<(), String> {
    save_config_to(config, &config_path())
}

/// 지정 경로에 설정 저장
pub fn save_config_to(config: &WakaruConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WakaruConfig::default();
        assert_eq!(config.mecab_path, "mecab");
        assert!(config.mecab_args.is_empty());
        assert_eq!(config.known_morphs_path, None);
        assert_eq!(config.lemma_column, "Morph-Lemma");
        assert_eq!(config.inflection_column, "Morph-Inflection");
        assert_eq!(config.health_phrase, "こんにちは");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = WakaruConfig {
            mecab_path: "/usr/local/bin/mecab".into(),
            known_morphs_path: Some(PathBuf::from("/data/known.csv")),
            log_level: "debug".into(),
            ..WakaruConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WakaruConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_backward_compat_missing_field() {
        // 예전 설정 파일에 열 이름 항목이 없는 경우 기본값 사용
        let json = r#"{"mecab_path": "/opt/mecab"}"#;
        let config: WakaruConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mecab_path, "/opt/mecab");
        assert_eq!(config.lemma_column, "Morph-Lemma");
        assert_eq!(config.columns(), KnownMorphColumns::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = WakaruConfig {
            mecab_args: vec!["-d".into(), "/opt/unidic".into()],
            lemma_column: "Lemma".into(),
            ..WakaruConfig::default()
        };
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_load_invalid_or_missing_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(load_config_from(&path), WakaruConfig::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config_from(&path), WakaruConfig::default());
    }

    #[test]
    fn test_config_path_file_name() {
        let path = config_path();
        assert!(path.ends_with("wakaru/config.json"));
    }
}
