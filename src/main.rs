//! wakaru - 일본어 자막 이해도 계산기
//!
//! 사용법:
//!   wakaru <자막 텍스트 파일> [known_morphs.csv]
//!   wakaru --health

use std::fs;
use std::process::ExitCode;

use serde::Serialize;
use wakaru::analyzer::ComprehensionAnalyzer;
use wakaru::config::load_config;
use wakaru::known::store;

const USAGE: &str = "usage: wakaru <subtitle.txt> [known_morphs.csv]\n       wakaru --health";

fn main() -> ExitCode {
    // 설정 로드
    let config = load_config();

    // 로깅 초기화 (RUST_LOG가 없으면 설정값 사용)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    // 공유 집합 시드
    let shared = store::global();
    if let Some(path) = &config.known_morphs_path {
        if let Err(e) = shared.load_csv_path(path, &config.columns()) {
            log::warn!("아는 형태소 파일 로드 실패 ({}): {}", path.display(), e);
        }
    }

    let analyzer = ComprehensionAnalyzer::from_config(&config, shared);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag] if flag == "--health" => print_json(&analyzer.health()),
        [text_path] => {
            let Some(text) = read_file(text_path) else {
                return ExitCode::FAILURE;
            };
            report(&analyzer.analyze(&text))
        }
        [text_path, csv_path] => {
            let (Some(text), Some(csv)) = (read_file(text_path), read_file(csv_path)) else {
                return ExitCode::FAILURE;
            };
            report(&analyzer.analyze_with_csv(&text, &csv))
        }
        _ => {
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
    }
}

fn read_file(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::error!("파일 읽기 실패 ({}): {}", path, e);
            eprintln!("cannot read {}: {}", path, e);
            None
        }
    }
}

fn report(result: &wakaru::ComprehensionResult) -> ExitCode {
    let code = print_json(result);
    if result.success {
        code
    } else {
        ExitCode::FAILURE
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("결과 직렬화 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}
