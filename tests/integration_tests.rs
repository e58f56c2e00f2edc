//! 통합 테스트 - MeCab 형식 출력부터 이해도 점수까지

use std::sync::Arc;
use std::thread;

use wakaru::analyzer::ComprehensionAnalyzer;
use wakaru::known::{KnownMorphRow, KnownMorphStore};
use wakaru::tokenizer::{MecabCommand, MecabTokenizer, MorphAnalyzer, Tokenizer, TokenizerError};
use wakaru::{normalize, ComprehensionError};

/// 입력과 무관하게 고정 출력을 내는 분석기
struct CannedMecab(&'static str);

impl MorphAnalyzer for CannedMecab {
    fn parse(&self, _text: &str) -> Result<String, TokenizerError> {
        Ok(self.0.to_string())
    }
}

/// 항상 실패하는 분석기
struct BrokenMecab;

impl MorphAnalyzer for BrokenMecab {
    fn parse(&self, _text: &str) -> Result<String, TokenizerError> {
        Err(TokenizerError::Failed("사전을 찾을 수 없음".into()))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// 「猫が魚を食べた。猫が食べた！」
const LATTICE: &str = "猫\t名詞,一般,*,*,*,*,猫,ネコ,ネコ
が\t助詞,格助詞,一般,*,*,*,が,ガ,ガ
魚\t名詞,一般,*,*,*,*,魚,サカナ,サカナ
を\t助詞,格助詞,一般,*,*,*,を,ヲ,ヲ
食べ\t動詞,自立,*,*,一段,連用形,食べる,タベ,タベ
た\t助動詞,*,*,*,特殊・タ,基本形,た,タ,タ
。\t記号,句点,*,*,*,*,。,。,。
猫\t名詞,一般,*,*,*,*,猫,ネコ,ネコ
が\t助詞,格助詞,一般,*,*,*,が,ガ,ガ
食べ\t動詞,自立,*,*,一段,連用形,食べる,タベ,タベ
た\t助動詞,*,*,*,特殊・タ,基本形,た,タ,タ
！\t記号,一般,*,*,*,*,！,！,！
EOS
";

const TEXT: &str = "猫が魚を食べた。猫が食べた！";

fn analyzer() -> ComprehensionAnalyzer<MecabTokenizer<CannedMecab>> {
    ComprehensionAnalyzer::new(MecabTokenizer::new(CannedMecab(LATTICE)))
}

#[test]
fn test_full_pipeline_with_request_csv() {
    // 猫×2, が×2, 食べる食べ×2, た×2 → 8 / 10
    let csv = "Morph-Lemma,Morph-Inflection,Morph-Priority\n\
               猫,猫,1\n\
               が,が,2\n\
               食べる,食べ,3\n\
               たた,,4\n\
               た,た,5\n";
    let result = analyzer().analyze_with_csv(TEXT, csv);

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.morpheme_count, 10);
    assert_eq!(result.known_morphs_total, 4);
    assert_eq!(result.score, Some(80));
}

#[test]
fn test_symbols_not_counted() {
    let analyzer = analyzer();
    let morphemes = analyzer.extract_morphemes(TEXT);
    assert!(morphemes.iter().all(|m| m.part_of_speech != "記号"));
    assert_eq!(morphemes.len(), 10);
}

#[test]
fn test_all_known_and_none_known() {
    let all = vec![
        KnownMorphRow::new("猫", "猫"),
        KnownMorphRow::new("が", "が"),
        KnownMorphRow::new("魚", "魚"),
        KnownMorphRow::new("を", "を"),
        KnownMorphRow::new("食べる", "食べ"),
        KnownMorphRow::new("た", "た"),
    ];
    assert_eq!(analyzer().analyze_with_rows(TEXT, all).score, Some(100));

    let unrelated = vec![KnownMorphRow::new("犬", "犬")];
    assert_eq!(analyzer().analyze_with_rows(TEXT, unrelated).score, Some(0));
}

#[test]
fn test_surface_must_match() {
    // 원형은 같아도 활용형이 다르면 다른 키
    let rows = vec![KnownMorphRow::new("食べる", "食べる")];
    assert_eq!(analyzer().analyze_with_rows(TEXT, rows).score, Some(0));
}

#[test]
fn test_broken_tokenizer_reports_no_morphemes() {
    let analyzer = ComprehensionAnalyzer::new(MecabTokenizer::new(BrokenMecab));
    let result = analyzer.analyze_with_rows(TEXT, vec![KnownMorphRow::new("猫", "猫")]);

    assert!(!result.success);
    assert_eq!(result.failure, Some(ComprehensionError::NoMorphemesExtracted));
    assert!(!analyzer.tokenizer_working());
    assert!(!analyzer.tokenizer().is_available());
    assert!(!analyzer.health().tokenizer_available);
}

#[test]
fn test_health_serialization_reports_availability() {
    let analyzer = analyzer();
    let json = serde_json::to_value(analyzer.health()).unwrap();
    assert_eq!(json["tokenizer_available"], true);
    assert_eq!(json["tokenizer_working"], true);
    assert_eq!(json["known_morphs_loaded"], false);
}

#[test]
fn test_missing_mecab_binary() {
    let tokenizer = MecabTokenizer::new(MecabCommand::new("/nonexistent/mecab"));
    let analyzer = ComprehensionAnalyzer::new(tokenizer);
    analyzer.load_shared_rows(vec![KnownMorphRow::new("猫", "猫")]).unwrap();

    let result = analyzer.analyze(TEXT);
    assert_eq!(result.failure, Some(ComprehensionError::NoMorphemesExtracted));

    let health = analyzer.health();
    assert!(!health.tokenizer_available);
    assert!(!health.tokenizer_working);
    assert!(health.known_morphs_loaded);
    assert_eq!(health.known_morphs_count, 1);
}

#[test]
fn test_whitespace_only_text() {
    let result = analyzer().analyze_with_rows(" \u{3000}\n ", vec![KnownMorphRow::new("猫", "猫")]);
    assert_eq!(result.failure, Some(ComprehensionError::EmptyInput));
    assert_eq!(result.score, None);
}

#[test]
fn test_shared_store_across_analyzers() {
    let store = Arc::new(KnownMorphStore::new());
    let first = ComprehensionAnalyzer::with_store(MecabTokenizer::new(CannedMecab(LATTICE)), Arc::clone(&store));
    let second = ComprehensionAnalyzer::with_store(MecabTokenizer::new(CannedMecab(LATTICE)), Arc::clone(&store));

    first
        .load_shared_rows(vec![KnownMorphRow::new("猫", "猫"), KnownMorphRow::new("が", "が")])
        .unwrap();
    assert_eq!(second.known_morphs_count(), 2);
    assert_eq!(second.analyze(TEXT).score, Some(40));

    // 실패한 로드는 기존 집합을 지우지 않음
    assert!(second.load_shared_rows(vec![KnownMorphRow::default()]).is_err());
    assert_eq!(first.analyze(TEXT).score, Some(40));
}

#[test]
fn test_concurrent_analysis_during_reload() {
    let store = Arc::new(KnownMorphStore::new());
    store.load_rows(vec![KnownMorphRow::new("猫", "猫")]).unwrap();

    let analyzer = Arc::new(ComprehensionAnalyzer::with_store(
        MecabTokenizer::new(CannedMecab(LATTICE)),
        Arc::clone(&store),
    ));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || {
                for _ in 0..50 {
                    let score = analyzer.analyze(TEXT).score;
                    // 猫만 → 20, 猫+が+食べる → 60
                    assert!(score == Some(20) || score == Some(60), "{:?}", score);
                }
            })
        })
        .collect();

    for _ in 0..20 {
        store
            .load_rows(vec![
                KnownMorphRow::new("猫", "猫"),
                KnownMorphRow::new("が", "が"),
                KnownMorphRow::new("食べる", "食べ"),
            ])
            .unwrap();
        store.load_rows(vec![KnownMorphRow::new("猫", "猫")]).unwrap();
    }

    for worker in workers {
        worker.join().unwrap();
    }
}

#[test]
fn test_normalize_is_idempotent_on_subtitles() {
    let once = normalize("  えっ？  本当に、行くの！\n\nうん。 ");
    assert_eq!(once, "えっ ？ 本当に 、 行くの ！ うん 。");
    assert_eq!(normalize(&once), once);
}
