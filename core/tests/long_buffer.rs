// core/tests/long_buffer.rs
//
// Integration tests for the head-first ranking of buffers of ten or more
// characters.
//
// Tests cover:
// - Head fixed to the single best head candidate
// - Boundary extension over directly following codes, capped at 12
// - Recursive ranking of the remainder
// - Tone counters carried from head and remainder
// - Config overrides of the cutoff

use scripa_core::{Config, Dictionary, Engine};
use std::sync::Arc;

const LETTERS: &[(&str, &str)] = &[
    ("a", "α"),
    ("b", "β"),
    ("c", "γ"),
    ("d", "δ"),
    ("e", "ε"),
    ("f", "ζ"),
    ("g", "η"),
    ("h", "θ"),
    ("i", "ι"),
    ("j", "κ"),
    ("k", "λ"),
    ("l", "μ"),
    ("m", "ν"),
    ("n", "ξ"),
    ("o", "ο"),
];

fn dictionary(scheme: &str) -> Arc<Dictionary> {
    let mut dict = Dictionary::new();
    dict.load_str(scheme);
    Arc::new(dict)
}

fn letters_scheme() -> String {
    LETTERS.iter().map(|(k, v)| format!("{k} {v}\n")).collect()
}

fn greek(code: &str) -> String {
    code.chars()
        .map(|c| {
            LETTERS
                .iter()
                .find(|(k, _)| k.starts_with(c))
                .map(|(_, v)| *v)
                .unwrap_or_default()
        })
        .collect()
}

fn typed(engine: Engine, code: &str) -> Engine {
    let mut engine = engine;
    for c in code.chars() {
        engine.input_char(c);
    }
    engine
}

#[test]
fn test_boundary_absorbs_tenth_character() {
    let engine = typed(Engine::new(dictionary(&letters_scheme())), "abcdefghij");
    let records = engine.candidate_records();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].output, greek("abcdefghij"));
    assert_eq!(records[0].segment_count, 10);
    assert_eq!(records[0].total_converted, 10);
    // exact-step literal of the whole buffer
    assert_eq!(records[1].output, "abcdefghij");
    assert!(!records[1].transformed);
}

#[test]
fn test_boundary_stops_at_first_miss() {
    let engine = typed(Engine::new(dictionary(&letters_scheme())), "abcdefghixyz");
    let cands = engine.candidates();

    // "x" is unknown, so the head stays at nine characters and "xyz" is
    // ranked on its own (every split of it is literal)
    assert_eq!(cands, vec![format!("{}xyz", greek("abcdefghi")), "abcdefghixyz".to_string()]);
}

#[test]
fn test_boundary_never_passes_twelve() {
    let code = "abcdefghijklmno";
    let engine = typed(Engine::new(dictionary(&letters_scheme())), code);
    let cands = engine.candidates();

    let head = greek("abcdefghijkl");
    // the remainder "mno" is ranked exhaustively: four distinct outputs
    assert_eq!(cands.len(), 5);
    assert_eq!(cands[0], format!("{head}νξο"));
    for tail in ["νξο", "νno", "mnο", "mno"] {
        assert!(cands.contains(&format!("{head}{tail}")), "{tail} missing");
    }
    assert_eq!(cands.last().map(String::as_str), Some(code));
}

#[test]
fn test_only_top_head_candidate_is_kept() {
    // two transcriptions for "a"; "ɑ" sorts before "α" by UTF-8 bytes
    let engine = typed(Engine::new(dictionary("a α\na ɑ\n")), "aaaaaaaaaab");

    let head_top = engine.rank("aaaaaaaaa").remove(0);
    assert_eq!(head_top.output, "ɑ".repeat(9));

    let cands = engine.candidates();
    // the absorbed tenth "a" takes the first listed value
    assert_eq!(cands, vec![format!("{}αb", "ɑ".repeat(9)), "aaaaaaaaaab".to_string()]);
}

#[test]
fn test_long_remainder_recurses() {
    let code = "ab".repeat(11);
    let engine = typed(Engine::new(dictionary("a α\nb β\n")), &code);
    let cands = engine.candidates();

    let head = "αβ".repeat(6);
    assert_eq!(
        cands,
        vec![
            "αβ".repeat(11),
            format!("{head}{}", "ab".repeat(5)),
            code.clone(),
        ]
    );
}

#[test]
fn test_long_unknown_buffer_keeps_literal() {
    let engine = typed(Engine::new(dictionary("")), "qwrtypsdfgzx");
    assert_eq!(engine.candidates(), vec!["qwrtypsdfgzx".to_string()]);
}

#[test]
fn test_exact_match_of_long_code_is_kept() {
    let scheme = format!("{}abcdefghij Ω\n", letters_scheme());
    let engine = typed(Engine::new(dictionary(&scheme)), "abcdefghij");
    let cands = engine.candidates();
    assert!(cands.contains(&"Ω".to_string()));
    assert!(!cands.contains(&"abcdefghij".to_string()));
}

#[test]
fn test_tone_counters_from_remainder() {
    let scheme = format!("{}T35 ˧˥\n", letters_scheme());
    let engine = typed(Engine::new(dictionary(&scheme)), "abcdefghiT35");
    let top = &engine.candidate_records()[0];

    // "T" is not a code, so the head stops at nine and "T35" is the remainder
    assert_eq!(top.output, format!("{}˧˥", greek("abcdefghi")));
    assert_eq!(top.tone_converted, 1);
    assert_eq!(top.max_tone_digits, 2);
    assert_eq!(top.segment_count, 10);
    assert_eq!(top.total_converted, 10);
}

#[test]
fn test_tone_counters_sum_across_head_and_remainder() {
    let scheme = format!("{}T5 ˥\nT35 ˧˥\n", letters_scheme());
    let engine = typed(Engine::new(dictionary(&scheme)), "abcdefgT5hiT35");
    let top = &engine.candidate_records()[0];

    // head "abcdefgT5", stretched over "h" and "i", remainder "T35"
    assert_eq!(top.output, format!("{}˥θι˧˥", greek("abcdefg")));
    assert_eq!(top.tone_converted, 2);
    // longest run wins over the head's single digit
    assert_eq!(top.max_tone_digits, 2);
    assert_eq!(top.segment_count, 11);
    assert_eq!(top.total_converted, 11);
    assert!(top.transformed);
}

#[test]
fn test_configured_cutoff() {
    let config = Config {
        long_buffer_threshold: 4,
        head_len: 2,
        max_boundary: 3,
        ..Config::default()
    };
    let engine = Engine::new(dictionary(&letters_scheme())).with_config(config);
    let engine = typed(engine, "abcd");
    // head "ab", boundary stretched over "c", remainder "d"
    assert_eq!(engine.candidates(), vec!["αβγδ".to_string(), "abcd".to_string()]);

    // the same buffer below the cutoff is searched exhaustively
    let engine = typed(Engine::new(dictionary(&letters_scheme())), "abcd");
    assert!(engine.candidates().len() > 2);
}
