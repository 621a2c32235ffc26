//! Integration tests for the PatternCompiler API
//!
//! These tests run complete patterns through the public pipeline.

use strling::{
    PatternCompiler, StrlingError,
    compiler::Feature,
    config::AppConfig,
    ir::Op,
};

fn compile(source: &str) -> String {
    PatternCompiler::default()
        .compile_str(source)
        .unwrap_or_else(|err| panic!("Failed to compile {source:?}:\n{err}"))
}

fn compile_error(source: &str) -> StrlingError {
    PatternCompiler::default()
        .compile_str(source)
        .expect_err("Should fail to compile")
}

#[test]
fn test_phone_number_scenario() {
    let source = "%flags x\n(?<area>\\d{3}) - (?<exchange>\\d{3}) - (?<line>\\d{4})";
    assert_eq!(
        compile(source),
        r"(?x)(?<area>\d{3})-(?<exchange>\d{3})-(?<line>\d{4})"
    );
}

#[test]
fn test_unterminated_group_scenario() {
    let err = compile_error("a(b");
    let parse_error = err.as_parse_error().expect("Should be a parse error");
    assert!(parse_error.message().contains("Unterminated group"));
    assert!(err.to_string().contains("Unterminated group"));
}

#[test]
fn test_quantified_lookaround_scenario() {
    assert_eq!(compile("(?=a)+"), "(?:(?=a))+");
}

#[test]
fn test_escaped_metacharacters_scenario() {
    let source = r"\.\^\$\|\(\)\?\*\+\{\}\[\]\\";
    assert_eq!(compile(source), source);
}

#[test]
fn test_negated_shorthand_scenario() {
    assert_eq!(compile(r"[^\d]"), r"\D");
    assert_eq!(compile(r"[^\p{Lu}]"), r"\P{Lu}");
    assert_eq!(compile(r"[\d]"), r"\d");
}

#[test]
fn test_first_error_wins_scenario() {
    let err = compile_error("[a|b(");
    let parse_error = err.as_parse_error().expect("Should be a parse error");
    assert_eq!(parse_error.message(), "Unterminated character class");
    assert_eq!(parse_error.pos(), 5);
}

#[test]
fn test_forward_named_backreference_scenario() {
    let err = compile_error(r"\k<later>(?<later>a)");
    assert!(err.to_string().contains("Backreference to undefined group"));
}

#[test]
fn test_quantifier_shorthand() {
    assert_eq!(compile("a{0,}"), "a*");
    assert_eq!(compile("a{1,}"), "a+");
    assert_eq!(compile("a{0,1}"), "a?");
    assert_eq!(compile("a{3,3}"), "a{3}");
    assert_eq!(compile("a{3,}"), "a{3,}");
    assert_eq!(compile("a{2,4}+"), "a{2,4}+");
}

#[test]
fn test_literal_fusion() {
    let compiler = PatternCompiler::default();
    let (_, root) = compiler.parse("abc").expect("Failed to parse");
    assert_eq!(compiler.compile(root), Op::lit("abc"));
}

#[test]
fn test_alternation_inside_sequence() {
    assert_eq!(compile("x(?:a|b)y"), "x(?:a|b)y");
    assert_eq!(compile("(?:ab|cd)*"), "(?:ab|cd)*");
    assert_eq!(compile("a|bc"), "a|bc");
}

#[test]
fn test_class_round_trip() {
    assert_eq!(compile("[a-z-]"), "[-a-z]");
    assert_eq!(compile(r"[]a^]"), r"[\]a\^]");
}

#[test]
fn test_backreference_digit_separation() {
    assert_eq!(compile(r"(a)\10"), r"(a)\1(?:)0");
}

#[test]
fn test_free_spacing_literals_survive() {
    assert_eq!(compile("%flags x\na\\ b [ ]"), r"(?x)a\ b[ ]");
}

#[test]
fn test_control_escapes_emit_verbatim() {
    assert_eq!(compile(r"a\tb"), "a\tb");
    assert_eq!(compile(r"\x41B"), "AB");
}

#[test]
fn test_compile_with_metadata() {
    let compiler = PatternCompiler::default();
    let (_, root) = compiler
        .parse(r"(?<n>a)(?>b)\k<n>")
        .expect("Failed to parse");
    let compilation = compiler.compile_with_metadata(root);

    let features: Vec<_> = compilation.features().iter().copied().collect();
    assert_eq!(
        features,
        [Feature::AtomicGroup, Feature::Backreference, Feature::NamedGroup]
    );

    let json = serde_json::to_value(&compilation).expect("Failed to serialize");
    assert_eq!(json["ir"]["ir"], "Seq");
    assert_eq!(
        json["metadata"]["features_used"],
        serde_json::json!(["atomic_group", "backreference", "named_group"])
    );
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [flags]
        default = "im"

        [emitter]
        inline_flags = false
        "#,
    )
    .expect("Failed to load config");

    assert_eq!(config.flags().letters(), Some("im"));
    assert!(!config.emitter().inline_flags());

    let compiler = PatternCompiler::new(config);
    let (flags, _) = compiler.parse("%flags s\na").expect("Failed to parse");
    assert_eq!(flags.letters(), "ims");
    assert_eq!(compiler.compile_str("a").expect("Failed to compile"), "a");
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: AppConfig = toml::from_str("[flags]\ndefault = \"i\"\n").expect("Failed to load");
    let compiler = PatternCompiler::new(config);

    assert_eq!(compiler.compile_str("a").expect("Failed to compile"), "(?i)a");

    let empty: AppConfig = toml::from_str("").expect("Failed to load");
    assert!(empty.emitter().inline_flags());
    assert_eq!(empty.flags().letters(), None);
}

#[test]
fn test_builder_reusability() {
    let compiler = PatternCompiler::default();
    for source in ["a", "b+", "(c)"] {
        assert!(compiler.compile_str(source).is_ok());
    }
    assert!(compiler.compile_str("(").is_err());
    assert!(compiler.compile_str("d").is_ok());
}
