//! End-to-end scenarios for compile / embed / strip / toggle, over a small
//! hand-built catalog and over the built-in one.

use quality_filter::filter::{
    Catalog, CatalogError, Engine, FilterSession, LogicMode, Polarity, Selection, Settings,
    Token, TokenState,
};
use rstest::{fixture, rstest};
use std::io::Write;

#[fixture]
fn small_catalog() -> Catalog {
    Catalog::new(vec![
        Token::new("720p", "720p", ["720p"]),
        Token::new("1080p", "1080p", ["1080p"]),
        Token::new("hdr", "HDR", ["hdr"]),
    ])
    .expect("valid catalog")
}

fn polarity(entries: &[(&str, bool)]) -> Polarity {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

#[rstest]
fn compile_or_scenario(small_catalog: Catalog) {
    let engine = Engine::new(&small_catalog);
    assert_eq!(
        engine.compile(&["720p", "1080p"], LogicMode::Or, &Polarity::new()),
        "(720p|1080p)"
    );
}

#[rstest]
fn compile_and_scenario(small_catalog: Catalog) {
    let engine = Engine::new(&small_catalog);
    let entries = polarity(&[("1080p", true), ("hdr", false)]);
    assert_eq!(
        engine.compile(&["1080p", "hdr"], LogicMode::And, &entries),
        "(?=.*1080p)(?!.*hdr)"
    );
}

#[rstest]
fn unknown_key_is_skipped(small_catalog: Catalog) {
    let engine = Engine::new(&small_catalog);
    assert_eq!(
        engine.compile(&["__nonexistent__"], LogicMode::Or, &Polarity::new()),
        ""
    );
}

#[rstest]
#[case("foo", "(720p|1080p)", LogicMode::Or, "foo|(720p|1080p)")]
#[case("", "(?=.*1080p)", LogicMode::And, "^(?=.*1080p).*")]
fn embed_scenarios(
    small_catalog: Catalog,
    #[case] base: &str,
    #[case] fragment: &str,
    #[case] mode: LogicMode,
    #[case] expected: &str,
) {
    let engine = Engine::new(&small_catalog);
    assert_eq!(engine.embed(base, fragment, mode), expected);
}

#[rstest]
#[case("^(?=.*1080p).*bar", "bar")]
#[case("foo|(720p|1080p)", "foo")]
fn strip_scenarios(small_catalog: Catalog, #[case] input: &str, #[case] expected: &str) {
    let engine = Engine::new(&small_catalog);
    assert_eq!(engine.strip(input), expected);
}

#[rstest]
fn strip_only_knows_its_own_catalog(small_catalog: Catalog) {
    let engine = Engine::new(&small_catalog);
    assert_eq!(engine.strip("foo|(remux)"), "foo|(remux)");
    assert_eq!(Engine::builtin().strip("foo|(remux)"), "foo");
}

#[test]
fn builtin_or_fragment_for_every_token() {
    let engine = Engine::builtin();
    let keys: Vec<&str> = Catalog::builtin().iter().map(Token::key).collect();
    let fragment = engine.compile(&keys, LogicMode::Or, &Polarity::new());
    insta::assert_snapshot!(fragment, @r"(720p|1080p|\b4k\b|2160p|dovi|\bdv\b|dolby|vision|264|265|\bHEVC\b|hdr|remux|atmos)");
}

#[test]
fn builtin_and_fragment_with_exclusions() {
    let engine = Engine::builtin();
    let entries = polarity(&[("dv", false), ("x264", false)]);
    let fragment = engine.compile(&["4k", "remux", "dv", "x264"], LogicMode::And, &entries);
    insta::assert_snapshot!(fragment, @r"(?=.*(?:\b4k\b|2160p))(?=.*remux)(?!.*(?:dovi|\bdv\b|dolby|vision))(?!.*264)");
}

#[test]
fn builtin_or_fragment_compiles_as_regex() {
    let engine = Engine::builtin();
    let fragment = engine.compile(&["4k", "x265", "atmos"], LogicMode::Or, &Polarity::new());
    let regex = regex::Regex::new(&format!("(?i){fragment}")).expect("fragment compiles");
    assert!(regex.is_match("Movie.2019.2160p.UHD.BluRay.x265"));
    assert!(regex.is_match("Movie 4K HEVC"));
    assert!(!regex.is_match("Movie.2019.1080p.BluRay.x264"));
}

#[test]
fn search_box_session_walkthrough() {
    let mut session = FilterSession::new(Engine::builtin(), Selection::new(LogicMode::Or));

    let text = session.toggle("1080p", "(FLUX|NTb)");
    assert_eq!(text, "(FLUX|NTb)|(1080p)");
    let text = session.toggle("hdr", &text);
    assert_eq!(text, "(FLUX|NTb)|(1080p|hdr)");

    let text = session.set_logic_mode(LogicMode::And, &text);
    assert_eq!(text, "^(?=.*1080p)(?=.*hdr).*(FLUX|NTb)");
    assert_eq!(session.token_state("hdr"), TokenState::Positive);

    let text = session.toggle("hdr", &text);
    assert_eq!(text, "^(?=.*1080p)(?!.*hdr).*(FLUX|NTb)");

    let stored = session.into_selection();
    let json = serde_json::to_string(&stored).expect("serialize selection");
    let restored: Selection = serde_json::from_str(&json).expect("deserialize selection");
    let session = FilterSession::new(Engine::builtin(), restored);
    assert_eq!(session.refresh(&text), text);
}

#[test]
fn catalog_loads_from_user_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[[tokens]]\nkey = \"av1\"\nname = \"AV1\"\npatterns = ['av1']\n\n[[tokens]]\nkey = \"hdr10\"\nname = \"HDR10\"\npatterns = ['hdr10', 'hdr10plus']"
    )
    .expect("write temp file");

    let settings = Settings::from_file(file.path()).expect("settings load");
    let engine = Engine::new(&settings.catalog);
    assert_eq!(
        engine.compile(&["hdr10", "av1"], LogicMode::And, &Polarity::new()),
        "(?=.*(?:hdr10|hdr10plus))(?=.*av1)"
    );
}

#[test]
fn catalog_file_with_duplicate_keys_is_rejected() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[[tokens]]\nkey = \"av1\"\nname = \"AV1\"\npatterns = ['av1']\n\n[[tokens]]\nkey = \"av1\"\nname = \"AV1 again\"\npatterns = ['AV1']"
    )
    .expect("write temp file");

    let result = Settings::from_file(file.path());
    assert!(matches!(result, Err(CatalogError::DuplicateKey(key)) if key == "av1"));
}

#[fixture]
fn grouped_catalog() -> Catalog {
    Catalog::new(vec![
        Token::new("hdr10", "HDR10", [r"hdr10(?:\+|plus)?"]),
        Token::new("dv", "Dolby Vision", [r"\bdv\b", r"dolby(?:\.|\s)?vision"]),
    ])
    .expect("valid catalog")
}

#[rstest]
#[case(LogicMode::Or)]
#[case(LogicMode::And)]
fn grouped_patterns_embed_without_accumulating(
    grouped_catalog: Catalog,
    #[case] mode: LogicMode,
) {
    let engine = Engine::new(&grouped_catalog);
    let entries = polarity(&[("dv", false)]);
    let fragment = engine.compile(&["hdr10", "dv"], mode, &entries);

    let once = engine.embed("foo", &fragment, mode);
    let twice = engine.embed(&once, &fragment, mode);
    assert_eq!(twice, once);
    assert_eq!(engine.strip(&once), "foo");
    assert_eq!(engine.strip(&engine.embed("", &fragment, mode)), "");
}

#[rstest]
fn grouped_patterns_survive_toggling(grouped_catalog: Catalog) {
    let mut session = FilterSession::new(Engine::new(&grouped_catalog), Selection::default());

    let text = session.toggle("hdr10", "foo");
    assert_eq!(text, r"foo|(hdr10(?:\+|plus)?)");
    let text = session.toggle("dv", &text);
    assert_eq!(
        text,
        r"foo|(hdr10(?:\+|plus)?|\bdv\b|dolby(?:\.|\s)?vision)"
    );
    let text = session.toggle("hdr10", &text);
    let text = session.toggle("dv", &text);
    assert_eq!(text, "foo");
}
