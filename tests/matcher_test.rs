//! Integration tests for key and string matching.

use anyhow::Result;
use lexical_keys::{
    build_name, compile, match_key, match_keys, match_string, BatchConfig, Key, ParameterInfos,
};

#[test]
fn test_required_part_gating() {
    let pattern = compile("[Key]").unwrap();

    let missing = match_key(&pattern, &Key::root().culture("fi").section("Errors"));
    assert!(!missing.success());
    assert_eq!(missing.render(), None);

    let present = match_key(&pattern, &Key::root().key("Success"));
    assert!(present.success());
    assert_eq!(present.get("Key"), Some("Success"));
}

#[test]
fn test_last_occurrence_repair() {
    let pattern = compile("{Section_0.}{Section_1.}[Section_n]").unwrap();
    let key = Key::root().section("A").section("B").section("C");

    let m = match_key(&pattern, &key);
    assert_eq!(m.get("Section_0"), Some("A"));
    assert_eq!(m.get("Section_1"), Some("B"));
    assert_eq!(m.get("Section_n"), Some("C"));
    assert!(m.success());

    // No value is left behind in a numbered slot when the last slot is filled
    // by repair.
    let short = match_key(&pattern, &Key::root().section("A").section("B"));
    assert_eq!(short.values_of("Section"), vec!["A", "B"]);
    assert_eq!(short.get("Section_n"), Some("B"));
    assert_eq!(short.filled(), 2);
}

#[test]
fn test_end_to_end_name() {
    let pattern = compile("{Culture:}{Type:}{anysection_n:}[Key]").unwrap();
    let key = Key::root()
        .culture("fi")
        .type_("ConsoleApp1.MyController")
        .key("Success");

    assert_eq!(
        build_name(&pattern, &key).as_deref(),
        Some("fi:ConsoleApp1.MyController:Success")
    );
}

#[test]
fn test_any_section_accepts_section_like_parameters() {
    let pattern = compile("{anysection_0/}{anysection_1/}[Key]").unwrap();
    let key = Key::root().assembly("App").resource("Strings").key("Title");

    let m = match_key(&pattern, &key);
    assert_eq!(m.get("anysection_0"), Some("App"));
    assert_eq!(m.get("anysection_1"), Some("Strings"));
    assert_eq!(m.render(), Some("App/Strings/Title"));

    // A parameter with its own part never falls back to anysection.
    let typed = compile("{Type/}{anysection/}[Key]").unwrap();
    let m = match_key(&typed, &Key::root().type_("T").key("K"));
    assert_eq!(m.get("Type"), Some("T"));
    assert_eq!(m.get("anysection"), None);

    // Culture is not section-like.
    let m = match_key(&pattern, &Key::root().culture("fi").key("K"));
    assert_eq!(m.filled(), 1);
}

#[test]
fn test_left_most_type_wins() {
    let pattern = compile("{Type:}[Key]").unwrap();
    let key = Key::root().type_("Bar").type_("Foo").key("Ok");

    assert_eq!(build_name(&pattern, &key).as_deref(), Some("Foo:Ok"));
}

#[test]
fn test_match_string_round_trip() -> Result<()> {
    let pattern = compile("{Culture:}{Type:}{anysection_n:}[Key]")?;
    let keys = [
        Key::root().culture("fi").type_("ConsoleApp1.MyController").key("Success"),
        Key::root().type_("Ctrl").section("Errors").key("NotFound"),
        Key::root().key("Plain"),
    ];

    for key in &keys {
        let from_key = match_key(&pattern, key);
        let name = from_key.render().expect("key fills every required part");
        let from_string = match_string(&pattern, name)?;
        assert_eq!(from_string.values(), from_key.values(), "name {name:?}");
    }
    Ok(())
}

#[test]
fn test_match_string_to_key() -> Result<()> {
    let pattern = compile("{Culture/}{anysection.}[Key].json")?;
    let m = match_string(&pattern, "en-US/Errors.NotFound.json")?;

    let key = m.to_key(ParameterInfos::global())?;
    assert_eq!(key, Key::root().culture("en-US").section("Errors").key("NotFound"));
    Ok(())
}

#[test]
fn test_non_matching_string_is_not_an_error() -> Result<()> {
    let pattern = compile("[Key].json")?;
    let m = match_string(&pattern, "Key.yaml")?;

    assert!(!m.success());
    assert!(m.values().iter().all(Option::is_none));
    assert_eq!(m.to_string(), "");
    Ok(())
}

#[test]
fn test_pattern_match_serializes() -> Result<()> {
    let pattern = compile("{Culture/}[Key]")?;
    let m = match_string(&pattern, "fi/Title")?;

    let json = serde_json::to_string(&m)?;
    assert_eq!(
        json,
        r#"{"success":true,"parameters":{"Culture":"fi","Key":"Title"}}"#
    );
    Ok(())
}

#[test]
fn test_batch_matching() {
    let pattern = compile("{Culture/}{Section.}[Key]").unwrap();
    let keys: Vec<Key> = (0..500)
        .map(|i| Key::root().culture("fi").section(format!("S{}", i % 7)).key(format!("K{i}")))
        .collect();

    let results = match_keys(&pattern, &keys, &BatchConfig::default());
    assert_eq!(results.len(), keys.len());
    for (i, m) in results.iter().enumerate() {
        assert_eq!(m.render(), Some(format!("fi/S{}.K{i}", i % 7).as_str()));
    }
}
