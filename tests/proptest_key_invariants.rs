//! Property-based invariant tests for keys, patterns and names.
//!
//! 1. The textual key format round-trips
//! 2. Non-canonical parameters compare as a set, wherever they sit in the chain
//! 3. Equal keys hash equal
//! 4. Parsing a built name binds the same values as matching the key
//! 5. Policy names list non-canonical values, then the canonical path
//! 6. Compiling arbitrary text never panics, and what compiles can match strings

use lexical_keys::key::format::parse_key;
use lexical_keys::{compile, match_key, match_string, Key, KeyError, NamePolicy, ParameterInfos};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

type Parts = Vec<(&'static str, String)>;

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}"
}

fn canonical_parts() -> impl Strategy<Value = Parts> {
    prop::collection::vec(
        (prop::sample::select(vec!["Section", "Location", "Key"]), value()),
        0..6,
    )
}

/// Distinct non-canonical parameters, in a fixed order.
fn non_canonical_parts() -> impl Strategy<Value = Parts> {
    (
        prop::option::of("[a-z]{2,3}"),
        prop::option::of(value()),
        prop::option::of(value()),
    )
        .prop_map(|(culture, type_, assembly)| {
            let mut parts = Vec::new();
            if let Some(culture) = culture {
                parts.push(("Culture", culture));
            }
            if let Some(type_) = type_ {
                parts.push(("Type", type_));
            }
            if let Some(assembly) = assembly {
                parts.push(("Assembly", assembly));
            }
            parts
        })
}

/// Names and values that need escaping in the textual format.
fn escaped_parts() -> impl Strategy<Value = Parts> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["Culture", "Type", "Section", "Key", "Custom"]),
            "[a-z:\\\\]{0,6}",
        ),
        0..8,
    )
}

fn build(parts: &[(&str, String)]) -> Key {
    parts.iter().fold(Key::root(), |key, (name, value)| {
        key.parameter(name, value.as_str()).unwrap()
    })
}

/// Insert each non-canonical part at a pseudo-random position.
fn interleave(canonical: &Parts, non_canonical: &Parts, seeds: &[usize]) -> Parts {
    let mut parts = canonical.clone();
    for (part, seed) in non_canonical.iter().rev().zip(seeds.iter().cycle()) {
        let at = seed % (parts.len() + 1);
        parts.insert(at, part.clone());
    }
    parts
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Textual format round-trips
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn key_text_round_trips(parts in escaped_parts()) {
        let key = build(&parts);
        let text = key.to_string();
        let parsed = parse_key(&text, ParameterInfos::global()).unwrap();

        prop_assert_eq!(parsed.to_string(), text);
        prop_assert_eq!(parsed.len(), parts.len());
        prop_assert_eq!(&parsed, &key);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Identity: set semantics for non-canonical, equal keys hash equal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_canonical_position_is_irrelevant(
        canonical in canonical_parts(),
        non_canonical in non_canonical_parts(),
        seeds in prop::collection::vec(any::<usize>(), 1..4),
    ) {
        let mut grouped = non_canonical.clone();
        grouped.extend(canonical.iter().cloned());

        let a = build(&grouped);
        let b = build(&interleave(&canonical, &non_canonical, &seeds));
        let comparer = lexical_keys::KeyComparer::default_comparer();

        prop_assert!(comparer.equals(&a, &b));
        prop_assert_eq!(comparer.hash(&a), comparer.hash(&b));
    }

    #[test]
    fn canonical_order_is_significant(
        canonical in canonical_parts(),
        non_canonical in non_canonical_parts(),
    ) {
        let mut reversed = canonical.clone();
        reversed.reverse();
        prop_assume!(reversed != canonical);

        let mut a = non_canonical.clone();
        a.extend(canonical);
        let mut b = non_canonical;
        b.extend(reversed);

        prop_assert_ne!(build(&a), build(&b));
    }

    #[test]
    fn hash_is_stable(parts in canonical_parts(), non_canonical in non_canonical_parts()) {
        let mut all = non_canonical;
        all.extend(parts);
        let comparer = lexical_keys::KeyComparer::default_comparer();

        // Two independently built chains: one hash is cached, one is not.
        let a = build(&all);
        let first = comparer.hash(&a);
        prop_assert_eq!(comparer.hash(&a), first);
        prop_assert_eq!(comparer.hash(&build(&all)), first);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Parse(build(key)) binds what match(key) binds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn string_and_key_matches_agree(
        culture in prop::option::of("[a-z]{2,3}"),
        type_ in prop::option::of(value()),
        sections in prop::collection::vec(value(), 0..=2),
        key_value in value(),
    ) {
        let pattern = compile("{Culture/}{Type:}{Section_0.}{Section_1.}[Key]").unwrap();

        let mut key = Key::root();
        if let Some(culture) = &culture {
            key = key.culture(culture.as_str());
        }
        if let Some(type_) = &type_ {
            key = key.type_(type_.as_str());
        }
        for section in &sections {
            key = key.section(section.as_str());
        }
        let key = key.key(key_value.as_str());

        let from_key = match_key(&pattern, &key);
        prop_assert!(from_key.success());
        let name = from_key.render().unwrap().to_string();

        let from_string = match_string(&pattern, &name).unwrap();
        prop_assert_eq!(from_string.values(), from_key.values());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Policy layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn policy_name_layout(canonical in canonical_parts(), non_canonical in non_canonical_parts()) {
        let mut parts = non_canonical.clone();
        parts.extend(canonical.iter().cloned());
        let name = NamePolicy::dotted().build_name(&build(&parts));

        let expected: Vec<&str> = non_canonical
            .iter()
            .chain(canonical.iter())
            .map(|(_, value)| value.as_str())
            .collect();
        prop_assert_eq!(name, expected.join("."));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Compilation never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn compile_never_panics(text in "[{}\\[\\]<>a-zA-Z_0-9:./\\\\()+*]{0,24}") {
        match compile(&text) {
            Ok(pattern) => {
                prop_assert_eq!(pattern.text(), text.as_str());
                // A pattern that compiles can always match strings.
                prop_assert!(
                    pattern.composite_regex().is_ok(),
                    "composite regex of {:?} failed to build",
                    text
                );
            }
            Err(KeyError::PatternSyntax(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
