use commit_digest_core::matcher::{FilterSet, Group, Matcher, TokenPosition};

struct TestCase {
    name: &'static str,
    matcher: Matcher,
    line: &'static str,
    expected: bool,
}

#[test]
fn test_matcher_positions_and_negation_table_driven() {
    let test_cases = vec![
        TestCase {
            name: "start matches prefix",
            matcher: Matcher::starts_with("diff "),
            line: "diff --git a/x.rs b/x.rs",
            expected: true,
        },
        TestCase {
            name: "start does not match later occurrence",
            matcher: Matcher::starts_with("diff "),
            line: " diff --git",
            expected: false,
        },
        TestCase {
            name: "negated start passes when prefix is absent",
            matcher: Matcher::starts_with("diff ").negated(),
            line: "+fn main() {}",
            expected: true,
        },
        TestCase {
            name: "negated start fails when prefix is present",
            matcher: Matcher::starts_with("diff ").negated(),
            line: "diff --git a/x.rs",
            expected: false,
        },
        TestCase {
            name: "end matches suffix",
            matcher: Matcher::ends_with(".toml"),
            line: "diff --git a/Cargo.toml b/Cargo.toml",
            expected: true,
        },
        TestCase {
            name: "end ignores inner occurrence",
            matcher: Matcher::ends_with(".toml"),
            line: "a.toml.bak",
            expected: false,
        },
        TestCase {
            name: "anywhere finds substring",
            matcher: Matcher::contains("[package]"),
            line: "+[package]",
            expected: true,
        },
        TestCase {
            name: "negated anywhere fails on substring",
            matcher: Matcher::contains(".rs").negated(),
            line: "diff --git a/src/lib.rs b/src/lib.rs",
            expected: false,
        },
        TestCase {
            name: "line shorter than pattern",
            matcher: Matcher::starts_with("commit "),
            line: "com",
            expected: false,
        },
    ];

    for case in test_cases {
        assert_eq!(
            case.matcher.evaluate(case.line),
            case.expected,
            "case '{}' failed",
            case.name
        );
    }
}

#[test]
fn test_double_negation_restores_matcher() {
    let m = Matcher::contains("x").negated().negated();
    assert!(!m.negate);
    assert!(m.evaluate("xyz"));
}

#[test]
fn test_group_is_strict_and() {
    let group = Group::new(vec![
        Matcher::starts_with("diff "),
        Matcher::contains(".rs").negated(),
    ]);

    assert!(group.passes("diff --git a/Cargo.toml b/Cargo.toml"));
    assert!(!group.passes("diff --git a/src/main.rs b/src/main.rs"));
    assert!(!group.passes("index 1234..5678"));
}

#[test]
fn test_empty_group_passes_vacuously() {
    assert!(Group::default().passes("anything"));
}

#[test]
fn test_filter_set_is_or_of_groups() {
    let filters = FilterSet::new(vec![
        Matcher::contains("[package]").into(),
        Group::new(vec![
            Matcher::starts_with("diff "),
            Matcher::contains(".rs").negated(),
        ]),
    ]);

    assert!(filters.passes("[package]"));
    assert!(filters.passes("diff --git a/README.md b/README.md"));
    assert!(!filters.passes("diff --git a/src/lib.rs b/src/lib.rs"));
    assert!(!filters.passes("+let x = 1;"));
}

#[test]
fn test_empty_filter_set_never_passes() {
    let filters = FilterSet::default();
    for line in ["", "commit 1", "diff --git a/x", "[package]"] {
        assert!(!filters.passes(line), "empty filter set passed {line:?}");
    }
}

#[test]
fn test_matcher_deserializes_with_defaults() {
    let yaml = r#"
- - pattern: "[package]"
- - pattern: "diff "
    position: start
  - pattern: ".rs"
    negate: true
"#;
    let filters: FilterSet = serde_yaml::from_str(yaml).expect("valid filter yaml");
    assert_eq!(filters.groups.len(), 2);
    assert_eq!(filters.groups[0].matchers[0].position, TokenPosition::Anywhere);
    assert!(!filters.groups[0].matchers[0].negate);
    assert_eq!(filters.groups[1].matchers[0].position, TokenPosition::Start);
    assert!(filters.groups[1].matchers[1].negate);
}
