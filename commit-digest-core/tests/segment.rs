use commit_digest_core::error::ConfigError;
use commit_digest_core::matcher::{FilterSet, Group, Matcher};
use commit_digest_core::segment::{segment, SegmentRules, Segmenter};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|l| l.to_string()).collect()
}

#[test]
fn test_manifest_section_is_suppressed_and_recording_resumes() {
    let input = [
        "commit 1",
        "diff --git a/x.rs",
        "foo",
        "diff --git a/x.toml",
        "[package]",
        "bar",
        "diff --git a/y.rs",
        "baz",
    ];

    let result = segment(&SegmentRules::default(), input).unwrap();

    assert_eq!(result.commits.len(), 1);
    assert_eq!(
        result.commits[0].lines,
        lines(&["commit 1", "diff --git a/x.rs", "foo", "diff --git a/y.rs", "baz"])
    );
    assert_eq!(result.commits[0].lines_seen, input.len());
}

#[test]
fn test_two_commits_do_not_overlap() {
    let input = [
        "commit 1",
        "Author: a",
        "diff --git a/a.rs b/a.rs",
        "+a",
        "commit 2",
        "Author: b",
        "diff --git a/b.rs b/b.rs",
        "+b",
    ];

    let result = segment(&SegmentRules::default(), input).unwrap();

    assert_eq!(result.commits.len(), 2);
    assert_eq!(result.commits[0].index, 0);
    assert_eq!(result.commits[1].index, 1);
    assert_eq!(
        result.commits[0].lines,
        lines(&["commit 1", "Author: a", "diff --git a/a.rs b/a.rs", "+a"])
    );
    assert_eq!(
        result.commits[1].lines,
        lines(&["commit 2", "Author: b", "diff --git a/b.rs b/b.rs", "+b"])
    );
    for line in &result.commits[0].lines {
        assert!(!result.commits[1].lines.contains(line));
    }
    let total: usize = result.commits.iter().map(|c| c.lines.len()).sum();
    assert_eq!(total, result.lines_recorded());
    assert_eq!(total, input.len());
}

#[test]
fn test_no_boundary_yields_no_commits() {
    let input = ["diff --git a/x.rs", "foo", "[package]", "bar"];

    let result = segment(&SegmentRules::default(), input).unwrap();

    assert!(result.commits.is_empty());
    assert_eq!(result.preamble_dropped, input.len());
    assert_eq!(result.lines_recorded(), 0);
}

#[test]
fn test_suppression_wins_over_reset_on_same_line() {
    let rules = SegmentRules::default();
    let mut segmenter = Segmenter::new(&rules).unwrap();

    segmenter.push("commit 1");
    assert!(segmenter.is_recording());

    // Passes the reset rule (starts with "diff ") and the non-.rs filter group.
    segmenter.push("diff --git a/README.md b/README.md");
    assert!(!segmenter.is_recording());
    assert_eq!(segmenter.commits()[0].lines, lines(&["commit 1"]));

    segmenter.push("+docs");
    assert!(!segmenter.is_recording());

    segmenter.push("diff --git a/src/lib.rs b/src/lib.rs");
    assert!(segmenter.is_recording());

    let result = segmenter.finish();
    assert_eq!(
        result.commits[0].lines,
        lines(&["commit 1", "diff --git a/src/lib.rs b/src/lib.rs"])
    );
    assert_eq!(result.commits[0].lines_seen, 4);
}

#[test]
fn test_suppression_carries_across_commit_boundary_until_reset() {
    let input = [
        "commit 1",
        "diff --git a/Cargo.toml b/Cargo.toml",
        "+x",
        "commit 2",
        "Author: b",
        "diff --git a/b.rs b/b.rs",
    ];

    let result = segment(&SegmentRules::default(), input).unwrap();

    assert_eq!(result.commits.len(), 2);
    assert_eq!(result.commits[0].lines, lines(&["commit 1"]));
    // The boundary line itself is not a reset, so recording stays off.
    assert_eq!(result.commits[1].lines, lines(&["diff --git a/b.rs b/b.rs"]));
    assert_eq!(result.commits[1].lines_seen, 3);
}

#[test]
fn test_preamble_before_first_commit_is_dropped() {
    let input = ["warning: something", "", "commit abc", "body"];

    let result = segment(&SegmentRules::default(), input).unwrap();

    assert_eq!(result.preamble_dropped, 2);
    assert_eq!(result.commits.len(), 1);
    assert_eq!(result.commits[0].lines, lines(&["commit abc", "body"]));
}

#[test]
fn test_empty_filters_record_everything_after_boundary() {
    let rules = SegmentRules {
        filters: FilterSet::default(),
        ..SegmentRules::default()
    };
    let input = ["commit 1", "diff --git a/Cargo.toml", "[package]", "name = \"x\""];

    let result = segment(&rules, input).unwrap();

    assert_eq!(result.commits[0].lines, lines(&input));
}

#[test]
fn test_independent_passes_do_not_share_state() {
    let rules = SegmentRules::default();
    let mut first = Segmenter::new(&rules).unwrap();
    let mut second = Segmenter::new(&rules).unwrap();

    first.push("commit 1");
    first.push("diff --git a/Cargo.toml b/Cargo.toml");
    second.push("commit 9");
    second.push("+line");

    assert!(!first.is_recording());
    assert!(second.is_recording());
    assert_eq!(second.finish().commits[0].lines, lines(&["commit 9", "+line"]));
}

#[test]
fn test_invalid_rules_are_rejected_before_processing() {
    let empty_token = SegmentRules {
        commit_token: String::new(),
        ..SegmentRules::default()
    };
    assert_eq!(
        segment(&empty_token, ["commit 1"]).unwrap_err(),
        ConfigError::EmptyCommitToken
    );

    let empty_reset = SegmentRules {
        reset: Group::default(),
        ..SegmentRules::default()
    };
    assert_eq!(
        Segmenter::new(&empty_reset).unwrap_err(),
        ConfigError::EmptyResetRule
    );

    let empty_filter_pattern = SegmentRules {
        filters: FilterSet::new(vec![Matcher::contains("").into()]),
        ..SegmentRules::default()
    };
    assert_eq!(
        empty_filter_pattern.validate().unwrap_err(),
        ConfigError::EmptyPattern {
            rule: "filters[0]".to_string()
        }
    );

    let empty_filter_group = SegmentRules {
        filters: FilterSet::new(vec![Matcher::contains("[package]").into(), Group::default()]),
        ..SegmentRules::default()
    };
    assert_eq!(
        segment(&empty_filter_group, ["commit 1", "diff --git a/x.rs", "+foo"]).unwrap_err(),
        ConfigError::EmptyFilterGroup { index: 1 }
    );
}
