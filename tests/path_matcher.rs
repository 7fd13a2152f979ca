// tests/path_matcher.rs

use proptest::prelude::*;

use gowatch::errors::GowatchError;
use gowatch::watch::{is_ignored, matches, IgnoreSet};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn suffix_glob_matches_file_names() -> TestResult {
    assert!(matches("*_test.go", "main_test.go")?);
    assert!(!matches("*_test.go", "main.go")?);
    Ok(())
}

#[test]
fn star_does_not_cross_separators() -> TestResult {
    assert!(!matches("*.go", "pkg/main.go")?);
    assert!(matches("*/*.go", "pkg/main.go")?);
    assert!(matches("/tmp/*/*/main.go", "/tmp/a/b/main.go")?);
    assert!(!matches("/tmp/*/main.go", "/tmp/a/b/main.go")?);
    Ok(())
}

#[test]
fn question_mark_and_classes() -> TestResult {
    assert!(matches("ma?n.go", "main.go")?);
    assert!(!matches("ma?n.go", "maain.go")?);
    assert!(matches("[mn]ain.go", "nain.go")?);
    assert!(!matches("[mn]ain.go", "rain.go")?);
    Ok(())
}

#[test]
fn malformed_pattern_is_an_error() {
    match matches("[", "main.go") {
        Err(GowatchError::IgnorePattern { pattern, .. }) => assert_eq!(pattern, "["),
        other => panic!("expected IgnorePattern error, got {other:?}"),
    }
}

#[test]
fn is_ignored_short_circuits_left_to_right() -> TestResult {
    let patterns = vec!["*.go".to_string(), "[".to_string()];
    assert!(is_ignored(&patterns, "main.go")?);

    let patterns = vec!["[".to_string(), "*.go".to_string()];
    assert!(is_ignored(&patterns, "main.go").is_err());

    assert!(!is_ignored(&[], "main.go")?);
    Ok(())
}

#[test]
fn ignore_set_reports_first_matching_pattern() -> TestResult {
    let set = IgnoreSet::new(&[
        "vendor/**".to_string(),
        "*_test.go".to_string(),
        "*.go".to_string(),
    ])?;
    assert_eq!(set.first_match("main_test.go"), Some("*_test.go"));
    assert_eq!(set.first_match("vendor/x/y.go"), Some("vendor/**"));
    assert_eq!(set.first_match("README.md"), None);
    Ok(())
}

#[test]
fn ignore_set_rejects_malformed_patterns_up_front() {
    let err = IgnoreSet::new(&["ok.go".to_string(), "bad[".to_string()]).unwrap_err();
    assert!(matches!(err, GowatchError::IgnorePattern { ref pattern, .. } if pattern == "bad["));
}

proptest! {
    #[test]
    fn star_matches_any_single_segment(seg in "[a-z][a-z0-9_]{0,11}") {
        prop_assert!(matches("*", &seg).unwrap());
    }

    #[test]
    fn star_never_matches_multiple_segments(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        let path = format!("{a}/{b}");
        prop_assert!(!matches("*", &path).unwrap());
    }

    #[test]
    fn is_ignored_agrees_with_any_match(
        name in "[a-z]{1,8}(_test)?\\.(go|txt)",
        pick in proptest::collection::vec(0usize..4, 0..4),
    ) {
        let pool = ["*_test.go", "*.txt", "x*", "?.go"];
        let patterns: Vec<String> = pick.iter().map(|&i| pool[i].to_string()).collect();
        let any = patterns.iter().any(|p| matches(p, &name).unwrap());
        prop_assert_eq!(is_ignored(&patterns, &name).unwrap(), any);
    }
}
