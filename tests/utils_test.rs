use std::path::{Path, PathBuf};

use reddit_get::{error::Error, utils::*};

#[test]
fn test_validate_limit_accepts_range() {
    for limit in 1..=25 {
        assert_eq!(validate_limit(limit).unwrap(), limit as u32);
    }
}

#[test]
fn test_validate_limit_rejects_out_of_range() {
    for limit in [-1, i64::MIN, 0, 26, 100, i64::from(u32::MAX) + 1] {
        assert!(matches!(validate_limit(limit), Err(Error::InvalidLimit(l)) if l == limit));
    }
}

#[test]
fn test_validate_limit_negative_message() {
    let err = validate_limit(-1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "You may only get between 1 and 25 submissions (got -1)"
    );
}

#[test]
fn test_subreddit_name() {
    assert_eq!(subreddit_name("rust"), "rust");
    assert_eq!(subreddit_name("r/rust"), "rust");
    assert_eq!(subreddit_name("  r/rust \n"), "rust");
    assert_eq!(subreddit_name("  "), "");
}

#[test]
fn test_get_response_with_header() {
    let response = get_response(
        Some("header".to_string()),
        vec!["- one".to_string(), "- two".to_string()],
    );
    assert_eq!(response, vec!["header", "- one", "- two"]);
}

#[test]
fn test_get_response_without_header() {
    let posts = vec!["- one".to_string(), "- two".to_string()];
    assert_eq!(get_response(None, posts.clone()), posts);
    assert_eq!(get_response(Some(String::new()), posts.clone()), posts);
}

#[test]
fn test_expand_home() {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    assert_eq!(expand_home("~/.redditgetrc"), home.join(".redditgetrc"));
    assert_eq!(expand_home("~"), home);
    assert_eq!(expand_home("tests/config"), PathBuf::from("tests/config"));
    assert_eq!(expand_home("/etc/redditgetrc"), PathBuf::from("/etc/redditgetrc"));
}

#[test]
fn test_absolute_path() {
    let relative = absolute_path(Path::new("tests/fixtures/exampleconfig")).unwrap();
    assert!(relative.is_absolute());
    assert!(relative.ends_with("tests/fixtures/exampleconfig"));
}
