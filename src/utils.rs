use std::path::{Path, PathBuf};

use crate::{Res, error::Error};

pub const MAX_LIMIT: u32 = 25;

/// Accepts 1 to [`MAX_LIMIT`] posts, negative values included in the check.
pub fn validate_limit(limit: i64) -> Res<u32> {
    u32::try_from(limit)
        .ok()
        .filter(|l| (1..=MAX_LIMIT).contains(l))
        .ok_or(Error::InvalidLimit(limit))
}

/// Subreddit name without surrounding whitespace or a leading `r/`.
pub fn subreddit_name(raw: &str) -> &str {
    raw.trim().trim_start_matches("r/")
}

/// Puts the header (when there is a non-empty one) in front of the post lines.
pub fn get_response(header: Option<String>, posts: Vec<String>) -> Vec<String> {
    header
        .filter(|h| !h.is_empty())
        .into_iter()
        .chain(posts)
        .collect()
}

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if path == "~" {
        return home();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(path),
    }
}

/// Absolute form of `path`, relative paths resolved against the working directory.
pub fn absolute_path(path: &Path) -> Res<PathBuf> {
    Ok(std::path::absolute(path)?)
}
