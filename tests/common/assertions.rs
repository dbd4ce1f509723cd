//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating profile-stats command output,
//! error messages, and rendered artifacts.

#![allow(dead_code)]

use predicates::prelude::*;
use profile_stats::core::format::pad_line;

/// Creates a predicate that checks for the missing environment error message
pub fn missing_env() -> impl Predicate<str> {
    predicates::str::contains("ACCESS_TOKEN").and(predicates::str::contains("USER_NAME"))
}

/// Creates a predicate that checks for the colored error prefix
pub fn has_error_prefix() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

/// Creates a predicate that checks for a padded stat row
pub fn has_stat_row(label: &str, value: &str) -> impl Predicate<str> {
    predicates::str::contains(pad_line(label, value))
}

/// Creates a predicate that checks for a pull request line in the README
pub fn has_pr_link(glyph: &str, repo: &str, number: u64) -> impl Predicate<str> {
    predicates::str::contains(format!(
        "{glyph} [#{number}](https://github.com/{repo}/pull/{number})"
    ))
}
