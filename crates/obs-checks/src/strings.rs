use obs_core::{ErrorInfo, ObsError, Predicate};
use regex::Regex;
use tracing::debug;

use crate::shared::check;

/// Holds when `s` is exactly `want` bytes long.
pub fn string_length(s: impl Into<String>, want: usize) -> Predicate {
    check(
        s.into(),
        move |s| s.len() == want,
        move |s| format!("expected length {want}, got {}", s.len()),
    )
}

/// Holds when `s` is empty.
pub fn empty_string(s: impl Into<String>) -> Predicate {
    string_length(s, 0)
}

/// Holds when `s` holds exactly `want` characters.
pub fn char_length(s: impl Into<String>, want: usize) -> Predicate {
    check(
        s.into(),
        move |s| s.chars().count() == want,
        move |s| format!("expected char length {want}, got {}", s.chars().count()),
    )
}

/// Holds when `s` starts with `prefix`.
pub fn has_prefix(s: impl Into<String>, prefix: impl Into<String>) -> Predicate {
    check(
        (s.into(), prefix.into()),
        |(s, prefix)| s.starts_with(prefix.as_str()),
        |(s, prefix)| format!("expected {s:?} to have prefix {prefix:?}"),
    )
}

/// Holds when `s` ends with `suffix`.
pub fn has_suffix(s: impl Into<String>, suffix: impl Into<String>) -> Predicate {
    check(
        (s.into(), suffix.into()),
        |(s, suffix)| s.ends_with(suffix.as_str()),
        |(s, suffix)| format!("expected {s:?} to have suffix {suffix:?}"),
    )
}

/// Holds when `s` contains `needle`.
pub fn contains_substring(s: impl Into<String>, needle: impl Into<String>) -> Predicate {
    check(
        (s.into(), needle.into()),
        |(s, needle)| s.contains(needle.as_str()),
        |(s, needle)| format!("expected {s:?} to contain {needle:?}"),
    )
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Holds when `got` equals `want` ignoring case.
pub fn equal_fold(got: impl Into<String>, want: impl Into<String>) -> Predicate {
    check(
        (got.into(), want.into()),
        |(got, want)| folded(got).eq(folded(want)),
        |(got, want)| format!("expected {want:?} (case-insensitive), got {got:?}"),
    )
}

/// Holds when `re` matches somewhere in `s`.
pub fn matches(s: impl Into<String>, re: Regex) -> Predicate {
    check(
        (s.into(), re),
        |(s, re)| re.is_match(s),
        |(s, re)| format!("expected {s:?} to match {:?}", re.as_str()),
    )
}

/// Compiles `pattern` and builds a [`matches`] predicate from it.
///
/// An invalid pattern is reported as [`ObsError::Pattern`] instead of
/// surfacing as a failed assertion.
pub fn matches_pattern(s: impl Into<String>, pattern: &str) -> Result<Predicate, ObsError> {
    let re = Regex::new(pattern).map_err(|err| {
        debug!(pattern, "rejected invalid pattern");
        ObsError::Pattern(
            ErrorInfo::new("obs_checks.invalid_pattern", err.to_string())
                .with_context("pattern", pattern)
                .with_hint("pass a precompiled Regex to `matches` to validate patterns up front"),
        )
    })?;
    Ok(matches(s, re))
}
