//! Key name pattern matching
//!
//! Shell-style globs over key names, built on the glob crate.
//! Only `*` (any run) and `?` (one character) are wildcards; every other
//! character, brackets included, matches literally. Matching is anchored
//! and case-insensitive.

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled key pattern
#[derive(Debug, Clone)]
pub enum KeyPattern {
    /// Empty pattern, matches every key
    Any,
    Glob(Pattern),
    /// Pattern that failed to compile, matches nothing
    Never,
}

impl KeyPattern {
    pub fn compile(pattern: &str) -> Self {
        if pattern.is_empty() {
            return KeyPattern::Any;
        }

        let translated = translate(&pattern.to_lowercase());
        match Pattern::new(&translated) {
            Ok(compiled) => KeyPattern::Glob(compiled),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "key pattern did not compile, matching nothing");
                KeyPattern::Never
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            KeyPattern::Any => true,
            KeyPattern::Glob(pattern) => pattern.matches_with(&name.to_lowercase(), MATCH_OPTIONS),
            KeyPattern::Never => false,
        }
    }
}

/// Escape everything except `*` and `?` so the glob crate treats it literally.
/// Runs of `*` collapse to one; the glob crate reads `**` as a path wildcard.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut literal = String::new();

    for c in pattern.chars() {
        if c == '*' || c == '?' {
            if !literal.is_empty() {
                out.push_str(&Pattern::escape(&literal));
                literal.clear();
            } else if c == '*' && out.ends_with('*') {
                continue;
            }
            out.push(c);
        } else {
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        out.push_str(&Pattern::escape(&literal));
    }

    out
}

/// Match a single key name against a glob pattern
///
/// # Examples
/// ```
/// use keytui::logic::pattern::glob_matches;
///
/// assert!(glob_matches("user:*", "USER:42"));
/// assert!(glob_matches("cache:?", "cache:a"));
/// assert!(!glob_matches("cache:?", "cache:ab"));
/// assert!(glob_matches("", "anything"));
/// ```
pub fn glob_matches(pattern: &str, name: &str) -> bool {
    KeyPattern::compile(pattern).matches(name)
}
