//! Path filtering logic for archive creation.
//!
//! Ignore rules are shell-style globs evaluated against the traversal path
//! of each candidate. `*` and `?` never cross a `/`, and a run of `**` is
//! an ordinary `*`, so there is no recursive wildcard.

use crate::ArchiveError;
use crate::Result;
use globset::GlobBuilder;
use globset::GlobMatcher;
use std::path::Component;
use std::path::Path;

/// An ordered set of ignore rules built for a single archive operation.
///
/// Rules are evaluated in insertion order and the first match wins. A rule
/// whose pattern contains no `/` also matches the last component of the
/// candidate, so `*.log` excludes `logs/today.log` as well as `today.log`.
///
/// Malformed patterns are dropped when the set is built and never match.
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::filters::IgnoreSet;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::new(&["*.log", "target"]);
/// assert!(ignore.matches(Path::new("./app.log")));
/// assert!(ignore.matches(Path::new("project/target")));
/// assert!(!ignore.matches(Path::new("src/main.rs")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    rules: Vec<IgnoreRule>,
}

#[derive(Debug, Clone)]
enum IgnoreRule {
    Glob {
        matcher: GlobMatcher,
        anchored: bool,
    },
    Literal(String),
}

impl IgnoreRule {
    fn matches(&self, full: &str, name: &str) -> bool {
        match self {
            Self::Glob { matcher, anchored } => {
                matcher.is_match(full) || (!anchored && matcher.is_match(name))
            }
            Self::Literal(path) => path == full,
        }
    }
}

impl IgnoreSet {
    /// Builds a set from glob patterns, keeping their order.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut set = Self::default();
        for pattern in patterns {
            set.push_pattern(pattern.as_ref());
        }
        set
    }

    /// Appends a glob pattern. Malformed patterns are skipped.
    pub fn push_pattern(&mut self, pattern: &str) {
        let collapsed = collapse_stars(pattern);
        let glob = GlobBuilder::new(&collapsed)
            .literal_separator(true)
            .backslash_escape(true)
            .build();

        match glob {
            Ok(glob) => self.rules.push(IgnoreRule::Glob {
                matcher: glob.compile_matcher(),
                anchored: pattern.contains('/'),
            }),
            Err(e) => log::debug!("ignoring malformed pattern {pattern:?}: {e}"),
        }
    }

    /// Appends a path that must be excluded verbatim.
    ///
    /// The rule matches only the whole traversal path, even when `path` is a
    /// bare file name. Glob metacharacters in `path` have no special meaning.
    pub fn push_literal(&mut self, path: &Path) {
        let text = path.to_string_lossy();
        self.rules
            .push(IgnoreRule::Literal(strip_current_dir(&text).to_string()));
    }

    /// Returns a copy of this set with `path` added as a literal rule.
    #[must_use]
    pub fn with_literal(mut self, path: &Path) -> Self {
        self.push_literal(path);
        self
    }

    /// Returns `true` if `path` is excluded by any rule.
    pub fn matches(&self, path: &Path) -> bool {
        if self.rules.is_empty() {
            return false;
        }

        let text = path.to_string_lossy();
        let full = strip_current_dir(&text);
        let name = full.rsplit('/').next().unwrap_or(full);

        self.rules.iter().any(|rule| rule.matches(full, name))
    }

    /// Number of usable rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set has no usable rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Returns `true` if `path` matches any of `patterns`.
///
/// Convenience wrapper that builds a one-off [`IgnoreSet`].
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::filters;
/// use std::path::Path;
///
/// assert!(filters::matches_any(Path::new("./build"), &["build"]));
/// assert!(filters::matches_any(Path::new("a.tmp"), &["[", "*.tmp"]));
/// assert!(!filters::matches_any(Path::new("src/lib.rs"), &["*.tmp"]));
/// ```
pub fn matches_any<S: AsRef<str>>(path: &Path, patterns: &[S]) -> bool {
    IgnoreSet::new(patterns).matches(path)
}

/// Converts a traversal path into the name stored in the archive.
///
/// Components are joined with `/`. Root and `.` components are dropped,
/// since tar only stores relative names; the result may be empty. A `..`
/// cancels the component before it (`work/../data` becomes `data`) without
/// consulting the filesystem, and is a no-op at the root of an absolute path.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidEntryName`] if a relative path climbs above
/// its first component (`../proj`), has a Windows prefix, or has a component
/// that is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use dirpack_core::creation::filters::entry_name;
/// use std::path::Path;
///
/// assert_eq!(entry_name(Path::new("./src/main.rs")).unwrap(), "src/main.rs");
/// assert_eq!(entry_name(Path::new("/srv/data")).unwrap(), "srv/data");
/// assert_eq!(entry_name(Path::new("work/../data/a")).unwrap(), "data/a");
/// assert!(entry_name(Path::new("../outside")).is_err());
/// ```
pub fn entry_name(path: &Path) -> Result<String> {
    let invalid = || ArchiveError::InvalidEntryName {
        path: path.to_path_buf(),
    };

    let absolute = path.has_root();
    let mut parts: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Prefix(_) => return Err(invalid()),
            Component::ParentDir => {
                if parts.pop().is_none() && !absolute {
                    return Err(invalid());
                }
            }
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
        }
    }
    Ok(parts.join("/"))
}

fn strip_current_dir(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Folds every run of unescaped `*` outside a character class into one.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut escaped = false;
    let mut prev_star = false;

    for c in pattern.chars() {
        if escaped {
            escaped = false;
            prev_star = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '*' if !in_class => {
                if prev_star {
                    continue;
                }
                prev_star = true;
                out.push(c);
                continue;
            }
            _ => {}
        }
        prev_star = false;
        out.push(c);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Allow unwrap in tests for brevity
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact() {
        assert!(matches_any(Path::new("build"), &["build"]));
        assert!(!matches_any(Path::new("builder"), &["build"]));
    }

    #[test]
    fn test_strips_leading_current_dir_once() {
        assert!(matches_any(Path::new("./notes.txt"), &["notes.txt"]));
        assert!(matches_any(Path::new("./src/lib.rs"), &["src/*.rs"]));
        assert!(!matches_any(Path::new("././src/lib.rs"), &["src/*.rs"]));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        assert!(matches_any(Path::new("src/lib.rs"), &["src/*"]));
        assert!(!matches_any(Path::new("src/a/lib.rs"), &["src/*"]));
        assert!(!matches_any(Path::new("src/a/lib.rs"), &["src/*.rs"]));
    }

    #[test]
    fn test_double_star_is_not_recursive() {
        assert!(!matches_any(Path::new("a/x/y/b"), &["a/**/b"]));
        assert!(matches_any(Path::new("a/x/b"), &["a/**/b"]));
        assert!(matches_any(Path::new("file.log"), &["**.log"]));
    }

    #[test]
    fn test_question_mark_and_classes() {
        assert!(matches_any(Path::new("data1.csv"), &["data?.csv"]));
        assert!(!matches_any(Path::new("data10.csv"), &["data?.csv"]));
        assert!(matches_any(Path::new("v2"), &["v[0-9]"]));
        assert!(!matches_any(Path::new("vx"), &["v[0-9]"]));
        assert!(matches_any(Path::new("vx"), &["v[!0-9]"]));
        assert!(matches_any(Path::new("vx"), &["v[^0-9]"]));
    }

    #[test]
    fn test_unanchored_pattern_matches_base_name() {
        assert!(matches_any(Path::new("logs/2024/app.log"), &["*.log"]));
        assert!(matches_any(Path::new("/abs/path/.git"), &[".git"]));
        assert!(!matches_any(Path::new("logs/app.log.gz"), &["*.log"]));
    }

    #[test]
    fn test_anchored_pattern_needs_full_path() {
        assert!(matches_any(Path::new("logs/app.log"), &["logs/*.log"]));
        assert!(!matches_any(Path::new("var/logs/app.log"), &["logs/*.log"]));
    }

    #[test]
    fn test_malformed_pattern_never_matches() {
        assert!(!matches_any(Path::new("["), &["["]));
        assert!(!matches_any(Path::new("a"), &["[a"]));
        assert!(matches_any(Path::new("a"), &["[a", "a"]));
        assert!(IgnoreSet::new(&["[unclosed"]).is_empty());
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = IgnoreSet::new::<&str>(&[]);
        assert!(set.is_empty());
        assert!(!set.matches(Path::new("anything")));
    }

    #[test]
    fn test_literal_rule_ignores_metacharacters() {
        let set = IgnoreSet::default().with_literal(Path::new("out[1].tgz"));
        assert!(set.matches(Path::new("out[1].tgz")));
        assert!(set.matches(Path::new("./out[1].tgz")));
        assert!(!set.matches(Path::new("out1.tgz")));
    }

    #[test]
    fn test_bare_literal_does_not_match_nested_namesake() {
        let set = IgnoreSet::default().with_literal(Path::new("out.tgz"));
        assert!(set.matches(Path::new("./out.tgz")));
        assert!(!set.matches(Path::new("./sub/out.tgz")));
        assert!(!set.matches(Path::new("sub/deeper/out.tgz")));
    }

    #[test]
    fn test_anchored_literal_rule() {
        let set = IgnoreSet::default().with_literal(Path::new("./backup/out.tgz"));
        assert_eq!(set.len(), 1);
        assert!(set.matches(Path::new("backup/out.tgz")));
        assert!(set.matches(Path::new("./backup/out.tgz")));
        assert!(!set.matches(Path::new("other/out.tgz")));
    }

    #[test]
    fn test_literal_and_patterns_combine() {
        let set = IgnoreSet::new(&["*.tmp"]).with_literal(Path::new("/tmp/x/out.tgz"));
        assert_eq!(set.len(), 2);
        assert!(set.matches(Path::new("/tmp/x/out.tgz")));
        assert!(set.matches(Path::new("/tmp/x/scratch.tmp")));
        assert!(!set.matches(Path::new("/tmp/x/keep.txt")));
    }

    #[test]
    fn test_entry_name_normalization() {
        assert_eq!(entry_name(Path::new("src")).unwrap(), "src");
        assert_eq!(entry_name(Path::new("./src/a.txt")).unwrap(), "src/a.txt");
        assert_eq!(entry_name(Path::new("/var/data/a")).unwrap(), "var/data/a");
        assert_eq!(entry_name(Path::new("src/./a")).unwrap(), "src/a");
        assert_eq!(entry_name(Path::new(".")).unwrap(), "");
        assert_eq!(entry_name(Path::new("/")).unwrap(), "");
    }

    #[test]
    fn test_entry_name_resolves_parent_dir() {
        assert_eq!(entry_name(Path::new("work/../data")).unwrap(), "data");
        assert_eq!(entry_name(Path::new("a/b/../../c/d")).unwrap(), "c/d");
        assert_eq!(entry_name(Path::new("/tmp/x/../y")).unwrap(), "tmp/y");
        assert_eq!(entry_name(Path::new("/../srv")).unwrap(), "srv");
        assert_eq!(entry_name(Path::new("dir/..")).unwrap(), "");
    }

    #[test]
    fn test_entry_name_rejects_unresolvable_parent_dir() {
        for path in ["..", "../proj", "src/../../etc", "./../x"] {
            let err = entry_name(Path::new(path)).unwrap_err();
            assert!(matches!(err, ArchiveError::InvalidEntryName { .. }), "{path}");
        }
    }

    #[test]
    fn test_collapse_stars() {
        assert_eq!(collapse_stars("a/**/b"), "a/*/b");
        assert_eq!(collapse_stars("***.rs"), "*.rs");
        assert_eq!(collapse_stars("[**]"), "[**]");
        assert_eq!(collapse_stars(r"\**"), r"\**");
        assert_eq!(collapse_stars("plain"), "plain");
    }
}
