// Suite path diffing - decides which suite headers became visible
// since the previously rendered result

/// One suite header line to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteHeader {
    pub name: String,
    /// 1-based indentation depth (suite index + 1).
    pub depth: usize,
}

/// Outcome of diffing the current suite path against the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuiteDiff {
    /// Headers that must be printed, outermost first.
    pub headers: Vec<SuiteHeader>,
    /// A blank line separates suite blocks when the path diverged at the root.
    pub separator: bool,
}

impl SuiteDiff {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Top-down path diff.
///
/// Walks `current` by index; at the first index that is beyond `previous`
/// or names a different suite, that entry and everything after it is new.
/// This never resumes matching a suffix, and a shrinking path produces no
/// closing lines on its own - the next divergence reprints from wherever
/// the prefixes first differ.
pub fn diff_suites(previous: &[String], current: &[String]) -> SuiteDiff {
    let mut diverged = false;
    let mut diff = SuiteDiff::default();

    for (index, name) in current.iter().enumerate() {
        if !diverged && previous.get(index) == Some(name) {
            continue;
        }
        if !diverged && index == 0 {
            diff.separator = true;
        }
        diverged = true;
        diff.headers.push(SuiteHeader {
            name: name.clone(),
            depth: index + 1,
        });
    }

    diff
}

/// Last-rendered suite path of one output stream.
///
/// After `enter(suite)` the tracker always equals `suite`, so the next
/// diff runs against the immediately preceding result's full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteTracker {
    current: Vec<String>,
}

impl SuiteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `suite` against the tracked path and advance to it.
    pub fn enter(&mut self, suite: &[String]) -> SuiteDiff {
        let diff = diff_suites(&self.current, suite);
        self.current = suite.to_vec();
        diff
    }

    /// Indentation depth of a leaf line under the tracked path.
    pub fn leaf_depth(&self) -> usize {
        self.current.len() + 1
    }

    /// Forget the tracked path (start of a fresh run).
    pub fn reset(&mut self) {
        self.current.clear();
    }

    pub fn path(&self) -> &[String] {
        &self.current
    }
}

/// Two spaces per depth level.
pub fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_path_produces_no_headers() {
        let p = path(&["outer", "inner"]);
        let diff = diff_suites(&p, &p);
        assert!(diff.is_empty());
        assert!(!diff.separator);
    }

    #[test]
    fn test_first_path_prints_every_level() {
        let diff = diff_suites(&[], &path(&["outer", "inner"]));
        assert_eq!(
            diff.headers,
            vec![
                SuiteHeader {
                    name: "outer".to_string(),
                    depth: 1
                },
                SuiteHeader {
                    name: "inner".to_string(),
                    depth: 2
                },
            ]
        );
        assert!(diff.separator);
    }

    #[test]
    fn test_divergence_reprints_everything_below() {
        // Shared prefix ["a"], divergence at index 1
        let diff = diff_suites(&path(&["a", "b", "c"]), &path(&["a", "x", "c"]));
        assert_eq!(diff.headers.len(), 2);
        assert_eq!(diff.headers[0].name, "x");
        assert_eq!(diff.headers[0].depth, 2);
        // "c" matches positionally but the broken prefix makes it new again
        assert_eq!(diff.headers[1].name, "c");
        assert_eq!(diff.headers[1].depth, 3);
        assert!(!diff.separator);
    }

    #[test]
    fn test_header_count_matches_divergence_index() {
        // Differ first at index i: exactly len(current) - i headers
        let prev = path(&["a", "b", "c", "d"]);
        let curr = path(&["a", "b", "z", "d"]);
        let diff = diff_suites(&prev, &curr);
        assert_eq!(diff.headers.len(), curr.len() - 2);
        for (offset, header) in diff.headers.iter().enumerate() {
            assert_eq!(header.depth, 2 + offset + 1);
        }
    }

    #[test]
    fn test_separator_only_on_root_divergence() {
        let root = diff_suites(&path(&["a"]), &path(&["b"]));
        assert!(root.separator);

        let nested = diff_suites(&path(&["a", "b"]), &path(&["a", "c"]));
        assert!(!nested.separator);
    }

    #[test]
    fn test_empty_current_path() {
        // Global specs: no headers, no separator, leaf at depth 1
        let diff = diff_suites(&path(&["a", "b"]), &[]);
        assert!(diff.is_empty());
        assert!(!diff.separator);

        let mut tracker = SuiteTracker::new();
        tracker.enter(&path(&["a", "b"]));
        tracker.enter(&[]);
        assert_eq!(tracker.leaf_depth(), 1);
    }

    #[test]
    fn test_shallower_path_prints_no_closing_lines() {
        let diff = diff_suites(&path(&["a", "b", "c"]), &path(&["a"]));
        assert!(diff.is_empty());
    }

    #[test]
    fn test_longer_path_extends_in_place() {
        let diff = diff_suites(&path(&["a"]), &path(&["a", "b"]));
        assert_eq!(diff.headers.len(), 1);
        assert_eq!(diff.headers[0].name, "b");
        assert_eq!(diff.headers[0].depth, 2);
        assert!(!diff.separator);
    }

    #[test]
    fn test_tracker_follows_every_entered_path() {
        let mut tracker = SuiteTracker::new();

        tracker.enter(&path(&["a", "b"]));
        assert_eq!(tracker.path(), path(&["a", "b"]).as_slice());
        assert_eq!(tracker.leaf_depth(), 3);

        let second = tracker.enter(&path(&["a", "b"]));
        assert!(second.is_empty());

        tracker.enter(&path(&["c"]));
        assert_eq!(tracker.path(), path(&["c"]).as_slice());

        tracker.reset();
        assert_eq!(tracker.path(), &[] as &[String]);
        assert_eq!(tracker.leaf_depth(), 1);
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "  ");
        assert_eq!(indent(3), "      ");
    }
}
