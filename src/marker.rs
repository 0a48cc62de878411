//! Marker recognition for `${key}` and `${root.attr}`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::engine::ResolveOptions;

static PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("plain marker pattern"));

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\}").expect("path marker pattern")
});

static CHAINED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\.([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\}")
        .expect("chained path marker pattern")
});

/// A `${key}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainMatch {
    /// Byte span of the whole marker, `${` through `}`.
    pub span: Range<usize>,
    pub name: String,
}

/// A `${root.attr}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub span: Range<usize>,
    /// Context key of the object the path is read from.
    pub root: String,
    /// Attribute path below the root, without the leading dot.
    pub path: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    path: &'static Regex,
}

impl Matcher {
    pub fn new(opts: &ResolveOptions) -> Self {
        let path = if opts.chained_paths {
            &*CHAINED_PATH
        } else {
            &*PATH
        };
        Self { path }
    }

    pub fn find_plain(&self, text: &str) -> Option<PlainMatch> {
        let caps = PLAIN.captures(text)?;
        let whole = caps.get(0)?;
        Some(PlainMatch {
            span: whole.range(),
            name: caps[1].to_string(),
        })
    }

    pub fn find_path(&self, text: &str) -> Option<PathMatch> {
        let caps = self.path.captures(text)?;
        let whole = caps.get(0)?;
        Some(PathMatch {
            span: whole.range(),
            root: caps[1].to_string(),
            path: caps[2].to_string(),
        })
    }

    pub fn count_plain(&self, text: &str) -> usize {
        PLAIN.find_iter(text).count()
    }

    pub fn count_path(&self, text: &str) -> usize {
        self.path.find_iter(text).count()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&ResolveOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_plain_marker_wins() {
        let m = Matcher::default();
        let hit = m.find_plain("this is ${key1} and ${key2}").unwrap();
        assert_eq!(hit.name, "key1");
        assert_eq!(hit.span, 8..15);
    }

    #[test]
    fn plain_pattern_skips_dotted_markers() {
        let m = Matcher::default();
        let hit = m.find_plain("${foo.name} then ${k_2}").unwrap();
        assert_eq!(hit.name, "k_2");
        assert_eq!(m.find_plain("${foo.name}"), None);
    }

    #[test]
    fn path_marker_captures_root_and_attr() {
        let m = Matcher::default();
        let hit = m.find_path("foo.name is ${foo.name}").unwrap();
        assert_eq!(hit.root, "foo");
        assert_eq!(hit.path, "name");
        assert_eq!(hit.span, 12..23);
    }

    #[test]
    fn single_dot_only_by_default() {
        let m = Matcher::default();
        assert_eq!(m.find_path("${a.b.c}"), None);

        let chained = Matcher::new(&ResolveOptions {
            chained_paths: true,
            ..ResolveOptions::default()
        });
        let hit = chained.find_path("${a.b.c}").unwrap();
        assert_eq!(hit.root, "a");
        assert_eq!(hit.path, "b.c");
    }

    #[test]
    fn malformed_markers_are_ignored() {
        let m = Matcher::default();
        for s in ["${}", "${ key}", "$key", "{key}", "${key", "${a-b}", "${.a}", "${a.}"] {
            assert_eq!(m.find_plain(s), None, "unexpected marker in {s:?}");
            assert_eq!(m.find_path(s), None, "unexpected marker in {s:?}");
        }
    }

    #[test]
    fn counts_markers_of_each_shape() {
        let m = Matcher::default();
        let text = "${a} ${b.c} ${a} ${d.e.f}";
        assert_eq!(m.count_plain(text), 2);
        assert_eq!(m.count_path(text), 1);
    }
}
