//! Immutable path values with normalization and join/concat algebra
//!
//! [`PathValue`] stores a single normalized string using `/` as the
//! separator; backslashes are rewritten at construction. The empty path
//! denotes the storage root. Every operation is a pure function of the
//! stored string: transformations return new values, and absence is
//! reported as `None` or an empty path; nothing here ever fails.
//!
//! # Escape markers
//!
//! A leading `...` segment acts as "jump back to the base path's root
//! directory" during [`PathValue::join`], letting callers encode an escape
//! out of a nested location without computing the depth themselves. See
//! [`PathValue::root_directory`] for how marker segments group.
//!
//! # Examples
//!
//! ```
//! use treestore::PathValue;
//!
//! let p = PathValue::new("docs/guide/intro.md");
//! assert_eq!(p.name(), Some("intro"));
//! assert_eq!(p.extension(), Some("md"));
//! assert_eq!(p.parent_directory_path().value(), "docs/guide");
//! ```

use std::fmt;

/// An immutable, normalized, `/`-separated path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathValue {
    value: String,
}

/// Trailing run of non-`.` characters of `s` (empty when `s` ends with `.`)
fn trailing_run(s: &str) -> &str {
    match s.rfind('.') {
        Some(i) => &s[i + 1..],
        None => s,
    }
}

impl PathValue {
    /// Create a path from a string, rewriting `\` separators to `/`
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        PathValue {
            value: path.as_ref().replace('\\', "/"),
        }
    }

    /// The empty path, denoting the storage root
    #[must_use]
    pub fn root() -> Self {
        PathValue::default()
    }

    /// Build a path by joining non-empty segments with `/`
    ///
    /// Empty segments are filtered out, so `["", "a", "b"]` and `["a", "b"]`
    /// produce the same path.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .map(|s| s.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("/");
        PathValue::new(joined)
    }

    /// The normalized string value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for the empty path (the storage root)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.value.is_empty()
    }

    /// Everything before the last separator; the empty path when the path
    /// has no parent
    #[must_use]
    pub fn parent_directory_path(&self) -> PathValue {
        match self.value.rfind('/') {
            Some(idx) if idx > 0 => PathValue::new(&self.value[..idx]),
            _ => PathValue::root(),
        }
    }

    /// The final segment verbatim, extension included
    ///
    /// `None` for the empty path or a path ending in `/`.
    #[must_use]
    pub fn name_with_extension(&self) -> Option<&str> {
        let seg = match self.value.rfind('/') {
            Some(i) => &self.value[i + 1..],
            None => self.value.as_str(),
        };
        (!seg.is_empty()).then_some(seg)
    }

    /// The final segment with its extension stripped
    ///
    /// For multi-dot names this is the run of characters between the
    /// second-to-last and last dots: `a.b.c` has name `b`. Dotfiles with no
    /// further extension keep their full body (`.hidden` has name `hidden`).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let seg = self.name_with_extension()?;
        let base = match seg.rfind('.') {
            Some(i) if i + 1 < seg.len() => &seg[..i],
            _ => seg,
        };
        let run = match trailing_run(base) {
            "" => trailing_run(seg),
            run => run,
        };
        (!run.is_empty()).then_some(run)
    }

    /// The extension of the final segment, without the dot
    ///
    /// Lookup is scoped past the last `/`: dots in parent segments never
    /// count. `None` when the final segment has no dot or ends with one.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let seg = match self.value.rfind('/') {
            Some(i) => &self.value[i..],
            None => self.value.as_str(),
        };
        match seg.rfind('.') {
            Some(i) if i + 1 < seg.len() => Some(&seg[i + 1..]),
            _ => None,
        }
    }

    /// Append `.ext` only if the path has no extension yet
    ///
    /// `ext` is sanitized to its leading alphabetic run. A path that already
    /// carries an extension is returned unchanged.
    #[must_use]
    pub fn with_extension(&self, ext: &str) -> PathValue {
        if self.extension().is_some() {
            return self.clone();
        }
        let run: String = ext.chars().take_while(char::is_ascii_alphabetic).collect();
        PathValue::new(format!("{}.{}", self.value, run))
    }

    /// The full path with a trailing `.ext` removed, if present
    #[must_use]
    pub fn strip_extension(&self) -> PathValue {
        if self.extension().is_none() {
            return self.clone();
        }
        match self.value.rfind('.') {
            Some(i) => PathValue::new(&self.value[..i]),
            None => self.clone(),
        }
    }

    /// Like [`name`](Self::name), but lenient on multi-dot names: returns
    /// the content up to the first meaningful extension group, and may span
    /// separators when no dots are present at all
    #[must_use]
    pub fn strip_dots_and_extension(&self) -> Option<&str> {
        let s = self.value.as_str();
        let base = match s.rfind('.') {
            Some(i) if i + 1 < s.len() && !s[i + 1..].contains('/') => &s[..i],
            _ => s,
        };
        let run = match trailing_run(base) {
            "" => trailing_run(s),
            run => run,
        };
        (!run.is_empty()).then_some(run)
    }

    /// The first path component
    ///
    /// Marker components (`.`, `..`, `...`) and absolute paths keep the
    /// first two components together, so `./x/y` roots at `./x` and `/a/b`
    /// roots at `/a`. This is what lets a path encode "escape N levels up"
    /// as a literal leading segment.
    #[must_use]
    pub fn root_directory(&self) -> PathValue {
        let mut components = self.value.split('/');
        let first = components.next().unwrap_or_default();
        if matches!(first, "." | ".." | "...") {
            let second = components.next().unwrap_or_default();
            PathValue::new(format!("{first}/{second}"))
        } else if self.value.starts_with('/') {
            // split yields an empty first component for absolute paths
            let second = components.next().unwrap_or_default();
            PathValue::new(format!("/{second}"))
        } else {
            PathValue::new(first)
        }
    }

    /// Strip one leading `./` (or a bare leading `/`), if present
    #[must_use]
    pub fn remove_extra_symbols(&self) -> PathValue {
        let s = self.value.as_str();
        if let Some(rest) = s.strip_prefix("./") {
            PathValue::new(rest)
        } else if let Some(rest) = s.strip_prefix('/') {
            PathValue::new(rest)
        } else {
            self.clone()
        }
    }

    /// Structural equality on [`remove_extra_symbols`](Self::remove_extra_symbols)
    /// normalized values, so a leading `./` is insignificant
    #[must_use]
    pub fn compare(&self, other: &PathValue) -> bool {
        self.remove_extra_symbols().value == other.remove_extra_symbols().value
    }

    /// Prefix test on normalized values (leading `./` insignificant)
    #[must_use]
    pub fn starts_with(&self, other: &PathValue) -> bool {
        self.remove_extra_symbols()
            .value
            .starts_with(other.remove_extra_symbols().value())
    }

    /// Suffix test on normalized values (leading `./` insignificant)
    #[must_use]
    pub fn ends_with(&self, other: &PathValue) -> bool {
        self.remove_extra_symbols()
            .value
            .ends_with(other.remove_extra_symbols().value())
    }

    /// Raw substring test; unlike [`compare`](Self::compare), the values are
    /// not stripped first
    #[must_use]
    pub fn includes(&self, other: &PathValue) -> bool {
        self.value.contains(other.value.as_str())
    }

    /// The remainder of `other` after stripping this path as a raw prefix
    ///
    /// `None` when `other` does not start with this path's raw value.
    #[must_use]
    pub fn sub_directory(&self, other: &PathValue) -> Option<PathValue> {
        other
            .value
            .strip_prefix(self.value.as_str())
            .map(PathValue::new)
    }

    /// The `./../..`-style path needed to reach `target` from this path's
    /// location
    ///
    /// Climbs from this path's parent directory until an ancestor prefixes
    /// `target`, counting each step; a path with no extension counts itself
    /// as a directory level. The result is `.` followed by one `/..` per
    /// level and the target's remainder beyond the shared ancestor.
    ///
    /// ```
    /// use treestore::PathValue;
    ///
    /// let from = PathValue::new("a/b/c.txt");
    /// let to = PathValue::new("a/d/e.txt");
    /// assert_eq!(from.get_relative_path(&to).value(), "./../d/e.txt");
    /// ```
    #[must_use]
    pub fn get_relative_path(&self, target: &PathValue) -> PathValue {
        let mut ancestor = self.parent_directory_path();
        let mut depth = usize::from(self.extension().is_none());
        while !target.starts_with(&ancestor) {
            ancestor = ancestor.parent_directory_path();
            depth += 1;
        }
        let remainder = if ancestor.value == target.value {
            depth += 1;
            format!("/{}", target.name().unwrap_or_default())
        } else {
            ancestor
                .sub_directory(target)
                .map(|p| p.value)
                .unwrap_or_default()
        };
        PathValue::new(format!(".{}{}", "/..".repeat(depth), remainder))
    }

    /// Append `other` with a `/` separator
    ///
    /// Joining the empty path is a no-op. An operand starting with an escape
    /// marker (`./...`, `/...`, or `...`) splices onto this path's
    /// [`root_directory`](Self::root_directory) instead of appending
    /// literally, taking the operand's remainder from its own first `/`.
    #[must_use]
    pub fn join(&self, other: &PathValue) -> PathValue {
        if other.value.is_empty() {
            return self.clone();
        }
        let o = other.value.as_str();
        let is_root_join =
            o.starts_with("./...") || o.starts_with("/...") || o.starts_with("...");
        if is_root_join {
            let tail = match o.find('/') {
                Some(i) => o[i..].to_owned(),
                // lone marker: keep only its final character
                None => o.chars().next_back().map(String::from).unwrap_or_default(),
            };
            PathValue::new(format!("{}{}", self.root_directory().value, tail))
        } else {
            PathValue::new(format!("{}/{}", self.value, o))
        }
    }

    /// Left-fold [`join`](Self::join) over a sequence of paths
    #[must_use]
    pub fn join_all<'a, I>(&self, paths: I) -> PathValue
    where
        I: IntoIterator<Item = &'a PathValue>,
    {
        paths.into_iter().fold(self.clone(), |acc, p| acc.join(p))
    }

    /// Raw string concatenation (no separator), re-normalized
    #[must_use]
    pub fn concat(&self, other: &PathValue) -> PathValue {
        PathValue::new(format!("{}{}", self.value, other.value))
    }

    /// Replace the final segment's name, keeping the parent directory and
    /// the original extension (if any)
    #[must_use]
    pub fn get_new_name(&self, new_name: &str) -> PathValue {
        let ext = self
            .extension()
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        PathValue::new(format!(
            "{}/{new_name}{ext}",
            self.parent_directory_path().value
        ))
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for PathValue {
    fn from(s: &str) -> Self {
        PathValue::new(s)
    }
}

impl From<String> for PathValue {
    fn from(s: String) -> Self {
        PathValue::new(s)
    }
}

impl AsRef<str> for PathValue {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_backslashes() {
        assert_eq!(PathValue::new(r"a\b\c.txt").value(), "a/b/c.txt");
        assert!(!PathValue::new(r"x\y\z").value().contains('\\'));
    }

    #[test]
    fn empty_input_is_root() {
        assert!(PathValue::new("").is_root());
        assert!(PathValue::root().is_root());
        assert_eq!(PathValue::default().value(), "");
    }

    #[test]
    fn from_segments_filters_empty() {
        let p = PathValue::from_segments(["", "a", "", "b"]);
        assert_eq!(p.value(), "a/b");
        assert!(PathValue::from_segments(Vec::<String>::new()).is_root());
    }

    #[test]
    fn decomposition_of_plain_file_path() {
        let p = PathValue::new("a/b/c.txt");
        assert_eq!(p.name(), Some("c"));
        assert_eq!(p.name_with_extension(), Some("c.txt"));
        assert_eq!(p.extension(), Some("txt"));
        assert_eq!(p.parent_directory_path().value(), "a/b");
    }

    #[test]
    fn parent_of_single_segment_is_root() {
        assert!(PathValue::new("a").parent_directory_path().is_root());
        assert!(PathValue::new("/a").parent_directory_path().is_root());
        assert!(PathValue::root().parent_directory_path().is_root());
    }

    #[test]
    fn name_handles_multi_dot_segments() {
        assert_eq!(PathValue::new("a.b.c").name(), Some("b"));
        assert_eq!(PathValue::new(".hidden").name(), Some("hidden"));
        assert_eq!(PathValue::new("x.").name(), None);
        assert_eq!(PathValue::new("dir/").name(), None);
    }

    #[test]
    fn extension_is_scoped_to_final_segment() {
        assert_eq!(PathValue::new("a.b/c").extension(), None);
        assert_eq!(PathValue::new("a.tar.gz").extension(), Some("gz"));
        assert_eq!(PathValue::new("trailing.").extension(), None);
        assert_eq!(PathValue::new(".hidden").extension(), Some("hidden"));
    }

    #[test]
    fn with_extension_only_applies_once() {
        let p = PathValue::new("notes");
        assert_eq!(p.with_extension("md").value(), "notes.md");
        assert_eq!(p.with_extension("md").with_extension("txt").value(), "notes.md");
        // sanitized to the leading alphabetic run
        assert_eq!(p.with_extension("md5x?").value(), "notes.md");
    }

    #[test]
    fn strip_extension_then_extension_is_none() {
        for raw in ["a/b/c.txt", "a.tar.gz", "plain", "", ".hidden"] {
            assert_eq!(PathValue::new(raw).strip_extension().extension(), None, "{raw}");
        }
        assert_eq!(PathValue::new("a/b/c.txt").strip_extension().value(), "a/b/c");
        assert_eq!(PathValue::new("plain").strip_extension().value(), "plain");
    }

    #[test]
    fn strip_dots_and_extension_is_lenient() {
        assert_eq!(PathValue::new("a/b.c.txt").strip_dots_and_extension(), Some("c"));
        assert_eq!(PathValue::new("a/b/c").strip_dots_and_extension(), Some("a/b/c"));
        assert_eq!(PathValue::new(".hidden").strip_dots_and_extension(), Some("hidden"));
        assert_eq!(PathValue::new("...").strip_dots_and_extension(), None);
    }

    #[test]
    fn root_directory_grouping() {
        assert_eq!(PathValue::new("a/b").root_directory().value(), "a");
        assert_eq!(PathValue::new("./x/y").root_directory().value(), "./x");
        assert_eq!(PathValue::new("../x/y").root_directory().value(), "../x");
        assert_eq!(PathValue::new(".../x/y").root_directory().value(), ".../x");
        assert_eq!(PathValue::new("/a/b").root_directory().value(), "/a");
        assert!(PathValue::root().root_directory().is_root());
    }

    #[test]
    fn remove_extra_symbols_strips_one_prefix() {
        assert_eq!(PathValue::new("./a/b").remove_extra_symbols().value(), "a/b");
        assert_eq!(PathValue::new("/a/b").remove_extra_symbols().value(), "a/b");
        assert_eq!(PathValue::new("a/b").remove_extra_symbols().value(), "a/b");
        assert_eq!(PathValue::new("././a").remove_extra_symbols().value(), "./a");
    }

    #[test]
    fn comparisons_ignore_leading_dot_slash() {
        let plain = PathValue::new("a/b/c");
        let dotted = PathValue::new("./a/b/c");
        assert!(plain.compare(&dotted));
        assert!(dotted.starts_with(&PathValue::new("a/b")));
        assert!(plain.ends_with(&PathValue::new("b/c")));
        // includes works on raw values
        assert!(!plain.includes(&dotted));
        assert!(dotted.includes(&plain));
    }

    #[test]
    fn sub_directory_requires_raw_prefix() {
        let base = PathValue::new("a/b");
        assert_eq!(base.sub_directory(&PathValue::new("a/b/c")).map(|p| p.value), Some("/c".into()));
        assert!(base.sub_directory(&PathValue::new("x/y")).is_none());
    }

    #[test]
    fn join_then_sub_directory_round_trips() {
        let a = PathValue::new("root/dir");
        let b = PathValue::new("leaf.txt");
        let joined = a.join(&b);
        assert_eq!(joined.value(), "root/dir/leaf.txt");
        let back = a.sub_directory(&joined).map(|p| p.remove_extra_symbols());
        assert_eq!(back.map(|p| p.value), Some("leaf.txt".into()));
    }

    #[test]
    fn join_skips_empty_operands() {
        let a = PathValue::new("a/b");
        assert_eq!(a.join(&PathValue::root()).value(), "a/b");
        let folded = a.join_all([&PathValue::root(), &PathValue::new("c")]);
        assert_eq!(folded.value(), "a/b/c");
    }

    #[test]
    fn join_escape_marker_redirects_to_root_directory() {
        let base = PathValue::new("./proj/src/mod");
        let escaped = base.join(&PathValue::new(".../assets/logo.png"));
        assert_eq!(escaped.value(), "./proj/assets/logo.png");
    }

    #[test]
    fn join_lone_escape_marker_keeps_only_its_final_character() {
        // a marker operand with no `/` contributes just its last character
        let base = PathValue::new("./proj/src");
        assert_eq!(base.join(&PathValue::new("...")).value(), "./proj.");
        assert_eq!(base.join(&PathValue::new("/...")).value(), "./proj/...");
    }

    #[test]
    fn concat_is_raw() {
        let a = PathValue::new("a/b");
        assert_eq!(a.concat(&PathValue::new(".txt")).value(), "a/b.txt");
        assert_eq!(a.concat(&PathValue::new("/c")).value(), "a/b/c");
    }

    #[test]
    fn relative_path_between_siblings() {
        let from = PathValue::new("a/b/c.txt");
        let to = PathValue::new("a/d/e.txt");
        assert_eq!(from.get_relative_path(&to).value(), "./../d/e.txt");
    }

    #[test]
    fn relative_path_to_direct_ancestor_names_it() {
        let from = PathValue::new("a/b/c.txt");
        let to = PathValue::new("a/b");
        assert_eq!(from.get_relative_path(&to).value(), "./../b");
    }

    #[test]
    fn get_new_name_keeps_parent_and_extension() {
        let p = PathValue::new("a/b/c.txt");
        assert_eq!(p.get_new_name("d").value(), "a/b/d.txt");
        let bare = PathValue::new("a/b/c");
        assert_eq!(bare.get_new_name("d").value(), "a/b/d");
    }
}
