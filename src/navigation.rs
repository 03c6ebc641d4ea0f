//! Current location and in-place navigation
//!
//! The panel only ever replaces the current history entry; it never pushes.

use std::fmt;

/// Path plus fragment identifier (stored without the leading `#`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    pub fragment: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            fragment: fragment.into(),
        }
    }

    /// Parse `"/path#fragment"`; everything after the first `#` is the fragment
    pub fn parse(href: &str) -> Self {
        match href.split_once('#') {
            Some((pathname, fragment)) => Self::new(pathname, fragment),
            None => Self::new(href, ""),
        }
    }

    /// Path and fragment, omitting `#` when there is no fragment
    pub fn href(&self) -> String {
        if self.fragment.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}#{}", self.pathname, self.fragment)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// Navigation service the panel reads and replaces entries in
pub trait Navigator {
    fn location(&self) -> Location;

    /// Replace the current entry with `href` without adding history
    fn replace(&mut self, href: &str);

    /// Add a new entry. Only the host navigates this way; the panel never does.
    fn push(&mut self, href: &str);
}

/// In-memory history stack
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        self.entries.last().cloned().unwrap_or_default()
    }

    fn replace(&mut self, href: &str) {
        let location = Location::parse(href);
        match self.entries.last_mut() {
            Some(current) => *current = location,
            None => self.entries.push(location),
        }
    }

    fn push(&mut self, href: &str) {
        self.entries.push(Location::parse(href));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_hash() {
        let location = Location::parse("/repo/-/blob/main.go#L42=refs#x");
        assert_eq!(location.pathname, "/repo/-/blob/main.go");
        assert_eq!(location.fragment, "L42=refs#x");
    }

    #[test]
    fn test_href_without_fragment() {
        assert_eq!(Location::parse("/a/b").href(), "/a/b");
        assert_eq!(Location::new("/a", "x=y").href(), "/a#x=y");
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let mut history = MemoryHistory::new("/a#L1");
        history.replace("/a#L1=refs");
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().fragment, "L1=refs");

        history.push("/b");
        assert_eq!(history.len(), 2);
    }
}
