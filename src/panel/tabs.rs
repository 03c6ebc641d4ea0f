//! Indexed tab strip
//!
//! One header per entry, at most one active entry. The strip is controlled:
//! selecting a header reports the requested index but does not move the active
//! tab itself; the owner decides and calls [`TabsContainer::set_active`].

/// Something that can be shown as a tab
pub trait TabEntry {
    fn tab_id(&self) -> &str;
    fn tab_label(&self) -> &str;
}

/// Header as presented in the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHeader<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub active: bool,
}

type ChangeListener = Box<dyn FnMut(usize)>;

pub struct TabsContainer<T> {
    entries: Vec<T>,
    /// Active entry index; `None` when nothing matches
    active_index: Option<usize>,
    on_change: Option<ChangeListener>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for TabsContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabsContainer")
            .field("entries", &self.entries)
            .field("active_index", &self.active_index)
            .finish_non_exhaustive()
    }
}

impl<T> Default for TabsContainer<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            active_index: None,
            on_change: None,
        }
    }
}

impl<T: TabEntry> TabsContainer<T> {
    pub fn new(entries: Vec<T>, active_index: Option<usize>) -> Self {
        let mut tabs = Self {
            entries,
            ..Self::default()
        };
        tabs.set_active(active_index);
        tabs
    }

    /// Notify `listener` with the index of every valid selection
    pub fn on_change(mut self, listener: impl FnMut(usize) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the entries; an active index that no longer fits is cleared
    pub fn set_entries(&mut self, entries: Vec<T>) {
        self.entries = entries;
        self.set_active(self.active_index);
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Set the active index; out-of-range indices mean no active tab
    pub fn set_active(&mut self, index: Option<usize>) {
        self.active_index = index.filter(|&i| i < self.entries.len());
    }

    /// Entry whose content is visible, if any
    pub fn active(&self) -> Option<&T> {
        self.active_index.and_then(|i| self.entries.get(i))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tab_id() == id)
    }

    /// Header clicked; returns the index when it is valid
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.entries.len() {
            return None;
        }
        if let Some(listener) = self.on_change.as_mut() {
            listener(index);
        }
        Some(index)
    }

    /// Index after the active one, wrapping; the first tab when none is active
    pub fn next_index(&self) -> Option<usize> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        Some(match self.active_index {
            Some(current) => (current + 1) % len,
            None => 0,
        })
    }

    /// Index before the active one, wrapping; the last tab when none is active
    pub fn prev_index(&self) -> Option<usize> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        Some(match self.active_index {
            Some(current) => (current + len - 1) % len,
            None => len - 1,
        })
    }

    pub fn headers(&self) -> Vec<TabHeader<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| TabHeader {
                id: entry.tab_id(),
                label: entry.tab_label(),
                active: self.active_index == Some(i),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Tab(&'static str);

    impl TabEntry for Tab {
        fn tab_id(&self) -> &str {
            self.0
        }

        fn tab_label(&self) -> &str {
            self.0
        }
    }

    fn tabs() -> TabsContainer<Tab> {
        TabsContainer::new(vec![Tab("a"), Tab("b"), Tab("c")], Some(0))
    }

    #[test]
    fn test_out_of_range_active_shows_nothing() {
        let tabs = TabsContainer::new(vec![Tab("a")], Some(5));
        assert_eq!(tabs.active_index(), None);
        assert!(tabs.active().is_none());
        assert!(tabs.headers().iter().all(|h| !h.active));
    }

    #[test]
    fn test_select_only_yields_valid_indices() {
        let mut tabs = tabs();
        assert_eq!(tabs.select(2), Some(2));
        assert_eq!(tabs.select(3), None);
        // Controlled: selection alone does not move the active tab
        assert_eq!(tabs.active_index(), Some(0));
    }

    #[test]
    fn test_on_change_receives_selection() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut tabs = tabs().on_change(move |i| sink.borrow_mut().push(i));
        tabs.select(1);
        tabs.select(9);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_cycling_wraps() {
        let mut tabs = tabs();
        assert_eq!(tabs.next_index(), Some(1));
        assert_eq!(tabs.prev_index(), Some(2));

        tabs.set_active(None);
        assert_eq!(tabs.next_index(), Some(0));
        assert_eq!(tabs.prev_index(), Some(2));

        let empty: TabsContainer<Tab> = TabsContainer::default();
        assert_eq!(empty.next_index(), None);
    }

    #[test]
    fn test_shrinking_entries_clears_stale_active() {
        let mut tabs = tabs();
        tabs.set_active(Some(2));
        tabs.set_entries(vec![Tab("a")]);
        assert_eq!(tabs.active_index(), None);
    }

    #[test]
    fn test_headers_mark_active() {
        let mut tabs = tabs();
        tabs.set_active(Some(1));
        let headers = tabs.headers();
        assert_eq!(headers.len(), 3);
        assert!(headers[1].active);
        assert!(!headers[0].active && !headers[2].active);
    }
}
