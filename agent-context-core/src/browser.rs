use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

pub const DEFAULT_HIDDEN_PREFIX: char = '.';

/// What confirming the browser yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// Pick a single directory: the one being listed
    Target,
    /// Pick any number of listed subdirectories
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    Target(PathBuf),
    Projects(Vec<PathBuf>),
}

/// Multi-selection that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    order: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl Selection {
    /// Add `path` if absent, otherwise remove it. Returns whether it is now selected.
    pub fn toggle(&mut self, path: PathBuf) -> bool {
        if self.members.remove(&path) {
            self.order.retain(|p| p != &path);
            false
        } else {
            self.members.insert(path.clone());
            self.order.push(path);
            true
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.order
    }
}

/// Accepted as filter input: ASCII letters, digits, `-`, `_` and `.`.
pub fn is_filter_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Navigation state for one level of a directory tree.
///
/// Listing is done elsewhere: `descend`/`ascend` hand back the directory that needs
/// listing and the browser stays in `loading` until `set_entries` delivers it.
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    pub mode: BrowseMode,
    pub current_dir: PathBuf,
    pub entries: Vec<String>,
    pub filter: String,
    /// Indices into `entries` matching `filter`
    pub filtered: Vec<usize>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub selection: Selection,
    pub loading: bool,
    viewport_rows: usize,
}

impl DirectoryBrowser {
    pub fn new(mode: BrowseMode, start_dir: PathBuf) -> Self {
        Self {
            mode,
            current_dir: start_dir,
            entries: Vec::new(),
            filter: String::new(),
            filtered: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            selection: Selection::default(),
            loading: true,
            viewport_rows: 1,
        }
    }

    /// Accept a listing. Returns false (and changes nothing) if it is for another directory.
    pub fn set_entries(&mut self, path: &Path, entries: Vec<String>) -> bool {
        if path != self.current_dir {
            return false;
        }
        self.entries = entries;
        self.filter.clear();
        self.refilter();
        self.loading = false;
        true
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    #[cfg(test)]
    fn filtered_names(&self) -> impl Iterator<Item = &str> {
        self.filtered.iter().map(|&i| self.entries[i].as_str())
    }

    /// Name under the cursor, if any entry matches the filter
    pub fn highlighted(&self) -> Option<&str> {
        self.filtered
            .get(self.cursor)
            .map(|&i| self.entries[i].as_str())
    }

    pub fn highlighted_path(&self) -> Option<PathBuf> {
        self.highlighted().map(|name| self.current_dir.join(name))
    }

    pub fn is_at_root(&self) -> bool {
        self.current_dir.parent().is_none()
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        // A taller viewport pulls the window back so it doesn't hang past the last entry
        let max_offset = self.filtered.len().saturating_sub(self.viewport_rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        self.keep_cursor_visible();
    }

    /// Range of `filtered` positions currently on screen
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.scroll_offset.min(self.filtered.len());
        let end = (self.scroll_offset + self.viewport_rows).min(self.filtered.len());
        start..end
    }

    pub fn has_more_above(&self) -> bool {
        self.scroll_offset > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.scroll_offset + self.viewport_rows < self.filtered.len()
    }

    /// Move the cursor by `delta`, clamped to the filtered list. No wraparound.
    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let step = delta.unsigned_abs() as usize;
        self.cursor = if delta >= 0 {
            self.cursor.saturating_add(step).min(len - 1)
        } else {
            self.cursor.saturating_sub(step)
        };
        self.keep_cursor_visible();
    }

    /// Minimal scroll: move the window only as far as needed to show the cursor.
    fn keep_cursor_visible(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.cursor + 1 - self.viewport_rows;
        }
    }

    /// Enter the highlighted subdirectory. Returns the directory to list.
    pub fn descend(&mut self) -> Option<PathBuf> {
        let next = self.highlighted_path()?;
        self.change_dir(next.clone());
        Some(next)
    }

    /// Go to the parent directory. Returns the directory to list, or `None` at the root.
    pub fn ascend(&mut self) -> Option<PathBuf> {
        let parent = self.current_dir.parent()?.to_path_buf();
        self.change_dir(parent.clone());
        Some(parent)
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.entries.clear();
        self.filtered.clear();
        self.filter.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.loading = true;
    }

    /// Append to the filter. Characters outside the filter alphabet are ignored.
    pub fn push_filter(&mut self, c: char) -> bool {
        if !is_filter_char(c) {
            return false;
        }
        self.filter.push(c);
        self.refilter();
        true
    }

    /// Drop the last filter character. Returns false if the filter was already empty.
    pub fn pop_filter(&mut self) -> bool {
        if self.filter.pop().is_none() {
            return false;
        }
        self.refilter();
        true
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, name)| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Toggle the highlighted entry in the selection (projects mode only).
    pub fn toggle_highlighted(&mut self) -> Option<bool> {
        if self.mode != BrowseMode::Projects {
            return None;
        }
        let path = self.highlighted_path()?;
        Some(self.selection.toggle(path))
    }

    /// Finish browsing.
    ///
    /// Target mode yields the listed directory itself, not the highlighted child.
    /// Projects mode yields the selection; with nothing selected it falls back to the
    /// highlighted entry, and otherwise to an empty list.
    pub fn confirm(&self) -> BrowseOutcome {
        match self.mode {
            BrowseMode::Target => BrowseOutcome::Target(self.current_dir.clone()),
            BrowseMode::Projects => {
                if self.selection.is_empty()
                    && let Some(path) = self.highlighted_path()
                {
                    BrowseOutcome::Projects(vec![path])
                } else {
                    BrowseOutcome::Projects(self.selection.paths().to_vec())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser_with(mode: BrowseMode, names: &[&str]) -> DirectoryBrowser {
        let dir = PathBuf::from("/work");
        let mut browser = DirectoryBrowser::new(mode, dir.clone());
        browser.set_entries(&dir, names.iter().map(ToString::to_string).collect());
        browser
    }

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("dir{i:03}")).collect()
    }

    #[test]
    fn test_new_browser_is_loading() {
        let browser = DirectoryBrowser::new(BrowseMode::Target, PathBuf::from("/"));
        assert!(browser.loading);
        assert_eq!(browser.highlighted(), None);
    }

    #[test]
    fn test_set_entries_ignores_stale_listing() {
        let mut browser = browser_with(BrowseMode::Target, &["a"]);
        assert!(!browser.set_entries(Path::new("/elsewhere"), vec!["zzz".into()]));
        assert_eq!(browser.entries, vec!["a"]);
    }

    #[test]
    fn test_move_cursor_clamps_without_wrapping() {
        let mut browser = browser_with(BrowseMode::Target, &["a", "b", "c"]);
        browser.move_cursor(-1);
        assert_eq!(browser.cursor, 0);
        browser.move_cursor(1);
        browser.move_cursor(1);
        browser.move_cursor(1);
        assert_eq!(browser.cursor, 2);
        assert_eq!(browser.highlighted(), Some("c"));
    }

    #[test]
    fn test_move_cursor_on_empty_list_is_noop() {
        let mut browser = browser_with(BrowseMode::Target, &[]);
        browser.move_cursor(1);
        assert_eq!(browser.cursor, 0);
        assert_eq!(browser.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_follows_cursor_with_minimal_movement() {
        let mut browser = browser_with(BrowseMode::Target, &[]);
        let dir = browser.current_dir.clone();
        browser.set_entries(&dir, numbered(20));
        browser.set_viewport_rows(5);

        for _ in 0..4 {
            browser.move_cursor(1);
        }
        assert_eq!(browser.scroll_offset, 0);
        browser.move_cursor(1);
        assert_eq!(browser.cursor, 5);
        assert_eq!(browser.scroll_offset, 1);

        for _ in 0..3 {
            browser.move_cursor(-1);
        }
        assert_eq!(browser.cursor, 2);
        assert_eq!(browser.scroll_offset, 1);
        browser.move_cursor(-1);
        assert_eq!(browser.scroll_offset, 1);
        browser.move_cursor(-1);
        assert_eq!(browser.cursor, 0);
        assert_eq!(browser.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_invariant_holds_for_move_sequences() {
        for (len, rows) in [(1, 5), (4, 5), (5, 5), (6, 5), (37, 7), (100, 1)] {
            let mut browser = browser_with(BrowseMode::Target, &[]);
            let dir = browser.current_dir.clone();
            browser.set_entries(&dir, numbered(len));
            browser.set_viewport_rows(rows);

            // Deterministic zig-zag walk covering both ends.
            let moves = (0..len * 3).map(|i| if (i / (len + 2)) % 2 == 0 { 1 } else { -1 });
            for delta in moves {
                browser.move_cursor(delta);
                let (offset, cursor) = (browser.scroll_offset, browser.cursor);
                assert!(offset <= cursor, "len={len} rows={rows}");
                assert!(cursor < offset + rows, "len={len} rows={rows}");
                if len >= rows {
                    assert!(offset + rows <= len, "len={len} rows={rows}");
                }
            }
        }
    }

    #[test]
    fn test_shrinking_viewport_keeps_cursor_visible() {
        let mut browser = browser_with(BrowseMode::Target, &[]);
        let dir = browser.current_dir.clone();
        browser.set_entries(&dir, numbered(30));
        browser.set_viewport_rows(20);
        browser.move_cursor(15);
        assert_eq!(browser.scroll_offset, 0);

        browser.set_viewport_rows(5);
        assert_eq!(browser.scroll_offset, 11);
        assert_eq!(browser.visible_range(), 11..16);
        assert!(browser.has_more_above());
        assert!(browser.has_more_below());
    }

    #[test]
    fn test_growing_viewport_does_not_overhang() {
        let mut browser = browser_with(BrowseMode::Target, &[]);
        let dir = browser.current_dir.clone();
        browser.set_entries(&dir, numbered(10));
        browser.set_viewport_rows(3);
        browser.move_cursor(9);
        assert_eq!(browser.scroll_offset, 7);

        browser.set_viewport_rows(5);
        assert_eq!(browser.scroll_offset, 5);
        assert_eq!(browser.visible_range(), 5..10);
        assert!(!browser.has_more_below());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut browser = browser_with(BrowseMode::Target, &["Alpha", "beta", "alphabet", "gamma"]);
        for c in "ALP".chars() {
            assert!(browser.push_filter(c));
        }
        let names: Vec<&str> = browser.filtered_names().collect();
        assert_eq!(names, vec!["Alpha", "alphabet"]);
    }

    #[test]
    fn test_filter_rejects_ineligible_chars() {
        let mut browser = browser_with(BrowseMode::Target, &["a b"]);
        assert!(!browser.push_filter(' '));
        assert!(!browser.push_filter('/'));
        assert!(browser.push_filter('_'));
        assert!(browser.push_filter('.'));
        assert!(browser.push_filter('-'));
        assert_eq!(browser.filter, "_.-");
    }

    #[test]
    fn test_filter_change_resets_cursor_and_scroll() {
        let mut browser = browser_with(BrowseMode::Target, &[]);
        let dir = browser.current_dir.clone();
        browser.set_entries(&dir, numbered(30));
        browser.set_viewport_rows(5);
        browser.move_cursor(12);
        assert!(browser.scroll_offset > 0);

        browser.push_filter('1');
        assert_eq!((browser.cursor, browser.scroll_offset), (0, 0));

        browser.move_cursor(3);
        browser.pop_filter();
        assert_eq!((browser.cursor, browser.scroll_offset), (0, 0));
    }

    #[test]
    fn test_clearing_filter_restores_full_listing() {
        let mut browser = browser_with(BrowseMode::Target, &["one", "two", "three"]);
        browser.push_filter('t');
        browser.push_filter('w');
        assert_eq!(browser.filtered_len(), 1);
        browser.pop_filter();
        browser.pop_filter();
        assert!(browser.filter.is_empty());
        assert_eq!(browser.filtered_len(), 3);
        assert!(!browser.pop_filter());
    }

    #[test]
    fn test_descend_and_ascend_reset_view() {
        let mut browser = browser_with(BrowseMode::Target, &["a", "b"]);
        browser.push_filter('b');
        let next = browser.descend().unwrap();
        assert_eq!(next, PathBuf::from("/work/b"));
        assert!(browser.loading);
        assert!(browser.filter.is_empty());
        assert_eq!((browser.cursor, browser.scroll_offset), (0, 0));

        let parent = browser.ascend().unwrap();
        assert_eq!(parent, PathBuf::from("/work"));
        assert_eq!(browser.current_dir, PathBuf::from("/work"));
    }

    #[test]
    fn test_descend_with_no_match_is_noop() {
        let mut browser = browser_with(BrowseMode::Target, &["a"]);
        browser.push_filter('z');
        assert!(browser.descend().is_none());
        assert!(!browser.loading);
        assert_eq!(browser.current_dir, PathBuf::from("/work"));
    }

    #[cfg(unix)]
    #[test]
    fn test_ascend_at_root_is_noop() {
        let mut browser = DirectoryBrowser::new(BrowseMode::Target, PathBuf::from("/"));
        browser.set_entries(Path::new("/"), vec!["usr".into()]);
        assert!(browser.is_at_root());
        assert!(browser.ascend().is_none());
        assert_eq!(browser.entries, vec!["usr"]);
    }

    #[test]
    fn test_target_confirm_yields_current_dir_not_highlight() {
        let mut browser = browser_with(BrowseMode::Target, &["a", "b"]);
        browser.move_cursor(1);
        assert_eq!(
            browser.confirm(),
            BrowseOutcome::Target(PathBuf::from("/work"))
        );
    }

    #[test]
    fn test_toggle_only_in_projects_mode() {
        let mut target = browser_with(BrowseMode::Target, &["a"]);
        assert_eq!(target.toggle_highlighted(), None);

        let mut projects = browser_with(BrowseMode::Projects, &["a"]);
        assert_eq!(projects.toggle_highlighted(), Some(true));
        assert!(projects.selection.contains(Path::new("/work/a")));
        assert_eq!(projects.toggle_highlighted(), Some(false));
        assert!(projects.selection.is_empty());
    }

    #[test]
    fn test_projects_confirm_keeps_selection_order() {
        let mut browser = browser_with(BrowseMode::Projects, &["a", "b", "c"]);
        browser.move_cursor(2);
        browser.toggle_highlighted();
        browser.move_cursor(-2);
        browser.toggle_highlighted();
        assert_eq!(
            browser.confirm(),
            BrowseOutcome::Projects(vec![PathBuf::from("/work/c"), PathBuf::from("/work/a")])
        );
    }

    #[test]
    fn test_projects_confirm_falls_back_to_highlight() {
        let mut browser = browser_with(BrowseMode::Projects, &["a", "b"]);
        browser.move_cursor(1);
        assert_eq!(
            browser.confirm(),
            BrowseOutcome::Projects(vec![PathBuf::from("/work/b")])
        );
    }

    #[test]
    fn test_projects_confirm_empty_listing_yields_nothing() {
        let browser = browser_with(BrowseMode::Projects, &[]);
        assert_eq!(browser.confirm(), BrowseOutcome::Projects(vec![]));
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut browser = browser_with(BrowseMode::Projects, &["a", "b"]);
        browser.toggle_highlighted();
        browser.descend();
        let sub = browser.current_dir.clone();
        browser.set_entries(&sub, vec!["inner".into()]);
        browser.toggle_highlighted();
        assert_eq!(
            browser.selection.paths(),
            &[PathBuf::from("/work/a"), PathBuf::from("/work/a/inner")]
        );
    }

    #[test]
    fn test_selection_retoggle_moves_to_end() {
        let mut selection = Selection::default();
        selection.toggle(PathBuf::from("/x"));
        selection.toggle(PathBuf::from("/y"));
        selection.toggle(PathBuf::from("/x"));
        selection.toggle(PathBuf::from("/x"));
        assert_eq!(selection.paths(), &[PathBuf::from("/y"), PathBuf::from("/x")]);
        assert_eq!(selection.len(), 2);
    }
}
