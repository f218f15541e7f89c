use crate::model::ViewId;

/// A docked view and the label shown on its tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    label: String,
    view: ViewId,
}

impl TabEntry {
    /// Text shown on the tab.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Docked view behind the tab.
    pub fn view(&self) -> ViewId {
        self.view
    }
}

/// Selected view before and after a tab host mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SelectionChange {
    pub(crate) previous: Option<ViewId>,
    pub(crate) current: Option<ViewId>,
}

/// Ordered, positionally addressed container of docked views.
#[derive(Debug)]
pub struct TabHost {
    tabs: Vec<TabEntry>,
    current: Option<usize>,
    auto_hide_bar: bool,
    bar_visible: bool,
}

impl TabHost {
    pub(crate) fn new(auto_hide_bar: bool) -> Self {
        Self {
            tabs: Vec::new(),
            current: None,
            auto_hide_bar,
            bar_visible: !auto_hide_bar,
        }
    }

    /// Return docked tabs in display order.
    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Return the selected tab index.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Return the view in the selected tab.
    pub fn current_view(&self) -> Option<ViewId> {
        self.view_at(self.current?)
    }

    /// Return the view docked at `index`.
    pub fn view_at(&self, index: usize) -> Option<ViewId> {
        self.tabs.get(index).map(TabEntry::view)
    }

    /// Return the label of the tab at `index`.
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(TabEntry::label)
    }

    /// Return the tab index of `view` if it is docked.
    pub fn index_of(&self, view: ViewId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.view == view)
    }

    /// Return the first tab index whose label equals `label`.
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.label == label)
    }

    /// Whether the tab bar is currently shown.
    pub fn is_bar_visible(&self) -> bool {
        self.bar_visible
    }

    /// Insert a tab at `position`, or append when `position` is `None` or
    /// past the end. Returns the index the tab landed on.
    ///
    /// Inserting at or before the selected index shifts the selection and
    /// reports it, even though the same view stays selected.
    pub(crate) fn insert(
        &mut self,
        position: Option<usize>,
        label: String,
        view: ViewId,
    ) -> (usize, Option<SelectionChange>) {
        let index = position
            .filter(|position| *position < self.tabs.len())
            .unwrap_or(self.tabs.len());
        self.tabs.insert(index, TabEntry { label, view });

        match self.current {
            None => {
                self.current = Some(index);
                let change = SelectionChange {
                    previous: None,
                    current: Some(view),
                };
                (index, Some(change))
            },
            Some(current) if index <= current => {
                let previous = self.view_at(current + 1);
                self.current = Some(current + 1);
                let change = SelectionChange {
                    previous,
                    current: self.current_view(),
                };
                (index, Some(change))
            },
            Some(_) => (index, None),
        }
    }

    /// Remove the tab at `index`.
    ///
    /// Removing the selected tab selects its right neighbour, or the new
    /// last tab when it was the last one. Removing a tab before the
    /// selection shifts the selected index and reports it.
    pub(crate) fn remove(
        &mut self,
        index: usize,
    ) -> Option<(TabEntry, Option<SelectionChange>)> {
        if index >= self.tabs.len() {
            return None;
        }

        let selected = self.current.and_then(|current| self.view_at(current));
        let removed = self.tabs.remove(index);
        let change = match self.current {
            Some(current) if current == index => {
                self.current = if self.tabs.is_empty() {
                    None
                } else {
                    Some(index.min(self.tabs.len() - 1))
                };
                Some(SelectionChange {
                    previous: Some(removed.view),
                    current: self.current_view(),
                })
            },
            Some(current) if index < current => {
                self.current = Some(current - 1);
                Some(SelectionChange {
                    previous: selected,
                    current: self.current_view(),
                })
            },
            _ => None,
        };

        Some((removed, change))
    }

    /// Select the tab at `index`. Out-of-range or already selected indices
    /// are ignored.
    pub(crate) fn select(&mut self, index: usize) -> Option<SelectionChange> {
        if index >= self.tabs.len() || self.current == Some(index) {
            return None;
        }

        let previous = self.current_view();
        self.current = Some(index);
        Some(SelectionChange {
            previous,
            current: self.current_view(),
        })
    }

    /// Move the tab at `from` to `to`, keeping the selected view selected.
    pub(crate) fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() || from == to {
            return false;
        }

        let selected = self.current_view();
        let entry = self.tabs.remove(from);
        self.tabs.insert(to, entry);
        self.current = selected.and_then(|view| self.index_of(view));
        true
    }

    /// Re-apply the single-tab display rule. Returns the new visibility
    /// when it flipped.
    pub(crate) fn update_tab_bar(&mut self) -> Option<bool> {
        let visible = !self.auto_hide_bar || self.tabs.len() > 1;
        if visible == self.bar_visible {
            return None;
        }
        self.bar_visible = visible;
        Some(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with(labels: &[&str]) -> TabHost {
        let mut host = TabHost::new(true);
        for (raw, label) in labels.iter().enumerate() {
            host.insert(None, (*label).to_owned(), ViewId::new(raw as u64));
        }
        host.update_tab_bar();
        host
    }

    fn labels(host: &TabHost) -> Vec<&str> {
        host.tabs().iter().map(TabEntry::label).collect()
    }

    #[test]
    fn first_insert_selects_new_tab() {
        let mut host = TabHost::new(true);

        let (index, change) = host.insert(None, "A".into(), ViewId::new(0));

        assert_eq!(index, 0);
        assert_eq!(host.current_view(), Some(ViewId::new(0)));
        assert_eq!(
            change,
            Some(SelectionChange {
                previous: None,
                current: Some(ViewId::new(0)),
            })
        );
    }

    #[test]
    fn append_keeps_selection() {
        let mut host = host_with(&["A"]);

        let (index, change) = host.insert(None, "B".into(), ViewId::new(1));

        assert_eq!(index, 1);
        assert_eq!(change, None);
        assert_eq!(host.current_index(), Some(0));
    }

    #[test]
    fn insert_before_selection_shifts_index() {
        let mut host = host_with(&["A", "B"]);
        host.select(1);

        let (index, change) =
            host.insert(Some(0), "C".into(), ViewId::new(2));

        assert_eq!(index, 0);
        assert_eq!(
            change,
            Some(SelectionChange {
                previous: Some(ViewId::new(1)),
                current: Some(ViewId::new(1)),
            })
        );
        assert_eq!(host.current_index(), Some(2));
        assert_eq!(host.current_view(), Some(ViewId::new(1)));
        assert_eq!(labels(&host), vec!["C", "A", "B"]);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut host = host_with(&["A", "B"]);

        let (index, _) = host.insert(Some(7), "C".into(), ViewId::new(2));

        assert_eq!(index, 2);
        assert_eq!(labels(&host), vec!["A", "B", "C"]);
    }

    #[test]
    fn removing_selected_tab_selects_right_neighbour() {
        let mut host = host_with(&["A", "B", "C"]);
        host.select(1);

        let (removed, change) = host.remove(1).unwrap();

        assert_eq!(removed.label(), "B");
        assert_eq!(host.current_view(), Some(ViewId::new(2)));
        assert_eq!(
            change,
            Some(SelectionChange {
                previous: Some(ViewId::new(1)),
                current: Some(ViewId::new(2)),
            })
        );
    }

    #[test]
    fn removing_selected_last_tab_selects_left_neighbour() {
        let mut host = host_with(&["A", "B"]);
        host.select(1);

        host.remove(1);

        assert_eq!(host.current_index(), Some(0));
        assert_eq!(host.current_view(), Some(ViewId::new(0)));
    }

    #[test]
    fn removing_only_tab_clears_selection() {
        let mut host = host_with(&["A"]);

        let (_, change) = host.remove(0).unwrap();

        assert_eq!(host.current_index(), None);
        assert_eq!(
            change,
            Some(SelectionChange {
                previous: Some(ViewId::new(0)),
                current: None,
            })
        );
    }

    #[test]
    fn removing_before_selection_reports_shift() {
        let mut host = host_with(&["A", "B", "C"]);
        host.select(2);

        let (_, change) = host.remove(0).unwrap();

        assert_eq!(
            change,
            Some(SelectionChange {
                previous: Some(ViewId::new(2)),
                current: Some(ViewId::new(2)),
            })
        );
        assert_eq!(host.current_index(), Some(1));
        assert_eq!(host.current_view(), Some(ViewId::new(2)));
    }

    #[test]
    fn removing_after_selection_keeps_index_silently() {
        let mut host = host_with(&["A", "B", "C"]);

        let (_, change) = host.remove(2).unwrap();

        assert_eq!(change, None);
        assert_eq!(host.current_index(), Some(0));
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut host = host_with(&["A"]);
        assert!(host.remove(3).is_none());
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn selecting_current_or_missing_tab_is_ignored() {
        let mut host = host_with(&["A", "B"]);

        assert_eq!(host.select(0), None);
        assert_eq!(host.select(5), None);
        assert_eq!(
            host.select(1),
            Some(SelectionChange {
                previous: Some(ViewId::new(0)),
                current: Some(ViewId::new(1)),
            })
        );
    }

    #[test]
    fn moving_tabs_keeps_selected_view() {
        let mut host = host_with(&["A", "B", "C"]);
        host.select(0);

        assert!(host.move_tab(0, 2));

        assert_eq!(labels(&host), vec!["B", "C", "A"]);
        assert_eq!(host.current_index(), Some(2));
        assert_eq!(host.current_view(), Some(ViewId::new(0)));
        assert!(!host.move_tab(1, 1));
        assert!(!host.move_tab(0, 9));
    }

    #[test]
    fn tab_bar_hidden_with_single_tab() {
        let mut host = TabHost::new(true);
        assert!(!host.is_bar_visible());

        host.insert(None, "A".into(), ViewId::new(0));
        assert_eq!(host.update_tab_bar(), None);
        assert!(!host.is_bar_visible());

        host.insert(None, "B".into(), ViewId::new(1));
        assert_eq!(host.update_tab_bar(), Some(true));

        host.remove(0);
        assert_eq!(host.update_tab_bar(), Some(false));
    }

    #[test]
    fn tab_bar_always_visible_without_auto_hide() {
        let mut host = TabHost::new(false);
        host.insert(None, "A".into(), ViewId::new(0));

        assert_eq!(host.update_tab_bar(), None);
        assert!(host.is_bar_visible());
    }

    #[test]
    fn lookups_by_view_and_label() {
        let host = host_with(&["A", "B"]);

        assert_eq!(host.index_of(ViewId::new(1)), Some(1));
        assert_eq!(host.index_of(ViewId::new(7)), None);
        assert_eq!(host.index_of_label("B"), Some(1));
        assert_eq!(host.label_at(0), Some("A"));
        assert_eq!(host.view_at(4), None);
    }
}
