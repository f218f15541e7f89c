use std::collections::HashMap;

use crate::model::ViewId;

/// Last known tab index of views removed from the tab host.
///
/// Indices go stale as other tabs come and go; treat them as hints.
#[derive(Debug, Default)]
pub struct PositionCache {
    positions: HashMap<ViewId, usize>,
}

impl PositionCache {
    pub(crate) fn store(&mut self, view: ViewId, index: usize) {
        self.positions.insert(view, index);
    }

    /// Last recorded tab index of `view`.
    pub fn get(&self, view: ViewId) -> Option<usize> {
        self.positions.get(&view).copied()
    }

    /// Index to re-dock `view` at. Views never recorded go to the front.
    pub fn restore_index(&self, view: ViewId) -> usize {
        self.get(view).unwrap_or(0)
    }

    /// Overwrite entries with a snapshot of current tab positions.
    pub(crate) fn refresh<I>(&mut self, snapshot: I)
    where
        I: IntoIterator<Item = (ViewId, usize)>,
    {
        self.positions.extend(snapshot);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
