use std::collections::BTreeMap;

use crate::errors::ViewError;
use crate::model::{ViewId, ViewKey};

/// Mapping from `(group, name)` to view handles.
///
/// Entries are never pruned; a view keeps its key for its whole lifetime.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    groups: BTreeMap<String, BTreeMap<String, ViewId>>,
}

impl ViewRegistry {
    /// Register `view` under `(group, name)`.
    ///
    /// Returns `Ok(false)` when the identical view is already registered
    /// under this key.
    pub(crate) fn add(
        &mut self,
        view: ViewId,
        name: &str,
        group: &str,
    ) -> Result<bool, ViewError> {
        match self.find(name, group) {
            Some(existing) if existing == view => return Ok(false),
            Some(_) => {
                return Err(ViewError::DuplicateName {
                    group: group.to_owned(),
                    name: name.to_owned(),
                });
            },
            None => {},
        }

        if let Some(key) = self.name_of(view) {
            return Err(ViewError::AlreadyRegistered {
                view,
                group: key.group,
                name: key.name,
            });
        }

        self.groups
            .entry(group.to_owned())
            .or_default()
            .insert(name.to_owned(), view);
        Ok(true)
    }

    /// Return the view registered under `(group, name)`.
    pub fn find(&self, name: &str, group: &str) -> Option<ViewId> {
        self.groups.get(group)?.get(name).copied()
    }

    /// Reverse lookup: return the first key, in group order, mapping to
    /// `view`.
    ///
    /// Linear in the number of registered views.
    pub fn name_of(&self, view: ViewId) -> Option<ViewKey> {
        self.iter()
            .find(|(_, candidate)| *candidate == view)
            .map(|(key, _)| key)
    }

    /// Iterate over all registrations in `(group, name)` order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewKey, ViewId)> + '_ {
        self.groups.iter().flat_map(|(group, views)| {
            views
                .iter()
                .map(move |(name, view)| (ViewKey::new(group, name), *view))
        })
    }

    /// Return the number of registered views.
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeMap::is_empty)
    }
}
