//! Selection tracking for batch actions.
//!
//! A selection is always scoped to the view produced by the active filter
//! criteria: changing the criteria clears it, and ids that are not visible
//! in a given view are dropped before dispatch.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::filter::FilterCriteria;
use crate::models::FileRecord;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: BTreeSet<Uuid>,
    criteria: FilterCriteria,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Add the id if absent, remove it if present. Idempotent in the sense
    /// that toggling twice restores the previous state.
    pub fn toggle(&mut self, id: Uuid) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Record a criteria change. Any change empties the selection, even if
    /// previously selected ids would remain visible under the new view.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            self.criteria = criteria;
            self.ids.clear();
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.ids.iter().copied()
    }

    /// Drop ids that are not present in the given (filtered) view.
    pub fn retain_visible(&mut self, visible: &[FileRecord]) {
        self.ids.retain(|id| visible.iter().any(|r| r.id == *id));
    }

    /// The visible records this selection targets, in view order.
    pub fn targets<'a>(&self, visible: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        visible.iter().filter(|r| self.ids.contains(&r.id)).collect()
    }
}

impl FromIterator<Uuid> for Selection {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Selection {
            ids: iter.into_iter().collect(),
            criteria: FilterCriteria::default(),
        }
    }
}
