//! Selection state for the image map.
//!
//! Holds the ordered list of currently selected regions. The list is
//! the authoritative payload handed to the host on every mutation.

use crate::model::{Region, RegionId};

/// Outcome of a toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The region was appended to the selection
    Added,
    /// The region was removed from the selection
    Removed,
}

/// Ordered list of selected regions, at most one entry per id.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Vec<Region>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection in insertion order.
    pub fn selected(&self) -> &[Region] {
        &self.selected
    }

    /// Ids of the current selection in insertion order.
    pub fn ids(&self) -> Vec<RegionId> {
        self.selected.iter().map(|r| r.id).collect()
    }

    pub fn is_selected(&self, id: RegionId) -> bool {
        self.selected.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle a region in or out of the selection.
    pub fn toggle(&mut self, region: Region) -> Toggle {
        if self.is_selected(region.id) {
            self.remove(region.id);
            Toggle::Removed
        } else {
            self.selected.push(region);
            Toggle::Added
        }
    }

    /// Append a region, refusing duplicates. Returns false if the id
    /// was already present.
    pub fn insert(&mut self, region: Region) -> bool {
        if self.is_selected(region.id) {
            return false;
        }
        self.selected.push(region);
        true
    }

    /// Remove a region by id, returning it if present.
    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        let index = self.selected.iter().position(|r| r.id == id)?;
        Some(self.selected.remove(index))
    }

    /// Empty the selection, returning the ids that were cleared.
    pub fn clear(&mut self) -> Vec<RegionId> {
        let ids = self.ids();
        self.selected.clear();
        ids
    }

    /// Serialize the selection as the JSON array payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: RegionId) -> Region {
        Region::new(id, &format!("Region {id}"), id as f32 * 10.0, id as f32 * 20.0)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = SelectionState::new();

        assert_eq!(state.toggle(region(1)), Toggle::Added);
        assert!(state.is_selected(1));
        assert_eq!(state.len(), 1);

        assert_eq!(state.toggle(region(1)), Toggle::Removed);
        assert!(!state.is_selected(1));
        assert!(state.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_prior_state() {
        let mut state = SelectionState::new();
        state.toggle(region(1));
        state.toggle(region(2));
        let before = state.selected().to_vec();

        state.toggle(region(3));
        state.toggle(region(3));

        assert_eq!(state.selected(), &before[..]);
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut state = SelectionState::new();
        assert!(state.insert(region(5)));
        assert!(!state.insert(region(5)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut state = SelectionState::new();
        state.toggle(region(3));
        state.toggle(region(1));
        state.toggle(region(2));

        assert_eq!(state.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_clear_returns_cleared_ids() {
        let mut state = SelectionState::new();
        state.toggle(region(1));
        state.toggle(region(2));

        assert_eq!(state.clear(), vec![1, 2]);
        assert!(state.is_empty());
        assert!(state.clear().is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let mut state = SelectionState::new();
        state.toggle(Region::new(4, "Dock", 120.0, 40.0));

        let json = state.to_json().unwrap();
        assert_eq!(json, r#"[{"id":4,"name":"Dock","x":120.0,"y":40.0}]"#);
    }
}
