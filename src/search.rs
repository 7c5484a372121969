//! Search/combo-box state for the naming dialog.
//!
//! Filtering is re-run against the full candidate set on every
//! keystroke; the candidate list is small and closed, so no index is
//! kept. All of this state is transient and discarded when the dialog
//! closes.

use crate::model::RegionId;

/// A nameable candidate offered by the combo-box.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: RegionId,
    pub name: String,
}

impl Candidate {
    pub fn new(id: RegionId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Transient combo-box state: filter text, candidates, and the pick.
#[derive(Debug, Clone, Default)]
pub struct ComboState {
    query: String,
    candidates: Vec<Candidate>,
    chosen: Option<RegionId>,
}

impl ComboState {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            query: String::new(),
            candidates,
            chosen: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Candidates whose name or decimal id contains the filter text,
    /// case-insensitively. An empty filter restores the full list.
    pub fn filtered(&self) -> Vec<&Candidate> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.candidates.iter().collect();
        }
        self.candidates
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle) || c.id.to_string().contains(&needle))
            .collect()
    }

    /// Pick a candidate by id. Returns false if the id is not in the
    /// candidate set.
    pub fn choose(&mut self, id: RegionId) -> bool {
        if self.candidates.iter().any(|c| c.id == id) {
            self.chosen = Some(id);
            true
        } else {
            false
        }
    }

    pub fn chosen(&self) -> Option<&Candidate> {
        let id = self.chosen?;
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Reset the transient filter and pick.
    pub fn reset(&mut self) {
        self.query.clear();
        self.chosen = None;
    }
}
