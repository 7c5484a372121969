//! Spot capture flow for admin mode.
//!
//! A click on the map captures a coordinate and opens the naming
//! dialog; the capture stays pending until the operator confirms a
//! name or cancels. A commit that fails validation leaves the pending
//! capture (and the open dialog) untouched.

use crate::model::{Region, RegionId};
use crate::search::{Candidate, ComboState};

/// Errors raised when committing a pending spot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpotError {
    /// Save was requested before a name was picked from the list
    #[error("no name chosen for the new spot")]
    NameNotChosen,

    /// The picked id is not part of the candidate set
    #[error("candidate {0} is not in the name list")]
    UnknownCandidate(RegionId),

    /// The picked id already has an entry in the selection list
    #[error("a spot with id {0} already exists")]
    DuplicateId(RegionId),

    /// No capture is in progress
    #[error("no spot capture in progress")]
    NotCapturing,
}

/// A captured coordinate awaiting a name, in natural map pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSpot {
    pub x: f32,
    pub y: f32,
}

/// State machine for authoring a new spot.
#[derive(Debug, Clone, Default)]
pub enum CaptureState {
    /// No capture in progress
    #[default]
    Idle,
    /// A coordinate has been captured and the naming dialog is open
    Naming {
        pending: PendingSpot,
        combo: ComboState,
    },
}

impl CaptureState {
    pub fn is_naming(&self) -> bool {
        matches!(self, CaptureState::Naming { .. })
    }

    /// The coordinate currently awaiting a name, if any.
    pub fn pending(&self) -> Option<PendingSpot> {
        match self {
            CaptureState::Naming { pending, .. } => Some(*pending),
            CaptureState::Idle => None,
        }
    }

    pub fn combo(&self) -> Option<&ComboState> {
        match self {
            CaptureState::Naming { combo, .. } => Some(combo),
            CaptureState::Idle => None,
        }
    }

    pub fn combo_mut(&mut self) -> Option<&mut ComboState> {
        match self {
            CaptureState::Naming { combo, .. } => Some(combo),
            CaptureState::Idle => None,
        }
    }

    /// Start a capture at the given natural pixel coordinates, opening
    /// a fresh combo-box over the full candidate set.
    pub fn begin(&mut self, x: f32, y: f32, candidates: Vec<Candidate>) {
        *self = CaptureState::Naming {
            pending: PendingSpot { x, y },
            combo: ComboState::new(candidates),
        };
    }

    /// Discard the pending capture and its transient search state.
    /// Returns false if nothing was in progress.
    pub fn cancel(&mut self) -> bool {
        if self.is_naming() {
            *self = CaptureState::Idle;
            true
        } else {
            false
        }
    }

    /// Validate and commit the pending spot as a new region record.
    ///
    /// `taken` lists the ids already present in the selection; a
    /// colliding pick is rejected rather than silently overwritten.
    pub fn commit(&mut self, taken: &[RegionId]) -> Result<Region, SpotError> {
        let CaptureState::Naming { pending, combo } = &*self else {
            return Err(SpotError::NotCapturing);
        };
        let candidate = combo.chosen().cloned().ok_or(SpotError::NameNotChosen)?;
        if taken.contains(&candidate.id) {
            return Err(SpotError::DuplicateId(candidate.id));
        }

        let region = Region::new(candidate.id, &candidate.name, pending.x, pending.y);
        *self = CaptureState::Idle;
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![Candidate::new(1, "North"), Candidate::new(2, "South")]
    }

    #[test]
    fn test_begin_opens_naming_with_fresh_combo() {
        let mut state = CaptureState::default();
        assert!(!state.is_naming());

        state.begin(250.0, 125.0, candidates());
        assert!(state.is_naming());
        assert_eq!(state.pending(), Some(PendingSpot { x: 250.0, y: 125.0 }));
        assert!(state.combo().unwrap().query().is_empty());
    }

    #[test]
    fn test_commit_without_name_keeps_capture_open() {
        let mut state = CaptureState::default();
        state.begin(10.0, 20.0, candidates());

        assert_eq!(state.commit(&[]), Err(SpotError::NameNotChosen));
        assert!(state.is_naming());
    }

    #[test]
    fn test_commit_builds_region_from_pick_and_capture() {
        let mut state = CaptureState::default();
        state.begin(10.0, 20.0, candidates());
        state.combo_mut().unwrap().choose(2);

        let region = state.commit(&[]).unwrap();
        assert_eq!(region, Region::new(2, "South", 10.0, 20.0));
        assert!(!state.is_naming());
    }

    #[test]
    fn test_duplicate_id_is_rejected_not_overwritten() {
        let mut state = CaptureState::default();
        state.begin(10.0, 20.0, candidates());
        state.combo_mut().unwrap().choose(1);

        assert_eq!(state.commit(&[1]), Err(SpotError::DuplicateId(1)));
        // Dialog stays open so the operator can pick another name
        assert!(state.is_naming());
        assert!(state.commit(&[]).is_ok());
    }

    #[test]
    fn test_commit_when_idle_fails() {
        let mut state = CaptureState::default();
        assert_eq!(state.commit(&[]), Err(SpotError::NotCapturing));
    }

    #[test]
    fn test_cancel_discards_pending_capture() {
        let mut state = CaptureState::default();
        state.begin(10.0, 20.0, candidates());
        state.combo_mut().unwrap().set_query("nor");

        assert!(state.cancel());
        assert!(!state.is_naming());
        assert!(!state.cancel());
    }
}
