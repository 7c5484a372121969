//! Message and effect types for the image-map widget.
//!
//! The host resolves raw UI events into typed messages at the event
//! boundary; the widget answers with effects describing what the host
//! must render or forward.

use crate::geometry::{ApparentBox, ClickPoint, ImageSize, MapLayout, MarkerPlacement};
use crate::model::{Region, RegionId};

/// Role of the element under a click, resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Bare map surface with no interactive element under the cursor
    Background,
    /// A pre-defined hit zone
    Area(RegionId),
    /// A visible selection marker
    Marker(RegionId),
    /// An authored spot tag
    Spot(RegionId),
}

/// Messages that drive the widget state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Resources
    /// Natural size of the map image became available (or changed)
    MapResourceReady(ImageSize),
    /// Natural size of the marker image became available (or changed)
    MarkerResourceReady(ImageSize),

    // Map interaction
    /// The user clicked the map
    MapClicked {
        target: ClickTarget,
        /// Click position relative to the rendered element
        position: ClickPoint,
        /// Apparent size of the rendered element
        bounds: ApparentBox,
    },

    // Naming dialog
    /// Combo-box filter text changed
    SearchChanged(String),
    /// A combo-box candidate was picked
    CandidateChosen(RegionId),
    /// Save button of the naming dialog pressed
    SpotSaved,
    /// Naming dialog dismissed without saving
    SpotCancelled,

    // Reset
    /// Reset button pressed
    ResetRequested,
    /// The user answered the reset confirmation dialog
    ResetDecision(bool),
}

/// Side effects the host must apply after an update.
///
/// Every rendered element is addressed by its stable region id.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The selection changed; forward the full ordered payload to the host
    SelectionChanged(Vec<Region>),
    /// Layout was (re)computed; restyle the canvas and hit zones
    LayoutChanged(MapLayout),
    /// Show the marker for a region
    ShowMarker {
        id: RegionId,
        placement: MarkerPlacement,
    },
    /// Hide the marker for a region
    HideMarker { id: RegionId },
    /// Render a newly authored spot
    SpotAdded {
        id: RegionId,
        placement: MarkerPlacement,
    },
    /// Remove an authored spot's visual
    SpotRemoved { id: RegionId },
    /// Open the naming dialog
    NamingDialogOpened,
    /// Close the naming dialog
    NamingDialogClosed,
    /// Ask the user to confirm a destructive reset
    ResetConfirmationRequested,
}
