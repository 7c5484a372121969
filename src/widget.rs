//! The image-map widget state machine.
//!
//! Routes typed click targets and dialog messages to the geometry,
//! selection, and capture components, and reports the outcome as a
//! list of effects for the host to apply. A failed update returns an
//! error and never corrupts the selection payload.

use crate::capture::{CaptureState, SpotError};
use crate::config::MapConfig;
use crate::geometry::{ApparentBox, ClickPoint, GeometryError, ImageSize, MapGeometry, MapLayout};
use crate::message::{ClickTarget, Effect, Message};
use crate::model::RegionId;
use crate::selection::{SelectionState, Toggle};

/// Errors raised while applying a message.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// Interaction arrived before both image resources reported their
    /// natural size
    #[error("map layout is not ready yet")]
    NotReady,

    /// The clicked id has no catalog entry
    #[error("unknown region id {0}")]
    UnknownRegion(RegionId),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Spot(#[from] SpotError),
}

/// The image-map widget.
///
/// Owns the selection list, the admin capture flow, and the derived
/// layout geometry. The host feeds it [`Message`]s and applies the
/// returned [`Effect`]s.
#[derive(Debug)]
pub struct MapWidget {
    config: MapConfig,
    map_size: Option<ImageSize>,
    marker_size: Option<ImageSize>,
    geometry: Option<MapGeometry>,
    selection: SelectionState,
    capture: CaptureState,
    awaiting_reset: bool,
}

impl MapWidget {
    /// Create a widget from validated configuration.
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            map_size: None,
            marker_size: None,
            geometry: None,
            selection: SelectionState::new(),
            capture: CaptureState::default(),
            awaiting_reset: false,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    /// Whether layout geometry has been derived yet.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some()
    }

    /// Current layout, if both resources have reported their size.
    pub fn layout(&self) -> Option<MapLayout> {
        self.geometry.map(|g| g.layout(&self.config.regions))
    }

    /// Apply a message and return the effects the host must perform.
    pub fn update(&mut self, message: Message) -> Result<Vec<Effect>, WidgetError> {
        match message {
            Message::MapResourceReady(size) => {
                self.map_size = Some(size);
                self.recompute_geometry()
            }
            Message::MarkerResourceReady(size) => {
                self.marker_size = Some(size);
                self.recompute_geometry()
            }
            Message::MapClicked {
                target,
                position,
                bounds,
            } => self.handle_click(target, position, bounds),
            Message::SearchChanged(query) => self.handle_search(query),
            Message::CandidateChosen(id) => self.handle_candidate(id),
            Message::SpotSaved => self.handle_spot_saved(),
            Message::SpotCancelled => self.handle_spot_cancelled(),
            Message::ResetRequested => self.handle_reset_requested(),
            Message::ResetDecision(confirmed) => self.handle_reset_decision(confirmed),
        }
    }

    /// Recompute layout from the latest natural sizes.
    ///
    /// Deferred until both resources have reported; safe to re-run on
    /// every ready signal since the computation is pure.
    fn recompute_geometry(&mut self) -> Result<Vec<Effect>, WidgetError> {
        let (Some(map), Some(marker)) = (self.map_size, self.marker_size) else {
            log::debug!("layout deferred, waiting for remaining image resource");
            return Ok(Vec::new());
        };

        let geometry = MapGeometry::compute(
            map,
            marker,
            self.config.regions_count,
            self.config.area_adjustment,
        )?;
        self.geometry = Some(geometry);
        log::debug!(
            "layout computed: {}x{} map, {} regions, zone {:.2}% x {:.2}%",
            map.width,
            map.height,
            self.config.regions_count,
            geometry.area_width_pct,
            geometry.area_height_pct
        );
        Ok(vec![Effect::LayoutChanged(
            geometry.layout(&self.config.regions),
        )])
    }

    /// Flat dispatch over mode and click-target role.
    fn handle_click(
        &mut self,
        target: ClickTarget,
        position: ClickPoint,
        bounds: ApparentBox,
    ) -> Result<Vec<Effect>, WidgetError> {
        if self.config.admin_mode.is_admin() {
            match target {
                ClickTarget::Background | ClickTarget::Area(_) => self.capture_at(position, bounds),
                ClickTarget::Marker(id) | ClickTarget::Spot(id) => self.remove_spot(id),
            }
        } else {
            match target {
                ClickTarget::Area(id) | ClickTarget::Marker(id) => self.toggle_region(id),
                ClickTarget::Background => {
                    log::debug!("background click ignored");
                    Ok(Vec::new())
                }
                ClickTarget::Spot(id) => {
                    log::warn!("spot {id} clicked outside admin mode, ignoring");
                    Ok(Vec::new())
                }
            }
        }
    }

    fn toggle_region(&mut self, id: RegionId) -> Result<Vec<Effect>, WidgetError> {
        let geometry = self.geometry.ok_or(WidgetError::NotReady)?;
        let region = self
            .config
            .region(id)
            .cloned()
            .ok_or(WidgetError::UnknownRegion(id))?;
        let (x, y) = (region.x, region.y);

        let mut effects = Vec::new();
        match self.selection.toggle(region) {
            Toggle::Added => {
                log::debug!("region {id} selected");
                effects.push(Effect::ShowMarker {
                    id,
                    placement: geometry.marker_placement(x, y),
                });
            }
            Toggle::Removed => {
                log::debug!("region {id} deselected");
                effects.push(Effect::HideMarker { id });
            }
        }
        effects.push(self.emit_selection());
        Ok(effects)
    }

    fn capture_at(
        &mut self,
        position: ClickPoint,
        bounds: ApparentBox,
    ) -> Result<Vec<Effect>, WidgetError> {
        if self.capture.is_naming() {
            log::warn!("map clicked while the naming dialog is open, ignoring");
            return Ok(Vec::new());
        }
        let geometry = self.geometry.ok_or(WidgetError::NotReady)?;
        let (x, y) = geometry.to_image_coords(position, bounds)?;

        log::debug!("captured spot candidate at ({x:.1}, {y:.1})");
        self.capture.begin(x, y, self.config.candidates());
        Ok(vec![Effect::NamingDialogOpened])
    }

    fn remove_spot(&mut self, id: RegionId) -> Result<Vec<Effect>, WidgetError> {
        match self.selection.remove(id) {
            Some(_) => {
                log::debug!("spot {id} removed");
                Ok(vec![Effect::SpotRemoved { id }, self.emit_selection()])
            }
            None => {
                log::warn!("remove requested for unknown spot {id}");
                Ok(Vec::new())
            }
        }
    }

    fn handle_search(&mut self, query: String) -> Result<Vec<Effect>, WidgetError> {
        match self.capture.combo_mut() {
            Some(combo) => {
                combo.set_query(query);
                Ok(Vec::new())
            }
            None => {
                log::warn!("search input without an open naming dialog");
                Ok(Vec::new())
            }
        }
    }

    fn handle_candidate(&mut self, id: RegionId) -> Result<Vec<Effect>, WidgetError> {
        let Some(combo) = self.capture.combo_mut() else {
            log::warn!("candidate chosen without an open naming dialog");
            return Ok(Vec::new());
        };
        if !combo.choose(id) {
            return Err(SpotError::UnknownCandidate(id).into());
        }
        log::debug!("candidate {id} chosen");
        Ok(Vec::new())
    }

    fn handle_spot_saved(&mut self) -> Result<Vec<Effect>, WidgetError> {
        let geometry = self.geometry.ok_or(WidgetError::NotReady)?;
        let taken = self.selection.ids();
        let region = self.capture.commit(&taken)?;

        let id = region.id;
        let placement = geometry.marker_placement(region.x, region.y);
        self.selection.insert(region);
        log::debug!("spot {id} saved");
        Ok(vec![
            Effect::SpotAdded { id, placement },
            self.emit_selection(),
            Effect::NamingDialogClosed,
        ])
    }

    fn handle_spot_cancelled(&mut self) -> Result<Vec<Effect>, WidgetError> {
        if self.capture.cancel() {
            log::debug!("spot capture cancelled");
            Ok(vec![Effect::NamingDialogClosed])
        } else {
            log::warn!("cancel without an open naming dialog");
            Ok(Vec::new())
        }
    }

    fn handle_reset_requested(&mut self) -> Result<Vec<Effect>, WidgetError> {
        if self.selection.is_empty() {
            log::debug!("reset requested with empty selection, nothing to do");
            return Ok(Vec::new());
        }
        if self.awaiting_reset {
            log::warn!("reset already awaiting confirmation");
            return Ok(Vec::new());
        }
        self.awaiting_reset = true;
        Ok(vec![Effect::ResetConfirmationRequested])
    }

    fn handle_reset_decision(&mut self, confirmed: bool) -> Result<Vec<Effect>, WidgetError> {
        if !self.awaiting_reset {
            log::warn!("reset decision without a pending confirmation");
            return Ok(Vec::new());
        }
        self.awaiting_reset = false;

        if !confirmed {
            log::debug!("reset declined, selection unchanged");
            return Ok(Vec::new());
        }

        let ids = self.selection.clear();
        log::debug!("selection reset, {} markers cleared", ids.len());
        let mut effects: Vec<Effect> = ids
            .into_iter()
            .map(|id| Effect::HideMarker { id })
            .collect();
        effects.push(self.emit_selection());
        Ok(effects)
    }

    fn emit_selection(&self) -> Effect {
        Effect::SelectionChanged(self.selection.selected().to_vec())
    }
}
