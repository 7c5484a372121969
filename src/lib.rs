//! PinMap - clickable image-map widget core.
//!
//! An image overlaid with proportionally positioned hit zones that a
//! user toggles to build a selection list, plus an admin mode for
//! authoring new named spots by clicking the image. This crate holds
//! the percentage-based geometry engine, the selection state machine,
//! and the capture/combo-box flow; rendering and dialog chrome stay
//! with the host, which drives the widget through [`Message`]s and
//! applies the returned [`Effect`]s.

pub mod capture;
pub mod config;
pub mod geometry;
pub mod message;
pub mod model;
pub mod resource;
pub mod search;
pub mod selection;
pub mod widget;

pub use config::{AdminMode, CONFIG_VERSION, ConfigError, MapConfig};
pub use geometry::{
    ApparentBox, ClickPoint, GeometryError, ImageSize, MARKER_AREA_RATIO, MapGeometry, MapLayout,
    MarkerPlacement,
};
pub use message::{ClickTarget, Effect, Message};
pub use model::{Region, RegionId};
pub use widget::{MapWidget, WidgetError};
