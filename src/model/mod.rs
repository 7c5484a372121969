//! Data models for the image-map widget.

mod region;

pub use region::{Region, RegionId};
