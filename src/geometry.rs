//! Percentage-based layout mathematics.
//!
//! This module contains the functions that turn natural image pixel
//! dimensions into responsive percentage positioning for hit zones and
//! markers, extracted for testability and reusability.

use crate::model::{Region, RegionId};

/// Fraction of a hit zone's side occupied by the marker image.
pub const MARKER_AREA_RATIO: f32 = 0.3;

/// Natural pixel dimensions of an image resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    /// Create a new size from width and height in pixels.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Click position relative to the top-left corner of the rendered map element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPoint {
    pub x: f32,
    pub y: f32,
}

impl ClickPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Apparent (possibly CSS-scaled) size of the rendered map element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentBox {
    pub width: f32,
    pub height: f32,
}

impl ApparentBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Errors raised while deriving or applying layout geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Regions count of zero would divide the map area by zero
    #[error("regions count must be greater than zero")]
    ZeroRegionsCount,

    /// The adjustment ratio must scale the hit zone, not erase it
    #[error("area adjustment ratio must be positive and finite, got {0}")]
    InvalidAdjustment(f32),

    /// An image resource reported a degenerate natural size
    #[error("image has no area: {width}x{height}")]
    EmptyImage { width: f32, height: f32 },

    /// The rendered element box cannot be zero-sized when translating clicks
    #[error("apparent element size is degenerate: {width}x{height}")]
    DegenerateBox { width: f32, height: f32 },
}

/// Percentage position and size of one hit zone.
///
/// The zone's top-left is shifted by half its side so its center, not
/// its corner, sits at the region's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaPlacement {
    pub left_pct: f32,
    pub top_pct: f32,
    pub width_pct: f32,
    pub height_pct: f32,
}

/// Percentage position and width of a marker.
///
/// The marker centers horizontally on the anchor point and rests its
/// bottom edge on it; height follows from the marker image's aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    pub left_pct: f32,
    pub top_pct: f32,
    pub width_pct: f32,
}

/// A hit zone placed for a specific region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedArea {
    pub id: RegionId,
    pub placement: AreaPlacement,
}

/// Full computed layout handed to the host for styling.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    /// The map container is clamped to the natural image size
    pub canvas_max: ImageSize,
    /// One placed hit zone per catalog region
    pub areas: Vec<PlacedArea>,
}

/// Derived layout geometry for one map/marker/config combination.
///
/// Computation is a pure function of its inputs; recomputing with the
/// same inputs yields the same geometry, so it can be re-run on every
/// resource-ready signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapGeometry {
    /// Natural map size the percentages are relative to
    pub map: ImageSize,
    /// Average hit-zone side assuming uniform packing over the map area
    pub area_normalized_side_px: f32,
    /// Hit-zone side after the whitespace adjustment ratio
    pub area_adjusted_side_px: f32,
    /// Shift applied so a zone's center sits at its region's coordinates
    pub offset_px: f32,
    /// Hit-zone width as a percentage of the map width
    pub area_width_pct: f32,
    /// Hit-zone height as a percentage of the map height
    pub area_height_pct: f32,
    /// Final marker width in natural map pixels
    pub marker_width_px: f32,
    /// Final marker height in natural map pixels
    pub marker_height_px: f32,
}

impl MapGeometry {
    /// Derive the layout geometry from natural image sizes and config.
    ///
    /// Fails fast on inputs that would otherwise propagate NaN or
    /// infinity into the layout.
    pub fn compute(
        map: ImageSize,
        marker: ImageSize,
        regions_count: u32,
        area_adjustment: f32,
    ) -> Result<Self, GeometryError> {
        if !map.is_valid() {
            return Err(GeometryError::EmptyImage {
                width: map.width,
                height: map.height,
            });
        }
        if !marker.is_valid() {
            return Err(GeometryError::EmptyImage {
                width: marker.width,
                height: marker.height,
            });
        }
        if regions_count == 0 {
            return Err(GeometryError::ZeroRegionsCount);
        }
        if !area_adjustment.is_finite() || area_adjustment <= 0.0 {
            return Err(GeometryError::InvalidAdjustment(area_adjustment));
        }

        let area_normalized_side_px = (map.width * map.height / regions_count as f32).sqrt();
        let area_adjusted_side_px = area_normalized_side_px * area_adjustment;

        // Marker keeps its image aspect, scaled to a fraction of the zone side
        let size_factor = marker.height / marker.width;
        let marker_width_px = area_adjusted_side_px * MARKER_AREA_RATIO;
        let marker_height_px = marker_width_px * size_factor;

        Ok(Self {
            map,
            area_normalized_side_px,
            area_adjusted_side_px,
            offset_px: area_adjusted_side_px / 2.0,
            area_width_pct: area_adjusted_side_px / map.width * 100.0,
            area_height_pct: area_adjusted_side_px / map.height * 100.0,
            marker_width_px,
            marker_height_px,
        })
    }

    /// Percentage placement for a region's hit zone.
    pub fn area_placement(&self, region: &Region) -> AreaPlacement {
        AreaPlacement {
            left_pct: (region.x - self.offset_px) / self.map.width * 100.0,
            top_pct: (region.y - self.offset_px) / self.map.height * 100.0,
            width_pct: self.area_width_pct,
            height_pct: self.area_height_pct,
        }
    }

    /// Percentage placement for a marker anchored at the given natural
    /// pixel coordinates.
    pub fn marker_placement(&self, x: f32, y: f32) -> MarkerPlacement {
        MarkerPlacement {
            left_pct: (x - self.marker_width_px / 2.0) / self.map.width * 100.0,
            top_pct: (y - self.marker_height_px) / self.map.height * 100.0,
            width_pct: self.marker_width_px / self.map.width * 100.0,
        }
    }

    /// Translate a click on the rendered element back to natural image
    /// pixels, correcting for any difference between the natural and
    /// rendered size.
    pub fn to_image_coords(
        &self,
        click: ClickPoint,
        bounds: ApparentBox,
    ) -> Result<(f32, f32), GeometryError> {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Err(GeometryError::DegenerateBox {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let x = click.x / bounds.width * self.map.width;
        let y = click.y / bounds.height * self.map.height;
        Ok((x, y))
    }

    /// Place every catalog region and bundle the canvas clamp.
    pub fn layout(&self, regions: &[Region]) -> MapLayout {
        MapLayout {
            canvas_max: self.map,
            areas: regions
                .iter()
                .map(|r| PlacedArea {
                    id: r.id,
                    placement: self.area_placement(r),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.01;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn geometry() -> MapGeometry {
        MapGeometry::compute(
            ImageSize::new(1000.0, 500.0),
            ImageSize::new(100.0, 150.0),
            20,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_normalized_side_and_zone_percentages() {
        let geo = geometry();
        // sqrt(1000 * 500 / 20) = sqrt(25000)
        assert!(approx_eq(geo.area_normalized_side_px, 158.11));
        assert!(approx_eq(geo.area_width_pct, 15.81));
        assert!(approx_eq(geo.area_height_pct, 31.62));
        assert!(approx_eq(geo.offset_px, 158.11 / 2.0));
    }

    #[test]
    fn test_adjustment_ratio_scales_zone_and_offset() {
        let geo = MapGeometry::compute(
            ImageSize::new(1000.0, 500.0),
            ImageSize::new(100.0, 150.0),
            20,
            0.5,
        )
        .unwrap();
        assert!(approx_eq(geo.area_adjusted_side_px, 158.11 / 2.0));
        assert!(approx_eq(geo.area_width_pct, 15.81 / 2.0));
        assert!(approx_eq(geo.offset_px, 158.11 / 4.0));
    }

    #[test]
    fn test_percentages_are_finite_and_positive() {
        let geo = geometry();
        for value in [
            geo.area_width_pct,
            geo.area_height_pct,
            geo.marker_width_px,
            geo.marker_height_px,
            geo.offset_px,
        ] {
            assert!(value.is_finite());
            assert!(value > 0.0);
        }
        assert!(geo.area_width_pct <= 100.0);
        assert!(geo.area_height_pct <= 100.0);
    }

    #[test]
    fn test_area_placement_centers_zone_on_region() {
        let geo = geometry();
        let region = Region::new(7, "Center", 500.0, 250.0);
        let placement = geo.area_placement(&region);

        assert!(approx_eq(
            placement.left_pct,
            (500.0 - geo.offset_px) / 1000.0 * 100.0
        ));
        assert!(approx_eq(
            placement.top_pct,
            (250.0 - geo.offset_px) / 500.0 * 100.0
        ));
        assert!(approx_eq(placement.width_pct, geo.area_width_pct));
        assert!(approx_eq(placement.height_pct, geo.area_height_pct));
    }

    #[test]
    fn test_marker_sizing_follows_image_aspect() {
        let geo = geometry();
        // marker image is 100x150, so height = width * 1.5
        assert!(approx_eq(
            geo.marker_width_px,
            geo.area_adjusted_side_px * MARKER_AREA_RATIO
        ));
        assert!(approx_eq(geo.marker_height_px, geo.marker_width_px * 1.5));
    }

    #[test]
    fn test_marker_placement_centers_and_bottom_anchors() {
        let geo = geometry();
        let placement = geo.marker_placement(500.0, 250.0);

        assert!(approx_eq(
            placement.left_pct,
            (500.0 - geo.marker_width_px / 2.0) / 1000.0 * 100.0
        ));
        assert!(approx_eq(
            placement.top_pct,
            (250.0 - geo.marker_height_px) / 500.0 * 100.0
        ));
        assert!(approx_eq(
            placement.width_pct,
            geo.marker_width_px / 1000.0 * 100.0
        ));
    }

    #[test]
    fn test_click_translation_corrects_for_scaling() {
        let geo = geometry();
        let (x, y) = geo
            .to_image_coords(ClickPoint::new(50.0, 50.0), ApparentBox::new(200.0, 100.0))
            .unwrap();
        assert!(approx_eq(x, 250.0));
        assert!(approx_eq(y, 250.0));
    }

    #[test]
    fn test_click_translation_identity_at_natural_size() {
        let geo = geometry();
        let (x, y) = geo
            .to_image_coords(
                ClickPoint::new(123.0, 45.0),
                ApparentBox::new(1000.0, 500.0),
            )
            .unwrap();
        assert!(approx_eq(x, 123.0));
        assert!(approx_eq(y, 45.0));
    }

    #[test]
    fn test_click_translation_rejects_zero_box() {
        let geo = geometry();
        let result = geo.to_image_coords(ClickPoint::new(10.0, 10.0), ApparentBox::new(0.0, 100.0));
        assert!(matches!(result, Err(GeometryError::DegenerateBox { .. })));
    }

    #[test]
    fn test_zero_regions_count_fails_fast() {
        let result = MapGeometry::compute(
            ImageSize::new(1000.0, 500.0),
            ImageSize::new(100.0, 150.0),
            0,
            1.0,
        );
        assert_eq!(result, Err(GeometryError::ZeroRegionsCount));
    }

    #[test]
    fn test_nonpositive_adjustment_fails_fast() {
        for ratio in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = MapGeometry::compute(
                ImageSize::new(1000.0, 500.0),
                ImageSize::new(100.0, 150.0),
                20,
                ratio,
            );
            assert!(matches!(result, Err(GeometryError::InvalidAdjustment(_))));
        }
    }

    #[test]
    fn test_empty_image_fails_fast() {
        let result = MapGeometry::compute(
            ImageSize::new(0.0, 500.0),
            ImageSize::new(100.0, 150.0),
            20,
            1.0,
        );
        assert!(matches!(result, Err(GeometryError::EmptyImage { .. })));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        assert_eq!(geometry(), geometry());
    }

    #[test]
    fn test_layout_places_every_region_by_id() {
        let geo = geometry();
        let regions = vec![
            Region::new(1, "A", 100.0, 100.0),
            Region::new(2, "B", 900.0, 400.0),
        ];
        let layout = geo.layout(&regions);

        assert_eq!(layout.canvas_max, geo.map);
        assert_eq!(layout.areas.len(), 2);
        assert_eq!(layout.areas[0].id, 1);
        assert_eq!(layout.areas[1].id, 2);
    }
}
