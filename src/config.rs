//! Host-supplied configuration for the image-map widget.
//!
//! The surrounding workflow engine supplies configuration as a JSON
//! document with loosely typed values (notably the boolean-like
//! `adminMode` string). Parsing and validation happen here, before any
//! geometry can run.

use serde::{Deserialize, Serialize};

use crate::model::{Region, RegionId};
use crate::search::Candidate;

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Operating mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AdminMode {
    /// End users toggle pre-defined regions
    #[default]
    Runtime,
    /// Operators author new spots by clicking the image
    Admin,
}

impl AdminMode {
    pub fn is_admin(self) -> bool {
        matches!(self, AdminMode::Admin)
    }
}

// The host serializes this flag as the strings "true"/"false".
impl TryFrom<String> for AdminMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(AdminMode::Admin),
            "false" => Ok(AdminMode::Runtime),
            _ => Err(ConfigError::InvalidAdminMode(value)),
        }
    }
}

impl From<AdminMode> for String {
    fn from(mode: AdminMode) -> Self {
        match mode {
            AdminMode::Admin => "true".to_string(),
            AdminMode::Runtime => "false".to_string(),
        }
    }
}

/// Widget configuration as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Pre-defined region catalog, in source-image pixel coordinates
    pub regions: Vec<Region>,

    /// Reference to the map image resource
    pub map_resource: String,

    /// Reference to the marker image resource
    pub marker_resource: String,

    /// Expected number of regions, used to size hit zones
    pub regions_count: u32,

    /// Hit-zone scale correction for non-map whitespace in the image
    #[serde(default = "default_area_adjustment")]
    pub area_adjustment: f32,

    /// Operating mode, supplied by the host as "true"/"false"
    #[serde(default)]
    pub admin_mode: AdminMode,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_area_adjustment() -> f32 {
    1.0
}

impl MapConfig {
    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the numeric invariants the geometry engine relies on, and
    /// reject duplicate ids in the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions_count == 0 {
            return Err(ConfigError::ZeroRegionsCount);
        }
        if !self.area_adjustment.is_finite() || self.area_adjustment <= 0.0 {
            return Err(ConfigError::InvalidAreaAdjustment(self.area_adjustment));
        }

        let mut seen = std::collections::HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.id) {
                return Err(ConfigError::DuplicateRegionId(region.id));
            }
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up a catalog region by id.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Candidate list for the naming combo-box.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.regions
            .iter()
            .map(|r| Candidate::new(r.id, &r.name))
            .collect()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error("configuration version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A zero region count would divide the map area by zero
    #[error("regionsCount must be greater than zero")]
    ZeroRegionsCount,

    /// The hit-zone adjustment must remain a positive scale
    #[error("areaAdjustment must be a positive finite ratio, got {0}")]
    InvalidAreaAdjustment(f32),

    /// Two catalog entries share an id
    #[error("duplicate region id {0} in regions catalog")]
    DuplicateRegionId(RegionId),

    /// The boolean-like mode string is neither "true" nor "false"
    #[error("adminMode must be \"true\" or \"false\", got {0:?}")]
    InvalidAdminMode(String),
}
