use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::error::{Result, ShapeError};

/// Geometric thresholds a region must satisfy to count as a shape.
///
/// Area is the enclosed area of the region's outer boundary in square pixels,
/// width and height come from its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Smallest accepted enclosed area
    #[schemars(range(min = 0.0))]
    pub min_area: f64,
    /// Largest accepted enclosed area, unbounded when absent
    pub max_area: Option<f64>,
    /// Smallest accepted bounding-box width
    pub min_width: u32,
    /// Smallest accepted bounding-box height
    pub min_height: u32,
    /// Largest accepted ratio of the longer bounding-box side to the shorter one
    pub max_aspect_ratio: Option<f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterPreset::Server.config()
    }
}

impl FilterConfig {
    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FilterConfig)
    }

    /// Reject thresholds that can never be satisfied together
    pub fn validate(&self) -> Result<()> {
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(ShapeError::Configuration(format!(
                "min_area must be a non-negative number, got {}",
                self.min_area
            )));
        }

        if let Some(max_area) = self.max_area {
            if !max_area.is_finite() {
                return Err(ShapeError::Configuration(format!(
                    "max_area must be finite, got {max_area}"
                )));
            }
            if max_area < self.min_area {
                return Err(ShapeError::Configuration(format!(
                    "max_area ({max_area}) is smaller than min_area ({})",
                    self.min_area
                )));
            }
        }

        if let Some(ratio) = self.max_aspect_ratio {
            if !ratio.is_finite() || ratio < 1.0 {
                return Err(ShapeError::Configuration(format!(
                    "max_aspect_ratio must be a finite number >= 1, got {ratio}"
                )));
            }
        }

        Ok(())
    }
}

/// Named threshold sets for the common deployments
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FilterPreset {
    /// Strict thresholds for uploaded worksheet photos: drops text and page-sized blobs
    #[default]
    Server,
    /// Looser thresholds for offline batch extraction
    Batch,
    /// Accept every outer region
    Permissive,
}

impl FilterPreset {
    pub fn config(&self) -> FilterConfig {
        match self {
            Self::Server => FilterConfig {
                min_area: 2000.0,
                max_area: Some(100_000.0),
                min_width: 30,
                min_height: 30,
                max_aspect_ratio: Some(4.0),
            },
            Self::Batch => FilterConfig {
                min_area: 500.0,
                max_area: None,
                min_width: 5,
                min_height: 5,
                max_aspect_ratio: None,
            },
            Self::Permissive => FilterConfig {
                min_area: 0.0,
                max_area: None,
                min_width: 1,
                min_height: 1,
                max_aspect_ratio: None,
            },
        }
    }

    /// Get a list of all preset names
    pub fn names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }
}

impl From<FilterPreset> for FilterConfig {
    fn from(preset: FilterPreset) -> Self {
        preset.config()
    }
}

/// Partial thresholds layered over a preset.
///
/// Unset fields keep the preset's value. Formats without `null` clear the
/// optional bounds with `unbounded_area` / `unbounded_aspect_ratio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_aspect_ratio: Option<f64>,
    /// Drop the upper area bound
    pub unbounded_area: bool,
    /// Drop the aspect-ratio bound
    pub unbounded_aspect_ratio: bool,
}

impl FilterOverrides {
    /// Layer these overrides over `base`
    pub fn apply_to(&self, base: FilterConfig) -> FilterConfig {
        FilterConfig {
            min_area: self.min_area.unwrap_or(base.min_area),
            max_area: if self.unbounded_area {
                None
            } else {
                self.max_area.or(base.max_area)
            },
            min_width: self.min_width.unwrap_or(base.min_width),
            min_height: self.min_height.unwrap_or(base.min_height),
            max_aspect_ratio: if self.unbounded_aspect_ratio {
                None
            } else {
                self.max_aspect_ratio.or(base.max_aspect_ratio)
            },
        }
    }
}
