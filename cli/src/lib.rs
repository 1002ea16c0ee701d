pub mod batch;
pub mod server;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shapes::{FilterConfig, FilterOverrides, FilterPreset, Pipeline, ShapeError};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use server::ServerConfig;

#[derive(Error, Debug)]
pub enum ShapeCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("Missing input image path")]
    MissingInput,
    #[error("Missing output directory")]
    MissingOutputDir,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Settings shared by the batch extractor and the HTTP service
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ShapesConfig {
    /// Luma below this value counts as ink
    pub cutoff: u8,
    /// Named threshold set the `filter` overrides are layered on
    pub preset: Option<FilterPreset>,
    /// Per-threshold overrides of the preset
    pub filter: FilterOverrides,
    /// Input image for batch extraction
    pub input_path: Option<String>,
    /// Output directory for batch extraction
    pub output_dir: Option<String>,
    pub server: ServerConfig,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            cutoff: 240,
            preset: None,
            filter: FilterOverrides::default(),
            input_path: None,
            output_dir: None,
            server: ServerConfig::default(),
        }
    }
}

impl ShapesConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapeCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ShapeCliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapeCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ShapeCliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapeCliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ShapeCliError::UnsupportedFileFormat),
        }
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ShapeCliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Thresholds to use: `filter` overrides on top of the preset, or on top of `fallback`
    pub fn filter_config(&self, fallback: FilterPreset) -> FilterConfig {
        let base = self.preset.unwrap_or(fallback).config();
        self.filter.apply_to(base)
    }

    /// Build the pipeline these settings describe
    pub fn build_pipeline(&self, fallback: FilterPreset) -> Result<Pipeline, ShapeCliError> {
        Ok(Pipeline::builder()
            .with_filter_config(self.filter_config(fallback))
            .with_cutoff(self.cutoff)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_config_with_explicit_filter() {
        let config = ShapesConfig::from_toml(
            r#"
            cutoff = 200
            input_path = "input.png"
            output_dir = "output_shapes"

            [filter]
            min_area = 800.0
            min_width = 12
            min_height = 12

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.cutoff, 200);
        assert_eq!(config.input_path.as_deref(), Some("input.png"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, ServerConfig::default().host);

        let filter = config.filter_config(FilterPreset::Batch);
        assert_eq!(filter.min_area, 800.0);
        assert_eq!(filter.min_width, 12);
        // Unset thresholds come from the batch preset, not the server one
        assert_eq!(filter.max_area, None);
        assert_eq!(filter.max_aspect_ratio, None);
        assert_eq!(
            config.filter_config(FilterPreset::Server).max_aspect_ratio,
            Some(4.0)
        );
    }

    #[test]
    fn test_toml_config_can_drop_server_bounds() {
        let config = ShapesConfig::from_toml(
            r#"
            preset = "server"

            [filter]
            min_area = 100.0
            unbounded_area = true
            unbounded_aspect_ratio = true
            "#,
        )
        .unwrap();

        let filter = config.filter_config(FilterPreset::Batch);
        assert_eq!(filter.min_area, 100.0);
        assert_eq!(filter.min_width, 30);
        assert_eq!(filter.max_area, None);
        assert_eq!(filter.max_aspect_ratio, None);
    }

    #[test]
    fn test_preset_by_name() {
        let config = ShapesConfig::from_json(r#"{ "preset": "permissive" }"#).unwrap();
        assert_eq!(config.filter_config(FilterPreset::Server), FilterPreset::Permissive.config());

        let empty = ShapesConfig::from_json("{}").unwrap();
        assert_eq!(empty.filter_config(FilterPreset::Batch), FilterPreset::Batch.config());
        assert_eq!(empty.cutoff, 240);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = ShapesConfig::from_file("settings.yaml").unwrap_err();
        assert!(matches!(err, ShapeCliError::UnsupportedFileFormat));
    }

    #[test]
    fn test_invalid_thresholds_fail_pipeline_build() {
        let config = ShapesConfig::from_json(r#"{ "filter": { "min_area": 10.0, "max_area": 1.0 } }"#).unwrap();
        let err = config.build_pipeline(FilterPreset::Server).unwrap_err();
        assert!(matches!(err, ShapeCliError::Shape(ShapeError::Configuration(_))));
    }

    #[test]
    fn test_config_file_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shapes.toml");
        let config = ShapesConfig {
            preset: Some(FilterPreset::Batch),
            ..ShapesConfig::default()
        };
        fs::write(&path, config.to_toml().unwrap()).unwrap();
        assert_eq!(ShapesConfig::from_file(&path).unwrap(), config);
    }
}
