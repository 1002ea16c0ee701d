use image::Rgba;
use crate::{
    algorithms::{BoundaryFillRasterizer, ContourRegionDetector, GeometricFilter, LumaThresholdBinarizer, WHITE},
    config::{FilterConfig, FilterPreset},
    error::Result,
    pipeline::Pipeline,
    traits::{Binarizer, MaskRasterizer, RegionDetector, RegionFilter},
};

/// Builder for creating shape extraction pipelines with a fluent API
pub struct PipelineBuilder {
    binarizer: Option<Box<dyn Binarizer>>,
    detector: Option<Box<dyn RegionDetector>>,
    filter: Option<Box<dyn RegionFilter>>,
    rasterizer: Option<Box<dyn MaskRasterizer>>,
    config: FilterConfig,
    background_fill: Rgba<u8>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            binarizer: None,
            detector: None,
            filter: None,
            rasterizer: None,
            config: FilterConfig::default(),
            background_fill: WHITE,
        }
    }

    /// Use these thresholds for the default geometric filter
    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a named threshold set
    pub fn with_preset(self, preset: FilterPreset) -> Self {
        self.with_filter_config(preset.config())
    }

    /// Threshold binarization at `cutoff` instead of the default 240
    pub fn with_cutoff(self, cutoff: u8) -> Self {
        self.set_binarizer(LumaThresholdBinarizer { cutoff })
    }

    /// Colour written over erased shapes in the background
    pub fn with_background_fill(mut self, fill: Rgba<u8>) -> Self {
        self.background_fill = fill;
        self
    }

    /// Set the binarizer (replaces any existing one)
    pub fn set_binarizer<B>(mut self, binarizer: B) -> Self
    where
        B: Binarizer + 'static,
    {
        self.binarizer = Some(Box::new(binarizer));
        self
    }

    /// Set the region detector (replaces any existing one)
    pub fn set_region_detector<D>(mut self, detector: D) -> Self
    where
        D: RegionDetector + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Set a custom region filter; the filter config is then only validated, not applied
    pub fn set_region_filter<F>(mut self, filter: F) -> Self
    where
        F: RegionFilter + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Set the mask rasterizer (replaces any existing one)
    pub fn set_rasterizer<R>(mut self, rasterizer: R) -> Self
    where
        R: MaskRasterizer + 'static,
    {
        self.rasterizer = Some(Box::new(rasterizer));
        self
    }

    /// Build the pipeline with default components if not specified.
    ///
    /// Fails with a configuration error before any image is touched if the
    /// thresholds are inconsistent.
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;

        let filter = match self.filter {
            Some(filter) => filter,
            None => Box::new(GeometricFilter::new(self.config.clone())?),
        };

        Ok(Pipeline::new(
            self.binarizer.unwrap_or_else(|| Box::new(LumaThresholdBinarizer::default())),
            self.detector.unwrap_or_else(|| Box::new(ContourRegionDetector)),
            filter,
            self.rasterizer.unwrap_or_else(|| Box::new(BoundaryFillRasterizer)),
            self.config,
            self.background_fill,
        ))
    }

    /// Build a pipeline for one of the named presets
    pub fn build_preset(preset: FilterPreset) -> Result<Pipeline> {
        Self::new().with_preset(preset).build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
