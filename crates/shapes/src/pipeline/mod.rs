pub mod builder;

use image::{DynamicImage, GrayImage, Rgba};
use tracing::{debug, info};
use crate::{
    algorithms::{accumulate_mask, composite_cutout, reconstruct_background, FilterDecision},
    config::FilterConfig,
    error::{Result, ShapeError},
    traits::{Binarizer, MaskRasterizer, RegionDetector, RegionFilter},
    types::{ExtractedShape, SegmentationResult},
};

/// Shape extraction pipeline: binarize, detect, filter, rasterize, composite, erase
pub struct Pipeline {
    binarizer: Box<dyn Binarizer>,
    detector: Box<dyn RegionDetector>,
    filter: Box<dyn RegionFilter>,
    rasterizer: Box<dyn MaskRasterizer>,
    config: FilterConfig,
    background_fill: Rgba<u8>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("background_fill", &self.background_fill)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        binarizer: Box<dyn Binarizer>,
        detector: Box<dyn RegionDetector>,
        filter: Box<dyn RegionFilter>,
        rasterizer: Box<dyn MaskRasterizer>,
        config: FilterConfig,
        background_fill: Rgba<u8>,
    ) -> Self {
        Self {
            binarizer,
            detector,
            filter,
            rasterizer,
            config,
            background_fill,
        }
    }

    /// Decode an encoded image and process it
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<SegmentationResult> {
        if bytes.is_empty() {
            return Err(ShapeError::InvalidInput("no image data".to_string()));
        }
        let image = image::load_from_memory(bytes)
            .map_err(|e| ShapeError::InvalidInput(format!("could not decode image: {e}")))?;
        self.process(&image)
    }

    /// Process an image through the entire pipeline
    pub fn process(&self, image: &DynamicImage) -> Result<SegmentationResult> {
        let (width, height) = (image.width(), image.height());

        // Step 1: Binarize
        let mask = self.binarizer.binarize(image)?;

        // Step 2: Find outer regions
        let regions = self.detector.detect(&mask)?;
        debug!(count = regions.len(), "detected regions");

        // Step 3: Filter, rasterize and cut out each accepted region
        let source = image.to_rgba8();
        let mut erased = GrayImage::new(width, height);
        let mut shapes = Vec::new();

        for (index, region) in regions.iter().enumerate() {
            match self.filter.evaluate(region) {
                FilterDecision::Reject(reason) => {
                    debug!(index, area = region.area, bbox = ?region.bbox, %reason, "region rejected");
                    continue;
                }
                FilterDecision::Accept => {
                    debug!(index, area = region.area, bbox = ?region.bbox, "region accepted");
                }
            }

            let region_mask = self.rasterizer.rasterize(region, width, height)?;
            let cutout = composite_cutout(&source, &region_mask, region.bbox)?;
            accumulate_mask(&mut erased, &region_mask);

            shapes.push(ExtractedShape {
                image: cutout,
                bbox: region.bbox,
            });
        }

        // Step 4: Erase accepted regions from a copy of the source
        let background = reconstruct_background(image, &erased, self.background_fill)?;

        info!(
            regions = regions.len(),
            shapes = shapes.len(),
            width,
            height,
            "segmentation complete"
        );

        Ok(SegmentationResult {
            shapes,
            background,
            image_width: width,
            image_height: height,
        })
    }

    /// Thresholds this pipeline was built with
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: min_area={}, max_area={:?}, min_size={}x{}, max_aspect_ratio={:?}, fill={:?}",
            self.config.min_area,
            self.config.max_area,
            self.config.min_width,
            self.config.min_height,
            self.config.max_aspect_ratio,
            self.background_fill.0
        )
    }
}
