use image::{DynamicImage, GrayImage};
use crate::{error::Result, algorithms::FilterDecision, types::Region};

/// Trait for turning a colour image into a foreground/background mask
pub trait Binarizer: Send + Sync {
    /// Produce a mask the size of `image`: 255 for foreground, 0 for background
    fn binarize(&self, image: &DynamicImage) -> Result<GrayImage>;
}

/// Trait for connected-region discovery
pub trait RegionDetector: Send + Sync {
    /// Find the outermost foreground regions of a binary mask, in a deterministic order
    fn detect(&self, mask: &GrayImage) -> Result<Vec<Region>>;
}

/// Trait for deciding whether a region is a shape
pub trait RegionFilter: Send + Sync {
    fn evaluate(&self, region: &Region) -> FilterDecision;
}

/// Trait for rasterizing a region into a full-size mask
pub trait MaskRasterizer: Send + Sync {
    /// Mark the region's boundary and everything it encloses; `width`/`height` are the mask size
    fn rasterize(&self, region: &Region, width: u32, height: u32) -> Result<GrayImage>;
}
