//! # Shape Extraction Library
//!
//! Separates isolated ink blobs from a scanned or rendered page. Each blob
//! that passes a geometric filter becomes a transparent cut-out, and the page
//! is returned with those blobs erased.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: binarizer, region detector, region filter and
//!   mask rasterizer are swappable seams
//! - **Presets**: server and batch threshold sets, plus a permissive one
//! - **Sinks**: encode cut-outs to in-memory PNG/base64, or write a directory
//!   with a descriptor list
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapes::{segment, FilterPreset};
//!
//! let image = image::open("worksheet.png")?;
//! let result = segment(&image, &FilterPreset::Batch.config())?;
//!
//! for shape in &result.shapes {
//!     println!("{:?} -> {} bytes", shape.bbox, shape.to_png_bytes()?.len());
//! }
//! result.write_to_dir("output_shapes")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use shapes::{Pipeline, FilterPreset};
//! use image::Rgba;
//!
//! let pipeline = Pipeline::builder()
//!     .with_preset(FilterPreset::Server)
//!     .with_cutoff(200)
//!     .with_background_fill(Rgba([0, 0, 0, 255]))
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use error::{ShapeError, Result};
pub use types::{BoundingBox, ExtractedShape, Region, SegmentationResult};
pub use config::{FilterConfig, FilterOverrides, FilterPreset};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use io::*;

use image::DynamicImage;

/// Run the default pipeline with the given thresholds
pub fn segment(image: &DynamicImage, config: &FilterConfig) -> Result<SegmentationResult> {
    Pipeline::builder()
        .with_filter_config(config.clone())
        .build()?
        .process(image)
}

/// Decode `bytes` and run the default pipeline. Undecodable data is an invalid input.
pub fn segment_bytes(bytes: &[u8], config: &FilterConfig) -> Result<SegmentationResult> {
    Pipeline::builder()
        .with_filter_config(config.clone())
        .build()?
        .process_bytes(bytes)
}
