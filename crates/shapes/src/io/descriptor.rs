use std::{fs, path::Path};

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::{
    error::Result,
    types::{BoundingBox, SegmentationResult},
};

pub const BACKGROUND_FILE: &str = "background.png";
pub const DESCRIPTOR_FILE: &str = "shapes.json";

/// One entry of the descriptor list written next to the cut-outs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub filename: String,
    pub bbox: BoundingBox,
}

/// File name of the `index`-th shape, counting from 1
pub fn shape_filename(index: usize) -> String {
    format!("shape_{index}.png")
}

impl SegmentationResult {
    pub fn descriptors(&self) -> Vec<ShapeDescriptor> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| ShapeDescriptor {
                filename: shape_filename(i + 1),
                bbox: shape.bbox,
            })
            .collect()
    }

    /// Write every cut-out, the background and the descriptor list into `dir`.
    ///
    /// Anything already in `dir` is removed first; the directory is created if missing.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<ShapeDescriptor>> {
        let dir = dir.as_ref();
        prepare_output_dir(dir)?;

        let descriptors = self.descriptors();
        for (shape, descriptor) in self.shapes.iter().zip(&descriptors) {
            shape
                .image
                .save_with_format(dir.join(&descriptor.filename), ImageFormat::Png)?;
        }

        fs::write(dir.join(BACKGROUND_FILE), self.background_png_bytes()?)?;
        fs::write(dir.join(DESCRIPTOR_FILE), serde_json::to_string_pretty(&descriptors)?)?;

        info!(dir = %dir.display(), shapes = descriptors.len(), "results written");
        Ok(descriptors)
    }
}

/// Load a descriptor list written by [`SegmentationResult::write_to_dir`]
pub fn read_descriptors(path: impl AsRef<Path>) -> Result<Vec<ShapeDescriptor>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let removed = if path.is_dir() && !path.is_symlink() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            if let Err(e) = removed {
                warn!(path = %path.display(), error = %e, "failed to clear stale output");
            }
        }
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedShape;
    use image::{DynamicImage, Rgba, RgbaImage, Rgb, RgbImage};

    fn result_with_two_shapes() -> SegmentationResult {
        let shape = |x, y| ExtractedShape {
            image: RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])),
            bbox: BoundingBox::new(x, y, 3, 2),
        };
        SegmentationResult {
            shapes: vec![shape(1, 1), shape(10, 4)],
            background: DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 10, Rgb([255, 255, 255]))),
            image_width: 20,
            image_height: 10,
        }
    }

    #[test]
    fn test_descriptor_json_format() {
        let descriptors = result_with_two_shapes().descriptors();
        let json = serde_json::to_value(&descriptors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "filename": "shape_1.png", "bbox": [1, 1, 3, 2] },
                { "filename": "shape_2.png", "bbox": [10, 4, 3, 2] }
            ])
        );
    }

    #[test]
    fn test_write_to_dir_replaces_old_output() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        fs::create_dir_all(out.join("stale_dir")).unwrap();
        fs::write(out.join("shape_9.png"), b"old").unwrap();

        let result = result_with_two_shapes();
        let written = result.write_to_dir(&out).unwrap();

        assert!(!out.join("shape_9.png").exists());
        assert!(!out.join("stale_dir").exists());
        assert!(out.join("shape_1.png").exists());
        assert!(out.join("shape_2.png").exists());
        assert!(out.join(BACKGROUND_FILE).exists());

        let read_back = read_descriptors(out.join(DESCRIPTOR_FILE)).unwrap();
        assert_eq!(read_back, written);

        let shape = image::open(out.join("shape_2.png")).unwrap().to_rgba8();
        assert_eq!(shape, result.shapes[1].image);
    }

    #[test]
    fn test_write_empty_result() {
        let tmp = tempfile::tempdir().unwrap();
        let result = SegmentationResult {
            shapes: vec![],
            background: DynamicImage::ImageRgb8(RgbImage::new(4, 4)),
            image_width: 4,
            image_height: 4,
        };
        let written = result.write_to_dir(tmp.path()).unwrap();
        assert!(written.is_empty());
        assert_eq!(fs::read_to_string(tmp.path().join(DESCRIPTOR_FILE)).unwrap(), "[]");
    }
}
