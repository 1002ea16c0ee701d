use std::{borrow::Cow, io::Cursor};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use crate::{
    error::Result,
    types::{ExtractedShape, SegmentationResult},
};

/// Encode an image as PNG into memory.
///
/// Float images are narrowed to 8-bit RGBA since PNG has no float layout.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let encodable = match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        other => Cow::Borrowed(other),
    };

    let mut buffer = Vec::new();
    encodable.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}

impl ExtractedShape {
    /// Encode the cut-out as a standalone RGBA PNG
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(buffer)
    }

    /// PNG bytes, base64 encoded with the standard alphabet
    pub fn to_base64_png(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_png_bytes()?))
    }
}

impl SegmentationResult {
    pub fn background_png_bytes(&self) -> Result<Vec<u8>> {
        encode_png(&self.background)
    }

    /// Every cut-out as base64 PNG, in result order
    pub fn shapes_as_base64_png(&self) -> Result<Vec<String>> {
        self.shapes.iter().map(ExtractedShape::to_base64_png).collect()
    }
}
