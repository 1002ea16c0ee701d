use image::{GrayImage, Rgba, RgbaImage};
use crate::{
    error::{Result, ShapeError},
    types::BoundingBox,
};

/// A fully transparent pixel with no colour data
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Crop `source` to `bbox` and attach the region mask as alpha.
///
/// Masked pixels keep their colour and become fully opaque. Everything else
/// in the crop is `[0, 0, 0, 0]`.
pub fn composite_cutout(source: &RgbaImage, mask: &GrayImage, bbox: BoundingBox) -> Result<RgbaImage> {
    if source.dimensions() != mask.dimensions() {
        return Err(ShapeError::InvalidInput(format!(
            "mask is {:?} but source is {:?}",
            mask.dimensions(),
            source.dimensions()
        )));
    }
    let (width, height) = source.dimensions();
    if bbox.width == 0 || bbox.height == 0 || !bbox.fits_within(width, height) {
        return Err(ShapeError::InvalidInput(format!(
            "bounding box {:?} is empty or outside the {}x{} image",
            bbox, width, height
        )));
    }

    Ok(RgbaImage::from_fn(bbox.width, bbox.height, |x, y| {
        let sx = bbox.x + x;
        let sy = bbox.y + y;
        if mask.get_pixel(sx, sy)[0] > 0 {
            let Rgba([r, g, b, _]) = *source.get_pixel(sx, sy);
            Rgba([r, g, b, 255])
        } else {
            TRANSPARENT
        }
    }))
}
