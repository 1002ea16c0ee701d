use image::{DynamicImage, GenericImage, GrayImage, Rgba};
use crate::error::{Result, ShapeError};

/// Flat page colour used to erase shapes
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Copy `source` and overwrite every pixel set in `erase_mask` with `fill`.
///
/// The copy keeps the source's colour type; `fill` is converted to it.
pub fn reconstruct_background(source: &DynamicImage, erase_mask: &GrayImage, fill: Rgba<u8>) -> Result<DynamicImage> {
    if source.width() != erase_mask.width() || source.height() != erase_mask.height() {
        return Err(ShapeError::InvalidInput(format!(
            "erase mask is {:?} but source is {}x{}",
            erase_mask.dimensions(),
            source.width(),
            source.height()
        )));
    }

    let mut background = source.clone();
    for (x, y, pixel) in erase_mask.enumerate_pixels() {
        if pixel[0] > 0 {
            background.put_pixel(x, y, fill);
        }
    }

    Ok(background)
}

/// OR `mask` into `union`
pub fn accumulate_mask(union: &mut GrayImage, mask: &GrayImage) {
    for (acc, px) in union.pixels_mut().zip(mask.pixels()) {
        acc[0] = acc[0].max(px[0]);
    }
}
