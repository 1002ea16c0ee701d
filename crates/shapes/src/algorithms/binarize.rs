use image::{DynamicImage, GrayImage, Luma};
use crate::{error::{Result, ShapeError}, traits::Binarizer};

/// Pixel value marking foreground in every mask
pub const FOREGROUND: u8 = 255;
/// Pixel value marking background in every mask
pub const BACKGROUND: u8 = 0;

/// Grayscale conversion followed by an inverted fixed threshold.
///
/// Ink is darker than the page, so a pixel is foreground when its luma is
/// strictly below `cutoff`.
#[derive(Debug, Clone)]
pub struct LumaThresholdBinarizer {
    pub cutoff: u8,
}

impl Default for LumaThresholdBinarizer {
    fn default() -> Self {
        Self { cutoff: 240 }
    }
}

impl Binarizer for LumaThresholdBinarizer {
    fn binarize(&self, image: &DynamicImage) -> Result<GrayImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ShapeError::InvalidInput(format!(
                "image has zero area ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let gray = image.to_luma8();
        let cutoff = self.cutoff;
        Ok(imageproc::map::map_colors(&gray, |Luma([value])| {
            if value < cutoff {
                Luma([FOREGROUND])
            } else {
                Luma([BACKGROUND])
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_dark_pixels_become_foreground() {
        let mut img = RgbImage::from_pixel(4, 1, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([239, 239, 239]));
        img.put_pixel(2, 0, Rgb([240, 240, 240]));

        let mask = LumaThresholdBinarizer::default()
            .binarize(&DynamicImage::ImageRgb8(img))
            .unwrap();

        assert_eq!(mask.get_pixel(0, 0)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(1, 0)[0], FOREGROUND);
        assert_eq!(mask.get_pixel(2, 0)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(3, 0)[0], BACKGROUND);
    }

    #[test]
    fn test_zero_area_is_invalid_input() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        let err = LumaThresholdBinarizer::default().binarize(&empty).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_cutoff_zero_marks_nothing() {
        let img = RgbImage::from_pixel(3, 3, Rgb([0, 0, 0]));
        let mask = LumaThresholdBinarizer { cutoff: 0 }
            .binarize(&DynamicImage::ImageRgb8(img))
            .unwrap();
        assert!(mask.pixels().all(|p| p[0] == BACKGROUND));
    }
}
