use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use crate::{error::Result, traits::RegionDetector, types::Region};

/// Border-following region detector built on imageproc's contour tracer.
///
/// Only outermost outer borders are reported. Holes, and anything drawn
/// inside a hole, belong to the enclosing region and are not reported
/// separately. Order follows the tracer's raster scan.
#[derive(Debug, Clone, Default)]
pub struct ContourRegionDetector;

impl RegionDetector for ContourRegionDetector {
    fn detect(&self, mask: &GrayImage) -> Result<Vec<Region>> {
        // The tracer misclassifies borders on column 0, so keep every
        // component one pixel away from the image edge.
        let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
        imageops::replace(&mut padded, mask, 1, 1);

        let contours = find_contours::<u32>(&padded);

        let regions = contours
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
            .filter_map(|contour| {
                let boundary = contour.points.iter().map(|p| [p.x - 1, p.y - 1]).collect();
                Region::from_boundary(boundary)
            })
            .collect();

        Ok(regions)
    }
}
