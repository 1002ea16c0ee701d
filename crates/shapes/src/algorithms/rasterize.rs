use std::collections::VecDeque;

use image::{GrayImage, Luma};
use crate::{
    algorithms::binarize::FOREGROUND,
    error::{Result, ShapeError},
    traits::MaskRasterizer,
    types::Region,
};

const UNVISITED: u8 = 0;
const BOUNDARY: u8 = 1;
const OUTSIDE: u8 = 2;

/// Solid fill of a region's closed boundary.
///
/// Works inside the region's bounding box padded by one pixel: boundary
/// pixels are marked, the padding is flood-filled with 4-connectivity, and
/// whatever the flood cannot reach is inside. An 8-connected boundary never
/// lets a 4-connected flood through, so holes enclosed by the boundary are
/// filled too.
#[derive(Debug, Clone, Default)]
pub struct BoundaryFillRasterizer;

impl MaskRasterizer for BoundaryFillRasterizer {
    fn rasterize(&self, region: &Region, width: u32, height: u32) -> Result<GrayImage> {
        let bbox = region.bbox;
        if !bbox.fits_within(width, height) {
            return Err(ShapeError::InvalidInput(format!(
                "region {:?} lies outside a {}x{} mask",
                bbox, width, height
            )));
        }

        let grid_w = bbox.width as usize + 2;
        let grid_h = bbox.height as usize + 2;
        let mut grid = vec![UNVISITED; grid_w * grid_h];
        let index = |x: usize, y: usize| y * grid_w + x;

        for &[x, y] in &region.boundary {
            if !bbox.contains(x, y) {
                return Err(ShapeError::InvalidInput(format!(
                    "boundary point ({x}, {y}) lies outside {:?}",
                    bbox
                )));
            }
            let gx = (x - bbox.x) as usize + 1;
            let gy = (y - bbox.y) as usize + 1;
            grid[index(gx, gy)] = BOUNDARY;
        }

        let mut queue = VecDeque::from([(0usize, 0usize)]);
        grid[0] = OUTSIDE;
        while let Some((x, y)) = queue.pop_front() {
            let neighbours = [
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x, y.wrapping_sub(1)),
                (x, y + 1),
            ];
            for (nx, ny) in neighbours {
                if nx >= grid_w || ny >= grid_h {
                    continue;
                }
                let cell = &mut grid[index(nx, ny)];
                if *cell == UNVISITED {
                    *cell = OUTSIDE;
                    queue.push_back((nx, ny));
                }
            }
        }

        let mut mask = GrayImage::new(width, height);
        for gy in 1..grid_h - 1 {
            for gx in 1..grid_w - 1 {
                if grid[index(gx, gy)] != OUTSIDE {
                    let x = bbox.x + (gx - 1) as u32;
                    let y = bbox.y + (gy - 1) as u32;
                    mask.put_pixel(x, y, Luma([FOREGROUND]));
                }
            }
        }

        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::{binarize::BACKGROUND, ContourRegionDetector},
        traits::RegionDetector,
    };

    fn mask_with<F: Fn(u32, u32) -> bool>(w: u32, h: u32, f: F) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([if f(x, y) { FOREGROUND } else { BACKGROUND }]))
    }

    fn rasterize_single(mask: &GrayImage) -> GrayImage {
        let regions = ContourRegionDetector.detect(mask).unwrap();
        assert_eq!(regions.len(), 1);
        BoundaryFillRasterizer
            .rasterize(&regions[0], mask.width(), mask.height())
            .unwrap()
    }

    #[test]
    fn test_filled_rectangle_reproduces_footprint() {
        let mask = mask_with(40, 30, |x, y| (5..25).contains(&x) && (8..20).contains(&y));
        assert_eq!(rasterize_single(&mask), mask);
    }

    #[test]
    fn test_disc_reproduces_footprint() {
        let mask = mask_with(60, 60, |x, y| {
            let dx = x as f32 - 30.0;
            let dy = y as f32 - 28.0;
            dx * dx + dy * dy <= 18.0 * 18.0
        });
        assert_eq!(rasterize_single(&mask), mask);
    }

    #[test]
    fn test_ring_hole_is_filled() {
        let ring = mask_with(50, 50, |x, y| {
            let inside_outer = (5..45).contains(&x) && (5..45).contains(&y);
            let inside_hole = (15..35).contains(&x) && (15..35).contains(&y);
            inside_outer && !inside_hole
        });
        let solid = mask_with(50, 50, |x, y| (5..45).contains(&x) && (5..45).contains(&y));
        assert_eq!(rasterize_single(&ring), solid);
    }

    #[test]
    fn test_thin_diagonal_stroke() {
        let mask = mask_with(20, 20, |x, y| x == y && (3..15).contains(&x));
        assert_eq!(rasterize_single(&mask), mask);
    }

    #[test]
    fn test_concave_shape_keeps_notch_empty() {
        // U shape: the notch opens to the outside and must stay background
        let mask = mask_with(40, 40, |x, y| {
            let block = (5..35).contains(&x) && (5..35).contains(&y);
            let notch = (15..25).contains(&x) && (5..25).contains(&y);
            block && !notch
        });
        assert_eq!(rasterize_single(&mask), mask);
    }

    #[test]
    fn test_region_outside_mask_is_rejected() {
        let region = Region::from_boundary(vec![[5, 5], [12, 5]]).unwrap();
        assert!(BoundaryFillRasterizer.rasterize(&region, 10, 10).is_err());
    }
}
