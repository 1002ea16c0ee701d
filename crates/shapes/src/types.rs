use geo::Area;
use geo_types::{Coord, LineString, Polygon};
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates, origin top-left.
///
/// Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Tight box around a set of pixel coordinates, inclusive of the outermost pixels
    pub fn from_points(points: &[[u32; 2]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y) = (first[0], first[1]);
        let (mut max_x, mut max_y) = (first[0], first[1]);

        for &[x, y] in rest {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Longer side over shorter side
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width.max(self.height) as f64;
        let short = self.width.min(self.height).max(1) as f64;
        long / short
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

impl From<[u32; 4]> for BoundingBox {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<BoundingBox> for [u32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x, bbox.y, bbox.width, bbox.height]
    }
}

/// One connected foreground component, described by its outer boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Ordered boundary pixels
    pub boundary: Vec<[u32; 2]>,
    /// Area enclosed by the boundary polygon
    pub area: f64,
    pub bbox: BoundingBox,
}

impl Region {
    /// Build a region from its traced boundary. Returns `None` for an empty boundary.
    pub fn from_boundary(boundary: Vec<[u32; 2]>) -> Option<Self> {
        let bbox = BoundingBox::from_points(&boundary)?;
        let area = Self::to_geo_polygon(&boundary).unsigned_area();
        Some(Self { boundary, area, bbox })
    }

    fn to_geo_polygon(boundary: &[[u32; 2]]) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = boundary
            .iter()
            .map(|&[x, y]| Coord { x: x as f64, y: y as f64 })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    pub fn width(&self) -> u32 {
        self.bbox.width
    }

    pub fn height(&self) -> u32 {
        self.bbox.height
    }
}

/// A cut-out of one accepted region: cropped to its bounding box, transparent outside the region
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedShape {
    pub image: RgbaImage,
    pub bbox: BoundingBox,
}

/// Output of a single pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationResult {
    /// Accepted shapes, in detection order
    pub shapes: Vec<ExtractedShape>,
    /// Source image with every accepted region erased
    pub background: DynamicImage,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl SegmentationResult {
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
