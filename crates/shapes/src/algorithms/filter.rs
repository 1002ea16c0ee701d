use strum::{Display, IntoStaticStr};
use crate::{config::FilterConfig, error::Result, traits::RegionFilter, types::Region};

/// Why a region was not accepted as a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    AreaTooSmall,
    AreaTooLarge,
    TooNarrow,
    TooShort,
    TooElongated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Accept,
    Reject(RejectReason),
}

impl FilterDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Accepts compact, blob-like regions using area, size and aspect-ratio bounds
#[derive(Debug, Clone)]
pub struct GeometricFilter {
    config: FilterConfig,
}

impl GeometricFilter {
    /// Create a filter, rejecting inconsistent thresholds up front
    pub fn new(config: FilterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl Default for GeometricFilter {
    fn default() -> Self {
        Self { config: FilterConfig::default() }
    }
}

impl RegionFilter for GeometricFilter {
    fn evaluate(&self, region: &Region) -> FilterDecision {
        let config = &self.config;

        if region.area < config.min_area {
            return FilterDecision::Reject(RejectReason::AreaTooSmall);
        }
        if config.max_area.is_some_and(|max| region.area > max) {
            return FilterDecision::Reject(RejectReason::AreaTooLarge);
        }
        if region.width() < config.min_width {
            return FilterDecision::Reject(RejectReason::TooNarrow);
        }
        if region.height() < config.min_height {
            return FilterDecision::Reject(RejectReason::TooShort);
        }
        if config
            .max_aspect_ratio
            .is_some_and(|max| region.bbox.aspect_ratio() > max)
        {
            return FilterDecision::Reject(RejectReason::TooElongated);
        }

        FilterDecision::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FilterPreset, types::BoundingBox};

    fn region(area: f64, width: u32, height: u32) -> Region {
        Region {
            boundary: vec![[0, 0], [width - 1, height - 1]],
            area,
            bbox: BoundingBox::new(0, 0, width, height),
        }
    }

    #[test]
    fn test_server_preset_bounds() {
        let filter = GeometricFilter::new(FilterPreset::Server.config()).unwrap();

        assert_eq!(filter.evaluate(&region(5000.0, 80, 80)), FilterDecision::Accept);
        assert_eq!(
            filter.evaluate(&region(1999.0, 80, 80)),
            FilterDecision::Reject(RejectReason::AreaTooSmall)
        );
        assert_eq!(
            filter.evaluate(&region(100_001.0, 400, 400)),
            FilterDecision::Reject(RejectReason::AreaTooLarge)
        );
        assert_eq!(
            filter.evaluate(&region(2500.0, 29, 120)),
            FilterDecision::Reject(RejectReason::TooNarrow)
        );
        assert_eq!(
            filter.evaluate(&region(2500.0, 120, 29)),
            FilterDecision::Reject(RejectReason::TooShort)
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = GeometricFilter::new(FilterPreset::Server.config()).unwrap();
        assert!(filter.evaluate(&region(2000.0, 30, 120)).is_accepted());
        assert!(filter.evaluate(&region(100_000.0, 400, 400)).is_accepted());
    }

    #[test]
    fn test_elongated_region_depends_on_aspect_bound() {
        let thin = region(891.0, 100, 10);
        let base = FilterConfig {
            min_area: 0.0,
            max_area: None,
            min_width: 1,
            min_height: 1,
            max_aspect_ratio: None,
        };

        let bounded = GeometricFilter::new(FilterConfig { max_aspect_ratio: Some(4.0), ..base.clone() }).unwrap();
        assert_eq!(bounded.evaluate(&thin), FilterDecision::Reject(RejectReason::TooElongated));

        let unbounded = GeometricFilter::new(base).unwrap();
        assert!(unbounded.evaluate(&thin).is_accepted());
    }

    #[test]
    fn test_degenerate_region_rejected_by_batch_preset() {
        let filter = GeometricFilter::new(FilterPreset::Batch.config()).unwrap();
        let dot = Region::from_boundary(vec![[3, 3]]).unwrap();
        assert!(!filter.evaluate(&dot).is_accepted());
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = FilterConfig { max_area: Some(1.0), ..FilterConfig::default() };
        assert!(GeometricFilter::new(config).is_err());
    }

    #[test]
    fn test_reject_reason_names() {
        assert_eq!(RejectReason::TooElongated.to_string(), "too_elongated");
    }
}
