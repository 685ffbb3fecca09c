use crate::core::range::{parse_range, RangeParse};
use crate::models::{BudgetDurationBand, CandidateBand, RangeBounds};

/// Parsed bounds of a band, or `None` when either range is malformed
#[inline]
pub fn band_bounds(band: &BudgetDurationBand) -> Option<(RangeBounds, RangeBounds)> {
    match (parse_range(&band.budget_range), parse_range(&band.duration_range)) {
        (RangeParse::Bounds(budget), RangeParse::Bounds(duration)) => Some((budget, duration)),
        _ => None,
    }
}

/// Check if a band covers the requested budget and duration (inclusive on both ends)
#[inline]
pub fn band_covers(band: &BudgetDurationBand, budget: f64, duration: i64) -> bool {
    band_bounds(band).is_some_and(|bounds| bounds_cover(bounds, budget, duration))
}

#[inline]
fn bounds_cover(
    (budget_bounds, duration_bounds): (RangeBounds, RangeBounds),
    budget: f64,
    duration: i64,
) -> bool {
    budget_bounds.contains(budget) && duration_bounds.contains(duration as f64)
}

/// Select the bands whose ranges cover the requested budget and duration
///
/// Bands with an unparseable range are dropped without error. The returned
/// candidates keep table order.
pub fn filter_bands(
    bands: &[BudgetDurationBand],
    budget: f64,
    duration: i64,
) -> Vec<CandidateBand<'_>> {
    let mut malformed = 0usize;

    let candidates: Vec<CandidateBand<'_>> = bands
        .iter()
        .enumerate()
        .filter(|(_, band)| match band_bounds(band) {
            Some(bounds) => bounds_cover(bounds, budget, duration),
            None => {
                malformed += 1;
                false
            }
        })
        .map(|(position, band)| CandidateBand { position, band })
        .collect();

    if malformed > 0 {
        tracing::debug!("Skipped {} bands with malformed ranges", malformed);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(city_id: i64, budget: &str, duration: &str) -> BudgetDurationBand {
        BudgetDurationBand {
            city_id: Some(city_id),
            city_name: None,
            budget_range: budget.to_string(),
            duration_range: duration.to_string(),
        }
    }

    #[test]
    fn test_band_covers_inside() {
        assert!(band_covers(&band(1, "1000-10000", "3-5"), 5000.0, 4));
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let b = band(1, "1000-10000", "3-5");

        assert!(band_covers(&b, 1000.0, 3));
        assert!(band_covers(&b, 10000.0, 5));
        assert!(!band_covers(&b, 999.99, 4));
        assert!(!band_covers(&b, 10000.01, 4));
        assert!(!band_covers(&b, 5000.0, 6));
        assert!(!band_covers(&b, 5000.0, 2));
    }

    #[test]
    fn test_inverted_band_never_matches() {
        assert!(!band_covers(&band(1, "10000-1000", "3-5"), 5000.0, 4));
    }

    #[test]
    fn test_filter_drops_malformed_rows() {
        let bands = vec![
            band(1, "1000-10000", "3-5"),
            band(2, "cheap", "3-5"),
            band(3, "1000-10000", ""),
            band(4, "4000-6000", "1-7"),
        ];

        let candidates = filter_bands(&bands, 5000.0, 4);
        let ids: Vec<_> = candidates.iter().map(|c| c.band.city_id).collect();

        assert_eq!(ids, vec![Some(1), Some(4)]);
        assert_eq!(candidates[1].position, 3);
    }

    #[test]
    fn test_filter_agrees_with_band_covers() {
        let bands = vec![
            band(1, "1000-10000", "3-5"),
            band(2, "5000-5000", "4-4"),
            band(3, "10000-1000", "3-5"),
            band(4, "1000-4999", "3-5"),
            band(5, "oops", "3-5"),
        ];

        for (budget, duration) in [(5000.0, 4), (1000.0, 3), (10000.0, 5), (4999.5, 4)] {
            let filtered: Vec<_> = filter_bands(&bands, budget, duration)
                .iter()
                .map(|c| c.band.city_id)
                .collect();
            let covered: Vec<_> = bands
                .iter()
                .filter(|b| band_covers(b, budget, duration))
                .map(|b| b.city_id)
                .collect();
            assert_eq!(filtered, covered, "budget={} duration={}", budget, duration);
        }
    }

    #[test]
    fn test_filter_no_match() {
        let bands = vec![band(1, "100-200", "1-2")];
        assert!(filter_bands(&bands, 5000.0, 4).is_empty());
    }
}
