use crate::models::RangeBounds;

/// Outcome of parsing a textual range such as `"1000-5000"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeParse {
    Bounds(RangeBounds),
    Malformed,
}

impl RangeParse {
    pub fn bounds(self) -> Option<RangeBounds> {
        match self {
            RangeParse::Bounds(bounds) => Some(bounds),
            RangeParse::Malformed => None,
        }
    }
}

/// Parse `"low-high"` into inclusive bounds
///
/// Only the first hyphen splits, so `"5--3"` is malformed rather than `5..3`.
/// Whitespace anywhere in either side is ignored.
pub fn parse_range(raw: &str) -> RangeParse {
    let Some((low, high)) = raw.split_once('-') else {
        return RangeParse::Malformed;
    };

    match (parse_bound(low), parse_bound(high)) {
        (Some(low), Some(high)) => RangeParse::Bounds(RangeBounds { low, high }),
        _ => RangeParse::Malformed,
    }
}

#[inline]
fn parse_bound(part: &str) -> Option<i64> {
    let digits: String = part.chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse().ok()
}

/// Strip everything but digits and hyphens, e.g. `"3-5 days"` becomes `"3-5"`
pub fn normalize_range_text(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(low: i64, high: i64) -> RangeParse {
        RangeParse::Bounds(RangeBounds { low, high })
    }

    #[test]
    fn test_parse_simple_range() {
        assert_eq!(parse_range("1000-5000"), bounds(1000, 5000));
        assert_eq!(parse_range(" 3 - 5 "), bounds(3, 5));
        assert_eq!(parse_range("10 000-20 000"), bounds(10000, 20000));
    }

    #[test]
    fn test_parse_without_hyphen_is_malformed() {
        assert_eq!(parse_range("5000"), RangeParse::Malformed);
        assert_eq!(parse_range(""), RangeParse::Malformed);
    }

    #[test]
    fn test_parse_non_numeric_side_is_malformed() {
        assert_eq!(parse_range("cheap-5000"), RangeParse::Malformed);
        assert_eq!(parse_range("1000-"), RangeParse::Malformed);
        assert_eq!(parse_range("-5"), RangeParse::Malformed);
        assert_eq!(parse_range("3-5 days"), RangeParse::Malformed);
    }

    #[test]
    fn test_parse_splits_on_first_hyphen_only() {
        assert_eq!(parse_range("5--3"), bounds(5, -3));
        assert_eq!(parse_range("1-2-3"), RangeParse::Malformed);
    }

    #[test]
    fn test_inverted_range_still_parses() {
        assert_eq!(parse_range("9-2"), bounds(9, 2));
    }

    #[test]
    fn test_normalize_duration_text() {
        assert_eq!(normalize_range_text("3-5 days"), "3-5");
        assert_eq!(normalize_range_text("7 - 10 Days"), "7-10");
        assert_eq!(normalize_range_text("weekend"), "");
        assert_eq!(parse_range(&normalize_range_text("3-5 days")), bounds(3, 5));
    }

    #[test]
    fn test_bounds_accessor() {
        assert_eq!(parse_range("1-2").bounds(), Some(RangeBounds { low: 1, high: 2 }));
        assert_eq!(parse_range("x").bounds(), None);
    }
}
