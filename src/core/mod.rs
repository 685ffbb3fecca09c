// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod range;
pub mod scoring;

pub use filters::{band_bounds, band_covers, filter_bands};
pub use matcher::{Matcher, MatchResult};
pub use range::{normalize_range_text, parse_range, RangeParse};
pub use scoring::{available_types_by_city, calculate_type_match, round_score, type_names};
