//! TripMatch Algo - destination recommendation service
//!
//! This library provides the matching pipeline behind the TripMatch trip planner.
//! Cities are filtered by budget/duration bands and ranked by how many of the
//! requested experience types they offer.

pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{parse_range, Matcher, MatchResult, RangeParse};
pub use models::{RecommendationRequest, RecommendationResponse, ScoredCity, TripQuery};
pub use services::{DataError, DataFiles, ReferenceData};
