// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetDurationBand, CandidateBand, City, CityId, CityTypeTag, MatchOptions, RangeBounds,
    ScoredCity, State, TripQuery, TypeCatalog, TypeId, TypeMatch,
};
pub use requests::{RecommendationRequest, RequestError};
pub use responses::{ErrorResponse, HealthResponse, RecommendationResponse};
