use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type CityId = i64;
pub type TypeId = i64;

/// Destination city with its region label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_id: CityId,
    pub name: String,
    pub state_name: String,
}

/// State or union territory row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_name: Option<String>,
}

/// Budget and duration band for a city
///
/// Ranges are kept as raw text and parsed on every query. The duration range is
/// already normalized to digits and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDurationBand {
    pub city_id: Option<CityId>,
    /// Name carried on the band row itself, used when the city table has no entry
    pub city_name: Option<String>,
    pub budget_range: String,
    pub duration_range: String,
}

/// Experience type tagged to a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityTypeTag {
    pub city_id: CityId,
    pub type_id: TypeId,
}

/// Inclusive numeric bounds parsed from a range string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub low: i64,
    pub high: i64,
}

impl RangeBounds {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low as f64 <= value && value <= self.high as f64
    }
}

/// Validated recommendation query
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    pub budget: f64,
    pub duration: i64,
    pub type_ids: BTreeSet<TypeId>,
}

/// A band that survived the budget/duration filter
#[derive(Debug, Clone, Copy)]
pub struct CandidateBand<'a> {
    /// Position in the band table, used as the last tie-breaker
    pub position: usize,
    pub band: &'a BudgetDurationBand,
}

/// Overlap between a city's tags and the requested types
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMatch {
    pub score: f64,
    pub matching_type_ids: Vec<TypeId>,
}

/// Scored city entry returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCity {
    #[serde(skip)]
    pub city_id: Option<CityId>,
    pub name: String,
    /// Region label (state or union territory)
    pub country: Option<String>,
    pub match_score: f64,
    pub matching_types: Vec<String>,
}

/// Matching options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Emit each city once even when several of its bands match
    pub deduplicate_cities: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            deduplicate_cities: true,
        }
    }
}

/// Type id to display name lookup
pub type TypeCatalog = HashMap<TypeId, String>;
