use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::core::{
    filters::filter_bands,
    scoring::{available_types_by_city, calculate_type_match, round_score, type_names},
};
use crate::models::{CityId, MatchOptions, ScoredCity, TripQuery};
use crate::services::ReferenceData;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub cities: Vec<ScoredCity>,
    pub total_bands: usize,
    pub matched_bands: usize,
}

/// Main matching orchestrator - implements the recommendation pipeline
///
/// # Pipeline Stages
/// 1. Budget/duration band filter
/// 2. Experience type overlap scoring
/// 3. City metadata join
/// 4. Ranking and zero-score removal
#[derive(Debug, Clone)]
pub struct Matcher {
    data: Arc<ReferenceData>,
    options: MatchOptions,
}

impl Matcher {
    pub fn new(data: Arc<ReferenceData>, options: MatchOptions) -> Self {
        Self { data, options }
    }

    pub fn with_default_options(data: Arc<ReferenceData>) -> Self {
        Self::new(data, MatchOptions::default())
    }

    /// Recommend cities for a trip
    ///
    /// Cities are ordered by match score (descending), then city id, then band
    /// table order. Cities sharing none of the requested types are left out.
    pub fn recommend(&self, query: &TripQuery) -> MatchResult {
        let bands = self.data.bands();

        // Stage 1: budget/duration filter
        let candidates = filter_bands(bands, query.budget, query.duration);
        let matched_bands = candidates.len();

        if candidates.is_empty() {
            return MatchResult {
                cities: Vec::new(),
                total_bands: bands.len(),
                matched_bands,
            };
        }

        // Stage 2: tagged types per surviving city
        let city_ids: HashSet<CityId> = candidates.iter().filter_map(|c| c.band.city_id).collect();
        let available = available_types_by_city(self.data.tags(), &city_ids);
        let no_types = BTreeSet::new();

        // Stage 3: score and join metadata
        let mut ranked: Vec<(usize, ScoredCity)> = candidates
            .iter()
            .map(|candidate| {
                let band = candidate.band;
                let city_types = band
                    .city_id
                    .and_then(|id| available.get(&id))
                    .unwrap_or(&no_types);
                let type_match = calculate_type_match(city_types, &query.type_ids);

                let city = band.city_id.and_then(|id| self.data.city(id));
                let (name, country) = match city {
                    Some(city) => (city.name.clone(), Some(city.state_name.clone())),
                    None => (
                        band.city_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                        None,
                    ),
                };

                let matching_types =
                    type_names(&type_match.matching_type_ids, self.data.type_catalog());

                let scored = ScoredCity {
                    city_id: band.city_id,
                    name,
                    country,
                    match_score: type_match.score,
                    matching_types,
                };
                (candidate.position, scored)
            })
            .collect();

        // Stage 4: rank, drop non-matches
        ranked.sort_by(|(a_pos, a), (b_pos, b)| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| compare_city_ids(a.city_id, b.city_id))
                .then_with(|| a_pos.cmp(b_pos))
        });

        let mut seen: HashSet<Option<CityId>> = HashSet::new();
        let cities: Vec<ScoredCity> = ranked
            .into_iter()
            .map(|(_, city)| city)
            .filter(|city| city.match_score > 0.0)
            .filter(|city| {
                !self.options.deduplicate_cities
                    || city.city_id.is_none()
                    || seen.insert(city.city_id)
            })
            .map(|mut city| {
                city.match_score = round_score(city.match_score);
                city
            })
            .collect();

        MatchResult {
            cities,
            total_bands: bands.len(),
            matched_bands,
        }
    }
}

/// Known city ids sort ascending, bands without one go last
#[inline]
fn compare_city_ids(a: Option<CityId>, b: Option<CityId>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
