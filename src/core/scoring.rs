use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{CityId, CityTypeTag, TypeCatalog, TypeId, TypeMatch};

/// Group the distinct tagged types of the given cities
///
/// Cities without tags get no entry; callers treat a missing entry as an empty set.
pub fn available_types_by_city(
    tags: &[CityTypeTag],
    city_ids: &HashSet<CityId>,
) -> HashMap<CityId, BTreeSet<TypeId>> {
    let mut grouped: HashMap<CityId, BTreeSet<TypeId>> = HashMap::with_capacity(city_ids.len());

    for tag in tags.iter().filter(|tag| city_ids.contains(&tag.city_id)) {
        grouped.entry(tag.city_id).or_default().insert(tag.type_id);
    }

    grouped
}

/// Calculate a type match score (0-100) for a city
///
/// score = |available ∩ requested| / |requested| * 100
///
/// Matching ids come back in ascending order. An empty request scores 0.
pub fn calculate_type_match(
    available: &BTreeSet<TypeId>,
    requested: &BTreeSet<TypeId>,
) -> TypeMatch {
    let matching_type_ids: Vec<TypeId> = available.intersection(requested).copied().collect();

    let score = if requested.is_empty() {
        0.0
    } else {
        matching_type_ids.len() as f64 / requested.len() as f64 * 100.0
    };

    TypeMatch {
        score,
        matching_type_ids,
    }
}

/// Resolve type ids to display names, falling back to the id itself
pub fn type_names(type_ids: &[TypeId], catalog: &TypeCatalog) -> Vec<String> {
    type_ids
        .iter()
        .map(|id| catalog.get(id).cloned().unwrap_or_else(|| id.to_string()))
        .collect()
}

/// Round a score to two decimal places, ties to even
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}
