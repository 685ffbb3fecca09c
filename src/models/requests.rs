use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;
use validator::Validate;

use crate::models::domain::TripQuery;

/// Keys every recommendation request must carry, in reporting order
const REQUIRED_KEYS: [&str; 3] = ["budget", "duration", "types"];

/// Alternative spelling of `types` accepted from older clients
const TYPES_ALIAS: &str = "experience_types";

/// Reasons a recommendation request is rejected before matching
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request body must be a JSON object")]
    Malformed,

    #[error("Missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    #[error("budget and duration must be numbers")]
    NotNumeric,

    #[error("types must be a non-empty list of numeric type IDs")]
    InvalidTypes,
}

/// Request to recommend destinations
///
/// ```json
/// { "budget": 5000, "duration": 4, "types": [1, 2] }
/// ```
#[derive(Debug, Clone, Validate)]
pub struct RecommendationRequest {
    pub budget: f64,
    pub duration: f64,
    #[validate(length(min = 1))]
    pub types: Vec<f64>,
}

impl RecommendationRequest {
    /// Check a raw JSON body and build the request from it
    ///
    /// Missing keys are reported together, then field types are checked.
    pub fn from_json(body: &Value) -> Result<Self, RequestError> {
        let object = body.as_object().ok_or(RequestError::Malformed)?;

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|&key| match key {
                "types" => !object.contains_key(key) && !object.contains_key(TYPES_ALIAS),
                _ => !object.contains_key(key),
            })
            .collect();
        if !missing.is_empty() {
            return Err(RequestError::MissingKeys(missing));
        }

        let budget = object.get("budget").and_then(Value::as_f64);
        let duration = object.get("duration").and_then(Value::as_f64);
        let (Some(budget), Some(duration)) = (budget, duration) else {
            return Err(RequestError::NotNumeric);
        };

        let types = object
            .get("types")
            .or_else(|| object.get(TYPES_ALIAS))
            .and_then(Value::as_array)
            .ok_or(RequestError::InvalidTypes)?
            .iter()
            .map(Value::as_f64)
            .collect::<Option<Vec<f64>>>()
            .ok_or(RequestError::InvalidTypes)?;

        let request = Self {
            budget,
            duration,
            types,
        };
        request.validate().map_err(|_| RequestError::InvalidTypes)?;

        Ok(request)
    }

    /// Convert to a query, truncating duration and type ids to integers
    pub fn into_query(self) -> TripQuery {
        TripQuery {
            budget: self.budget,
            duration: self.duration.trunc() as i64,
            type_ids: self.types.iter().map(|t| t.trunc() as i64).collect::<BTreeSet<_>>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let request =
            RecommendationRequest::from_json(&json!({"budget": 5000, "duration": 4, "types": [1, 2]}))
                .unwrap();
        let query = request.into_query();

        assert_eq!(query.budget, 5000.0);
        assert_eq!(query.duration, 4);
        assert_eq!(query.type_ids, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_missing_keys_are_named() {
        let err = RecommendationRequest::from_json(&json!({"duration": 4})).unwrap_err();

        assert_eq!(err, RequestError::MissingKeys(vec!["budget", "types"]));
        assert_eq!(err.to_string(), "Missing keys: budget, types");
    }

    #[test]
    fn test_experience_types_alias() {
        let request = RecommendationRequest::from_json(
            &json!({"budget": 100.5, "duration": 2, "experience_types": [3]}),
        )
        .unwrap();

        assert_eq!(request.types, vec![3.0]);

        let err = RecommendationRequest::from_json(
            &json!({"budget": 100.5, "duration": 2, "experience_types": []}),
        )
        .unwrap_err();
        assert_eq!(err, RequestError::InvalidTypes);
    }

    #[test]
    fn test_empty_types_rejected() {
        let err = RecommendationRequest::from_json(&json!({"budget": 1, "duration": 1, "types": []}))
            .unwrap_err();

        assert_eq!(err, RequestError::InvalidTypes);
    }

    #[test]
    fn test_non_numeric_fields_rejected() {
        let err = RecommendationRequest::from_json(&json!({"budget": "5000", "duration": 4, "types": [1]}))
            .unwrap_err();
        assert_eq!(err, RequestError::NotNumeric);

        let err = RecommendationRequest::from_json(&json!({"budget": 5000, "duration": 4, "types": [1, "beach"]}))
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidTypes);

        let err = RecommendationRequest::from_json(&json!({"budget": 5000, "duration": 4, "types": 1}))
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidTypes);
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let err = RecommendationRequest::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, RequestError::Malformed);
    }

    #[test]
    fn test_fractional_values_truncate() {
        let query = RecommendationRequest::from_json(
            &json!({"budget": 2500.75, "duration": 4.9, "types": [2.7, 2, 1]}),
        )
        .unwrap()
        .into_query();

        assert_eq!(query.budget, 2500.75);
        assert_eq!(query.duration, 4);
        assert_eq!(query.type_ids, BTreeSet::from([1, 2]));
    }
}
