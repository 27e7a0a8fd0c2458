//! Google Geocoding API response types and normalization.

use explorer_core::GeocodeCandidate;
use serde::Deserialize;

use crate::ProviderError;

/// Raw response from the Geocoding API.
#[derive(Debug, Deserialize)]
pub struct GeocodeApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Individual geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResult {
    fn into_candidate(self, index: usize) -> Result<GeocodeCandidate, ProviderError> {
        let formatted_address = self
            .formatted_address
            .ok_or_else(|| ProviderError::Decode(format!("results[{index}].formatted_address missing")))?;
        let location = self
            .geometry
            .and_then(|g| g.location)
            .ok_or_else(|| ProviderError::Decode(format!("results[{index}].geometry.location missing")))?;

        Ok(GeocodeCandidate { formatted_address, latitude: location.lat, longitude: location.lng })
    }
}

impl GeocodeApiResponse {
    /// Check the body status and normalize the results.
    ///
    /// `ZERO_RESULTS` is an empty list, not an error. The first result must
    /// decode; malformed later results are dropped.
    pub fn into_candidates(self) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let detail = self.error_message.unwrap_or_default();
        match self.status.as_deref() {
            None | Some("OK") => {}
            Some("ZERO_RESULTS") => return Ok(Vec::new()),
            Some("REQUEST_DENIED") => return Err(ProviderError::AuthError(detail)),
            Some("OVER_QUERY_LIMIT") | Some("OVER_DAILY_LIMIT") => return Err(ProviderError::RateLimited),
            Some(other) => return Err(ProviderError::Upstream(format!("{other} {detail}").trim_end().to_string())),
        }

        let mut results = self.results.into_iter().enumerate();
        let Some((_, first)) = results.next() else {
            return Ok(Vec::new());
        };

        let mut candidates = vec![first.into_candidate(0)?];
        for (idx, result) in results {
            match result.into_candidate(idx) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => tracing::warn!(error = %e, "skipping malformed geocoding result"),
            }
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "results": [
            {
                "formatted_address": "Seattle, WA, USA",
                "geometry": {
                    "location": { "lat": 47.6062095, "lng": -122.3320708 },
                    "location_type": "APPROXIMATE"
                },
                "place_id": "ChIJVTPokywQkFQRmtVEaUZlJRA"
            },
            {
                "formatted_address": "Seattle Hill-Silver Firs, WA, USA",
                "geometry": { "location": { "lat": 47.88, "lng": -122.15 } }
            }
        ],
        "status": "OK"
    }"#;

    #[test]
    fn test_normalize_candidates() {
        let raw: GeocodeApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let candidates = raw.into_candidates().unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].formatted_address, "Seattle, WA, USA");
        assert_eq!(candidates[0].latitude, 47.6062095);
        assert_eq!(candidates[0].longitude, -122.3320708);
    }

    #[test]
    fn test_zero_results() {
        let raw: GeocodeApiResponse = serde_json::from_str(r#"{"results": [], "status": "ZERO_RESULTS"}"#).unwrap();
        assert!(raw.into_candidates().unwrap().is_empty());
    }

    #[test]
    fn test_request_denied() {
        let json = r#"{
            "results": [],
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }"#;
        let raw: GeocodeApiResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(raw.into_candidates(), Err(ProviderError::AuthError(msg)) if msg.contains("invalid")));
    }

    #[test]
    fn test_over_query_limit() {
        let raw: GeocodeApiResponse =
            serde_json::from_str(r#"{"results": [], "status": "OVER_QUERY_LIMIT"}"#).unwrap();
        assert!(matches!(raw.into_candidates(), Err(ProviderError::RateLimited)));
    }

    #[test]
    fn test_unknown_status() {
        let raw: GeocodeApiResponse = serde_json::from_str(r#"{"results": [], "status": "UNKNOWN_ERROR"}"#).unwrap();
        assert!(matches!(raw.into_candidates(), Err(ProviderError::Upstream(msg)) if msg == "UNKNOWN_ERROR"));
    }

    #[test]
    fn test_missing_geometry_is_decode_error() {
        let json = r#"{"results": [{"formatted_address": "Nowhere"}], "status": "OK"}"#;
        let raw: GeocodeApiResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(raw.into_candidates(), Err(ProviderError::Decode(msg)) if msg.contains("geometry")));
    }

    #[test]
    fn test_malformed_later_result_skipped() {
        let json = r#"{
            "results": [
                {
                    "formatted_address": "Seattle, WA, USA",
                    "geometry": { "location": { "lat": 47.6062095, "lng": -122.3320708 } }
                },
                { "formatted_address": "Partial match" }
            ],
            "status": "OK"
        }"#;
        let raw: GeocodeApiResponse = serde_json::from_str(json).unwrap();
        let candidates = raw.into_candidates().unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].formatted_address, "Seattle, WA, USA");
    }

    #[test]
    fn test_ok_without_results() {
        let raw: GeocodeApiResponse = serde_json::from_str(r#"{"results": [], "status": "OK"}"#).unwrap();
        assert!(raw.into_candidates().unwrap().is_empty());
    }
}
