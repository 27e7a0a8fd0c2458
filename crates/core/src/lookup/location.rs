//! Location lookups. Locations are a permanent cache: a hit is always served.

use std::sync::Arc;

use crate::Error;
use crate::model::{Location, NewLocation};
use crate::provider::Geocoder;
use crate::store::Store;

/// Cache-aside controller for geocoded locations.
#[derive(Clone)]
pub struct LocationCache {
    store: Store,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationCache {
    pub fn new(store: Store, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Resolve a place name, geocoding and storing it on first use.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the query is blank
    /// - `NotFound` if the geocoder has no candidates (nothing is stored)
    /// - provider or store errors unchanged
    pub async fn lookup(&self, query: &str) -> Result<Location, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        if let Some(location) = self.store.find_location(query).await? {
            tracing::debug!(query, id = location.id, "location cache hit");
            return Ok(location);
        }

        tracing::debug!(query, geocoder = self.geocoder.name(), "location cache miss");
        let candidate = self
            .geocoder
            .geocode(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("no geocoding results for {query:?}")))?;

        let location = self.store.insert_location(&NewLocation::from_candidate(query, candidate)).await?;
        tracing::info!(query, id = location.id, "stored new location");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::fakes::FakeGeocoder;
    use crate::provider::GeocodeCandidate;

    fn seattle() -> GeocodeCandidate {
        GeocodeCandidate { formatted_address: "Seattle, WA, USA".into(), latitude: 47.6, longitude: -122.3 }
    }

    #[tokio::test]
    async fn test_miss_geocodes_and_inserts() {
        let store = Store::open_in_memory().await.unwrap();
        let geocoder = Arc::new(FakeGeocoder::returning(vec![seattle()]));
        let cache = LocationCache::new(store.clone(), geocoder.clone());

        let location = cache.lookup("Seattle, WA").await.unwrap();
        assert_eq!(location.search_query, "Seattle, WA");
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
        assert_eq!(location.latitude, 47.6);
        assert_eq!(location.longitude, -122.3);
        assert!(location.id > 0);

        assert_eq!(geocoder.calls(), 1);
        assert_eq!(store.counts().await.unwrap().locations, 1);
    }

    #[tokio::test]
    async fn test_hit_skips_provider_and_insert() {
        let store = Store::open_in_memory().await.unwrap();
        let geocoder = Arc::new(FakeGeocoder::returning(vec![seattle()]));
        let cache = LocationCache::new(store.clone(), geocoder.clone());

        let first = cache.lookup("Seattle, WA").await.unwrap();
        let second = cache.lookup("Seattle, WA").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(store.counts().await.unwrap().locations, 1);
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let store = Store::open_in_memory().await.unwrap();
        let other = GeocodeCandidate { formatted_address: "Seattle, OR".into(), latitude: 1.0, longitude: 2.0 };
        let cache = LocationCache::new(store, Arc::new(FakeGeocoder::returning(vec![seattle(), other])));

        let location = cache.lookup("Seattle").await.unwrap();
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
    }

    #[tokio::test]
    async fn test_no_candidates_is_not_found() {
        let store = Store::open_in_memory().await.unwrap();
        let geocoder = Arc::new(FakeGeocoder::returning(vec![]));
        let cache = LocationCache::new(store.clone(), geocoder.clone());

        let result = cache.lookup("Atlantis").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(store.counts().await.unwrap().locations, 0);

        // Nothing cached, so the next lookup asks the provider again.
        let _ = cache.lookup("Atlantis").await;
        assert_eq!(geocoder.calls(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_persists_nothing() {
        let store = Store::open_in_memory().await.unwrap();
        let cache = LocationCache::new(store.clone(), Arc::new(FakeGeocoder::failing()));

        let result = cache.lookup("Seattle, WA").await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
        assert_eq!(store.counts().await.unwrap().locations, 0);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let store = Store::open_in_memory().await.unwrap();
        let geocoder = Arc::new(FakeGeocoder::returning(vec![seattle()]));
        let cache = LocationCache::new(store, geocoder.clone());

        assert!(matches!(cache.lookup("   ").await, Err(Error::InvalidInput(_))));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let store = Store::open_in_memory().await.unwrap();
        let geocoder = Arc::new(FakeGeocoder::returning(vec![seattle()]));
        let cache = LocationCache::new(store, geocoder.clone());

        let first = cache.lookup(" Seattle, WA ").await.unwrap();
        assert_eq!(first.search_query, "Seattle, WA");
        cache.lookup("Seattle, WA").await.unwrap();
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_row() {
        let store = Store::open_in_memory().await.unwrap();
        let cache = LocationCache::new(store.clone(), Arc::new(FakeGeocoder::returning(vec![seattle()])));

        let (a, b) = tokio::join!(cache.lookup("Seattle, WA"), cache.lookup("Seattle, WA"));
        assert_eq!(a.unwrap().id, b.unwrap().id);
        assert_eq!(store.counts().await.unwrap().locations, 1);
    }
}
