//! Restaurant lookups: a per-location group of businesses with an hours TTL.

use std::sync::Arc;

use chrono::Utc;

use crate::Error;
use crate::freshness::Ttl;
use crate::model::{Location, RestaurantEntry};
use crate::provider::BusinessSearch;
use crate::store::Store;

use super::resolve;

/// Cache-aside controller for nearby restaurants.
#[derive(Clone)]
pub struct RestaurantCache {
    store: Store,
    search: Arc<dyn BusinessSearch>,
    ttl: Ttl,
}

impl RestaurantCache {
    pub fn new(store: Store, search: Arc<dyn BusinessSearch>) -> Self {
        Self { store, search, ttl: Ttl::restaurants() }
    }

    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Restaurants near a stored location.
    pub async fn lookup(&self, location: &Location) -> Result<Vec<RestaurantEntry>, Error> {
        self.lookup_at(location, Utc::now().timestamp_millis()).await
    }

    /// Same as [`lookup`](Self::lookup) with an explicit clock reading in epoch millis.
    pub async fn lookup_at(&self, location: &Location, now: i64) -> Result<Vec<RestaurantEntry>, Error> {
        let location = &resolve(&self.store, location).await?;
        let cached = self.store.restaurant_group(location.id).await?;

        match cached.first() {
            Some(first) if !self.ttl.is_stale(first.created_at, now) => {
                tracing::debug!(location_id = location.id, rows = cached.len(), "restaurant cache hit");
                return Ok(cached);
            }
            Some(first) => {
                tracing::debug!(
                    location_id = location.id,
                    age = self.ttl.age(first.created_at, now),
                    "restaurant group stale"
                );
            }
            None => tracing::debug!(location_id = location.id, "restaurant cache miss"),
        }

        let entries: Vec<RestaurantEntry> = self
            .search
            .search_businesses(location.latitude, location.longitude)
            .await?
            .into_iter()
            .map(|business| RestaurantEntry::from_business(business, location.id, now))
            .collect();

        self.store.replace_restaurant_group(location.id, &entries).await?;
        tracing::info!(
            location_id = location.id,
            restaurants = entries.len(),
            provider = self.search.name(),
            "refreshed restaurants"
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::fakes::{FakeBusinessSearch, stored_location};
    use crate::provider::Business;

    const HOUR: i64 = 60 * 60 * 1000;

    fn businesses(n: usize) -> Vec<Business> {
        (0..n)
            .map(|i| Business {
                name: format!("Diner {i}"),
                image_url: format!("https://img.example/{i}.jpg"),
                price: if i % 2 == 0 { Some("$$".into()) } else { None },
                rating: 4.0,
                url: format!("https://www.yelp.com/biz/diner-{i}"),
            })
            .collect()
    }

    fn cached_group(location_id: i64, n: usize, created_at: i64) -> Vec<RestaurantEntry> {
        businesses(n)
            .into_iter()
            .map(|b| {
                let name = format!("Cached {}", b.name);
                RestaurantEntry { name, ..RestaurantEntry::from_business(b, location_id, created_at) }
            })
            .collect()
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores() {
        let (store, location) = stored_location().await;
        let search = Arc::new(FakeBusinessSearch::returning(businesses(3)));
        let cache = RestaurantCache::new(store.clone(), search.clone());
        let now = Utc::now().timestamp_millis();

        let entries = cache.lookup_at(&location, now).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Diner 0");
        assert_eq!(entries[0].price.as_deref(), Some("$$"));
        assert!(entries[1].price.is_none());
        assert_eq!(search.calls(), 1);
        assert_eq!(store.restaurant_group(location.id).await.unwrap(), entries);
    }

    #[tokio::test]
    async fn test_fresh_group_served_unchanged() {
        let (store, location) = stored_location().await;
        let now = Utc::now().timestamp_millis();
        let cached = cached_group(location.id, 2, now - 22 * HOUR);
        store.replace_restaurant_group(location.id, &cached).await.unwrap();

        let search = Arc::new(FakeBusinessSearch::returning(businesses(5)));
        let cache = RestaurantCache::new(store, search.clone());

        assert_eq!(cache.lookup_at(&location, now).await.unwrap(), cached);
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_after_23_hours() {
        let (store, location) = stored_location().await;
        let now = Utc::now().timestamp_millis();
        store
            .replace_restaurant_group(location.id, &cached_group(location.id, 4, now - 24 * HOUR))
            .await
            .unwrap();

        let search = Arc::new(FakeBusinessSearch::returning(businesses(2)));
        let cache = RestaurantCache::new(store.clone(), search.clone());

        let entries = cache.lookup_at(&location, now).await.unwrap();
        assert_eq!(search.calls(), 1);
        assert_eq!(entries.len(), 2);

        let stored = store.restaurant_group(location.id).await.unwrap();
        assert_eq!(stored, entries);
        assert!(stored.iter().all(|e| e.created_at == now));
    }

    #[tokio::test]
    async fn test_two_hour_old_group_still_fresh() {
        let (store, location) = stored_location().await;
        let now = Utc::now().timestamp_millis();
        store
            .replace_restaurant_group(location.id, &cached_group(location.id, 1, now - 2 * HOUR))
            .await
            .unwrap();

        let search = Arc::new(FakeBusinessSearch::returning(businesses(1)));
        let cache = RestaurantCache::new(store, search.clone());

        cache.lookup_at(&location, now).await.unwrap();
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn test_failing_search_persists_nothing() {
        let (store, location) = stored_location().await;
        let cache = RestaurantCache::new(store.clone(), Arc::new(FakeBusinessSearch::failing()));

        assert!(matches!(cache.lookup(&location).await, Err(Error::ProviderUnavailable(_))));
        assert_eq!(store.counts().await.unwrap().restaurants, 0);
    }

    #[tokio::test]
    async fn test_concurrent_misses_leave_one_group() {
        let (store, location) = stored_location().await;
        let cache = RestaurantCache::new(store.clone(), Arc::new(FakeBusinessSearch::returning(businesses(3))));

        let (a, b) = tokio::join!(cache.lookup(&location), cache.lookup(&location));
        a.unwrap();
        b.unwrap();
        assert_eq!(store.restaurant_group(location.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_group_kept_when_search_fails() {
        let (store, location) = stored_location().await;
        let now = Utc::now().timestamp_millis();
        let stale = cached_group(location.id, 3, now - 30 * HOUR);
        store.replace_restaurant_group(location.id, &stale).await.unwrap();

        let search = Arc::new(FakeBusinessSearch::failing());
        let cache = RestaurantCache::new(store.clone(), search.clone());

        let result = cache.lookup_at(&location, now).await;
        assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
        assert_eq!(search.calls(), 1);
        assert_eq!(store.restaurant_group(location.id).await.unwrap(), stale);
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found_without_search() {
        let (store, location) = stored_location().await;
        let search = Arc::new(FakeBusinessSearch::returning(Vec::new()));
        let cache = RestaurantCache::new(store.clone(), search.clone());

        let unknown = Location { id: location.id + 9, ..location };
        assert!(matches!(cache.lookup(&unknown).await, Err(Error::NotFound(_))));
        assert_eq!(search.calls(), 0);
        assert_eq!(store.counts().await.unwrap().restaurants, 0);
    }
}
