//! Yelp Fusion business search response types and normalization.

use explorer_core::Business;
use serde::Deserialize;

use crate::ProviderError;

/// Raw response from `/businesses/search`.
#[derive(Debug, Deserialize)]
pub struct BusinessSearchApiResponse {
    #[serde(default)]
    pub businesses: Option<Vec<RawBusiness>>,
}

/// Individual business from Yelp.
#[derive(Debug, Deserialize)]
pub struct RawBusiness {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawBusiness {
    fn into_business(self, index: usize) -> Result<Business, ProviderError> {
        let missing = |field: &str| ProviderError::Decode(format!("businesses[{index}].{field} missing"));

        Ok(Business {
            name: self.name.ok_or_else(|| missing("name"))?,
            image_url: self.image_url.unwrap_or_default(),
            price: self.price.filter(|p| !p.is_empty()),
            rating: self.rating.ok_or_else(|| missing("rating"))?,
            url: self.url.ok_or_else(|| missing("url"))?,
        })
    }
}

impl BusinessSearchApiResponse {
    /// Normalize every business. `image_url` and `price` are optional upstream.
    pub fn into_businesses(self) -> Result<Vec<Business>, ProviderError> {
        self.businesses
            .ok_or_else(|| ProviderError::Decode("businesses missing".into()))?
            .into_iter()
            .enumerate()
            .map(|(idx, b)| b.into_business(idx))
            .collect()
    }
}
