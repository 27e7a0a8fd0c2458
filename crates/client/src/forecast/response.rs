//! Dark Sky forecast response types and normalization.

use explorer_core::DailyForecast;
use serde::Deserialize;

use crate::ProviderError;

/// Raw forecast response; only the daily block is read.
#[derive(Debug, Deserialize)]
pub struct ForecastApiResponse {
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub data: Vec<DailyDataPoint>,
}

/// One day in the daily block.
#[derive(Debug, Deserialize)]
pub struct DailyDataPoint {
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ForecastApiResponse {
    /// Normalize the daily block. A response without one is a decode error.
    pub fn into_days(self) -> Result<Vec<DailyForecast>, ProviderError> {
        let daily = self
            .daily
            .ok_or_else(|| ProviderError::Decode("daily block missing".into()))?;

        daily
            .data
            .into_iter()
            .enumerate()
            .map(|(idx, day)| {
                let time = day
                    .time
                    .ok_or_else(|| ProviderError::Decode(format!("daily.data[{idx}].time missing")))?;
                let summary = day
                    .summary
                    .ok_or_else(|| ProviderError::Decode(format!("daily.data[{idx}].summary missing")))?;
                Ok(DailyForecast { summary, time })
            })
            .collect()
    }
}
