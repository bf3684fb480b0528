//! House Features - the 19-field prediction request
//!
//! Clients send these fields as a flat JSON object. Validation rules live
//! on the struct; the HTTP layer runs them before anything reaches the
//! adapter.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::layout::FEATURE_COUNT;
use super::vector::{BuildError, FeatureVector, FeatureVectorBuilder};

/// Pre-parsed house attributes, one per schema feature
///
/// Every field has an upper bound, so a request that validates always
/// fits in the f32 model input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HouseFeatures {
    #[validate(range(min = 0.0, max = 100.0))]
    pub bedrooms: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub bathrooms: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_living: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_lot: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub floors: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub waterfront: f64,
    #[validate(range(min = 0.0, max = 4.0))]
    pub view: f64,
    #[validate(range(min = 1.0, max = 5.0))]
    pub condition: f64,
    #[validate(range(min = 1.0, max = 13.0))]
    pub grade: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_above: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_basement: f64,
    #[validate(range(min = 1800.0, max = 2100.0))]
    pub yr_built: f64,
    /// 0 means never renovated
    #[validate(range(min = 0.0, max = 2100.0))]
    pub yr_renovated: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub long: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_lot15: f64,
    #[validate(range(min = 0.0, max = 100_000_000.0))]
    pub sqft_living15: f64,
    #[validate(range(min = 1.0, max = 12.0))]
    pub month: f64,
    #[validate(range(min = 1800.0, max = 2100.0))]
    pub year: f64,
}

impl HouseFeatures {
    /// Field values paired with their schema names
    pub fn named_values(&self) -> [(&'static str, f64); FEATURE_COUNT] {
        [
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("sqft_living", self.sqft_living),
            ("sqft_lot", self.sqft_lot),
            ("floors", self.floors),
            ("waterfront", self.waterfront),
            ("view", self.view),
            ("condition", self.condition),
            ("grade", self.grade),
            ("sqft_above", self.sqft_above),
            ("sqft_basement", self.sqft_basement),
            ("yr_built", self.yr_built),
            ("yr_renovated", self.yr_renovated),
            ("lat", self.lat),
            ("long", self.long),
            ("sqft_lot15", self.sqft_lot15),
            ("sqft_living15", self.sqft_living15),
            ("month", self.month),
            ("year", self.year),
        ]
    }

    /// Assemble the model input, placing each field by schema name
    pub fn to_feature_vector(&self) -> Result<FeatureVector, BuildError> {
        self.named_values()
            .into_iter()
            .try_fold(FeatureVectorBuilder::new(), |builder, (name, value)| {
                builder.set(name, value as f32)
            })?
            .build()
    }

    /// A typical King County sale, handy for smoke tests and docs
    pub fn example() -> Self {
        Self {
            bedrooms: 3.0,
            bathrooms: 2.25,
            sqft_living: 2570.0,
            sqft_lot: 7242.0,
            floors: 2.0,
            waterfront: 0.0,
            view: 0.0,
            condition: 3.0,
            grade: 7.0,
            sqft_above: 2170.0,
            sqft_basement: 400.0,
            yr_built: 1951.0,
            yr_renovated: 1991.0,
            lat: 47.721,
            long: -122.319,
            sqft_lot15: 7639.0,
            sqft_living15: 1690.0,
            month: 12.0,
            year: 2014.0,
        }
    }
}
