use serde::{Deserialize, Serialize};

/// Numeric housing attributes, in the column order of the source CSV
pub const RAW_NUMERIC_COLUMNS: &[&str] = &[
    "bedrooms",
    "bathrooms",
    "sqft_living",
    "sqft_lot",
    "floors",
    "waterfront",
    "view",
    "condition",
    "grade",
    "sqft_above",
    "sqft_basement",
    "yr_built",
    "yr_renovated",
    "lat",
    "long",
    "sqft_living15",
    "sqft_lot15",
];

/// One row of the King County sales dataset
///
/// Columns are matched by header name, so the CSV may order them freely.
/// `id` and `zipcode` stay textual: they are identifiers, not magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHousingRecord {
    pub id: String,
    pub date: String,
    /// Sale price; absent in held-out data
    #[serde(default)]
    pub price: Option<f64>,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub sqft_living: f64,
    pub sqft_lot: f64,
    pub floors: f64,
    pub waterfront: f64,
    pub view: f64,
    pub condition: f64,
    pub grade: f64,
    pub sqft_above: f64,
    pub sqft_basement: f64,
    pub yr_built: f64,
    pub yr_renovated: f64,
    pub zipcode: String,
    pub lat: f64,
    pub long: f64,
    pub sqft_living15: f64,
    pub sqft_lot15: f64,
}

impl RawHousingRecord {
    /// Numeric attributes in `RAW_NUMERIC_COLUMNS` order
    pub fn numeric_values(&self) -> [f64; 17] {
        [
            self.bedrooms,
            self.bathrooms,
            self.sqft_living,
            self.sqft_lot,
            self.floors,
            self.waterfront,
            self.view,
            self.condition,
            self.grade,
            self.sqft_above,
            self.sqft_basement,
            self.yr_built,
            self.yr_renovated,
            self.lat,
            self.long,
            self.sqft_living15,
            self.sqft_lot15,
        ]
    }

    /// First row of the public dataset, used across tests
    pub fn sample() -> Self {
        Self {
            id: "7129300520".to_string(),
            date: "20141013T000000".to_string(),
            price: Some(221900.0),
            bedrooms: 3.0,
            bathrooms: 1.0,
            sqft_living: 1180.0,
            sqft_lot: 5650.0,
            floors: 1.0,
            waterfront: 0.0,
            view: 0.0,
            condition: 3.0,
            grade: 7.0,
            sqft_above: 1180.0,
            sqft_basement: 0.0,
            yr_built: 1955.0,
            yr_renovated: 0.0,
            zipcode: "98178".to_string(),
            lat: 47.5112,
            long: -122.257,
            sqft_living15: 1340.0,
            sqft_lot15: 5650.0,
        }
    }
}
