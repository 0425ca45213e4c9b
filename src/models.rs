use serde::{Deserialize, Serialize};

/// One row of `applications.csv` exactly as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRecord {
    pub applicant_id: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Submission Day")]
    pub submission_day: String,
    #[serde(rename = "Marital Status")]
    pub marital_status: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "External Rating")]
    pub external_rating: Option<f64>,
    #[serde(rename = "Score")]
    pub score: Option<f64>,
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,
    #[serde(rename = "Submission Date")]
    pub submission_date: String,
    #[serde(rename = "Education level")]
    pub education_level: Option<String>,
}

/// An application after cleaning: the two filled fields are no longer optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub applicant_id: String,
    pub age: Option<f64>,
    pub submission_day: String,
    pub marital_status: String,
    pub city: String,
    pub region: String,
    pub industry: String,
    pub external_rating: f64,
    pub score: Option<f64>,
    pub amount: Option<f64>,
    pub submission_date: String,
    pub education_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndustryRow {
    pub industry: String,
    pub attributes: Vec<String>,
}

/// Reference data keyed by industry name. Columns other than `Industry` are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndustryTable {
    pub attribute_names: Vec<String>,
    pub rows: Vec<IndustryRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub application: Application,
    /// Aligned with [`IndustryTable::attribute_names`]; `None` when no industry matched.
    pub industry_attributes: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatedApplication {
    pub record: MergedRecord,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyAverage {
    pub week: u32,
    pub average_rating: f64,
    pub application_count: usize,
}
