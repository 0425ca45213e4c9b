use std::path::Path;

use anyhow::{bail, Context};
use tracing::debug;

use crate::models::{ApplicationRecord, IndustryRow, IndustryTable};

pub const INDUSTRY_KEY: &str = "Industry";

pub const APPLICATION_COLUMNS: [&str; 12] = [
    "applicant_id",
    "Age",
    "Submission Day",
    "Marital Status",
    "City",
    "Region",
    "Industry",
    "External Rating",
    "Score",
    "Amount",
    "Submission Date",
    "Education level",
];

pub fn load_applications(csv_path: &Path) -> anyhow::Result<Vec<ApplicationRecord>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = APPLICATION_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} is missing required columns: {}",
            csv_path.display(),
            missing.join(", ")
        );
    }

    let mut applications = Vec::new();
    for (index, result) in reader.deserialize::<ApplicationRecord>().enumerate() {
        let row = result.with_context(|| {
            format!("invalid application row {} in {}", index + 1, csv_path.display())
        })?;
        applications.push(row);
    }

    debug!(path = %csv_path.display(), rows = applications.len(), "Loaded applications");
    Ok(applications)
}

pub fn load_industries(csv_path: &Path) -> anyhow::Result<IndustryTable> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let headers = reader.headers()?.clone();
    let Some(key_index) = headers.iter().position(|header| header == INDUSTRY_KEY) else {
        bail!("{} has no {} column", csv_path.display(), INDUSTRY_KEY);
    };

    let attribute_names = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != key_index)
        .map(|(_, name)| name.to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!("invalid industry row {} in {}", index + 1, csv_path.display())
        })?;

        rows.push(IndustryRow {
            industry: record.get(key_index).unwrap_or_default().to_string(),
            attributes: record
                .iter()
                .enumerate()
                .filter(|(column, _)| *column != key_index)
                .map(|(_, value)| value.to_string())
                .collect(),
        });
    }

    debug!(path = %csv_path.display(), rows = rows.len(), "Loaded industries");
    Ok(IndustryTable {
        attribute_names,
        rows,
    })
}
