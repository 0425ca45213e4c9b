use std::collections::HashSet;

use crate::models::{Application, ApplicationRecord};

pub const DEFAULT_EXTERNAL_RATING: f64 = 0.0;
pub const DEFAULT_EDUCATION_LEVEL: &str = "Średnie";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub duplicates_dropped: usize,
    pub external_ratings_filled: usize,
    pub education_levels_filled: usize,
}

/// Keeps the first row seen for each applicant, preserving input order.
pub fn deduplicate(records: Vec<ApplicationRecord>) -> Vec<ApplicationRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.applicant_id.clone()))
        .collect()
}

pub fn fill_missing(record: ApplicationRecord) -> Application {
    Application {
        applicant_id: record.applicant_id,
        age: record.age,
        submission_day: record.submission_day,
        marital_status: record.marital_status,
        city: record.city,
        region: record.region,
        industry: record.industry,
        external_rating: record.external_rating.unwrap_or(DEFAULT_EXTERNAL_RATING),
        score: record.score,
        amount: record.amount,
        submission_date: record.submission_date,
        education_level: record
            .education_level
            .unwrap_or_else(|| DEFAULT_EDUCATION_LEVEL.to_string()),
    }
}

pub fn clean(records: Vec<ApplicationRecord>) -> (Vec<Application>, CleanSummary) {
    let total = records.len();
    let unique = deduplicate(records);

    let summary = CleanSummary {
        duplicates_dropped: total - unique.len(),
        external_ratings_filled: unique
            .iter()
            .filter(|record| record.external_rating.is_none())
            .count(),
        education_levels_filled: unique
            .iter()
            .filter(|record| record.education_level.is_none())
            .count(),
    };

    let applications = unique.into_iter().map(fill_missing).collect();
    (applications, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, external_rating: Option<f64>, education: Option<&str>) -> ApplicationRecord {
        ApplicationRecord {
            applicant_id: id.to_string(),
            age: Some(40.0),
            submission_day: "Monday".to_string(),
            marital_status: "Married".to_string(),
            city: "Warsaw".to_string(),
            region: "Other".to_string(),
            industry: "IT".to_string(),
            external_rating,
            score: Some(5.0),
            amount: Some(1000.0),
            submission_date: "2024-01-08".to_string(),
            education_level: education.map(str::to_string),
        }
    }

    #[test]
    fn keeps_first_occurrence_per_applicant() {
        let records = vec![
            raw("A", Some(1.0), None),
            raw("B", Some(2.0), None),
            raw("A", Some(3.0), None),
            raw("C", Some(4.0), None),
            raw("B", Some(5.0), None),
        ];

        let unique = deduplicate(records);
        let ids: Vec<&str> = unique.iter().map(|r| r.applicant_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(unique[0].external_rating, Some(1.0));
        assert_eq!(unique[1].external_rating, Some(2.0));
    }

    #[test]
    fn fills_external_rating_and_education_defaults() {
        let application = fill_missing(raw("A", None, None));
        assert_eq!(application.external_rating, 0.0);
        assert_eq!(application.education_level, "Średnie");

        let application = fill_missing(raw("B", Some(6.5), Some("Wyższe")));
        assert_eq!(application.external_rating, 6.5);
        assert_eq!(application.education_level, "Wyższe");
    }

    #[test]
    fn clean_counts_only_surviving_rows() {
        let records = vec![
            raw("A", None, Some("Wyższe")),
            raw("A", None, None),
            raw("B", Some(8.0), None),
        ];

        let (applications, summary) = clean(records);
        assert_eq!(applications.len(), 2);
        assert_eq!(
            summary,
            CleanSummary {
                duplicates_dropped: 1,
                external_ratings_filled: 1,
                education_levels_filled: 1,
            }
        );

        let mut ids = HashSet::new();
        assert!(applications.iter().all(|a| ids.insert(a.applicant_id.clone())));
    }
}
