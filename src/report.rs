use std::fmt::Write;
use std::path::Path;

use anyhow::Context;

use crate::models::{RatedApplication, WeeklyAverage};
use crate::pipeline::PipelineOutput;

pub fn top_rated(accepted: &[RatedApplication], limit: usize) -> Vec<&RatedApplication> {
    let mut rows: Vec<&RatedApplication> = accepted.iter().collect();
    rows.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(limit);
    rows
}

/// Matched industry attributes as `name=value` pairs, skipping nulls.
fn industry_attributes(names: &[String], row: &RatedApplication) -> String {
    names
        .iter()
        .zip(&row.record.industry_attributes)
        .filter_map(|(name, value)| value.as_ref().map(|value| format!("{name}={value}")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn weekly_json(weekly: &[WeeklyAverage]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(weekly)?)
}

pub fn build_report(output: &PipelineOutput) -> String {
    let summary = &output.summary;
    let mut report = String::new();

    let _ = writeln!(report, "# Application Rating Report");
    let _ = writeln!(report);
    let _ = writeln!(report, "## Pipeline");
    let _ = writeln!(report, "- Applications loaded: {}", summary.loaded);
    let _ = writeln!(
        report,
        "- Duplicate applicants dropped: {}",
        summary.clean.duplicates_dropped
    );
    let _ = writeln!(
        report,
        "- Missing external ratings filled: {}",
        summary.clean.external_ratings_filled
    );
    let _ = writeln!(
        report,
        "- Missing education levels filled: {}",
        summary.clean.education_levels_filled
    );
    let _ = writeln!(report, "- Industry reference rows: {}", summary.industries);
    let _ = writeln!(report, "- Rows after merge: {}", summary.merged);
    let _ = writeln!(report, "- Accepted: {}", summary.accepted);
    let _ = writeln!(report, "- Rejected: {}", summary.rejected);

    let _ = writeln!(report);
    let _ = writeln!(report, "## Average Rating Per Week");

    if output.weekly.is_empty() {
        let _ = writeln!(report, "No accepted applications.");
    } else {
        let _ = writeln!(report, "| Week | Applications | Average Rating |");
        let _ = writeln!(report, "|-----:|-------------:|---------------:|");
        for week in &output.weekly {
            let _ = writeln!(
                report,
                "| {} | {} | {:.2} |",
                week.week, week.application_count, week.average_rating
            );
        }
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "## Highest Rated Applications");

    let top = top_rated(&output.accepted, 10);
    if top.is_empty() {
        let _ = writeln!(report, "No accepted applications.");
    } else {
        for row in top {
            let application = &row.record.application;
            let _ = write!(
                report,
                "- {} ({}, {}, {}) rating {:.2} submitted {}",
                application.applicant_id,
                application.industry,
                application.city,
                application.education_level,
                row.rating,
                application.submission_date
            );
            let attributes = industry_attributes(&output.attribute_names, row);
            if attributes.is_empty() {
                let _ = writeln!(report);
            } else {
                let _ = writeln!(report, " [{attributes}]");
            }
        }
    }

    report
}

pub fn write_report(out: &Path, output: &PipelineOutput) -> anyhow::Result<()> {
    std::fs::write(out, build_report(output))
        .with_context(|| format!("failed to write {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Application, MergedRecord};
    use crate::pipeline::PipelineSummary;

    fn rated(id: &str, rating: f64) -> RatedApplication {
        RatedApplication {
            record: MergedRecord {
                application: Application {
                    applicant_id: id.to_string(),
                    age: Some(40.0),
                    submission_day: "Monday".to_string(),
                    marital_status: "Married".to_string(),
                    city: "Warsaw".to_string(),
                    region: "Other".to_string(),
                    industry: "IT".to_string(),
                    external_rating: 8.0,
                    score: Some(5.0),
                    amount: Some(1000.0),
                    submission_date: "2024-01-08".to_string(),
                    education_level: "Średnie".to_string(),
                },
                industry_attributes: vec![],
            },
            rating,
        }
    }

    #[test]
    fn top_rated_sorts_descending_and_truncates() {
        let rows = vec![rated("A", 10.0), rated("B", 95.0), rated("C", 40.0)];
        let top = top_rated(&rows, 2);
        let ids: Vec<&str> = top
            .iter()
            .map(|r| r.record.application.applicant_id.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn report_lists_weeks_and_top_applications() {
        let output = PipelineOutput {
            attribute_names: vec![],
            accepted: vec![rated("A", 95.0)],
            weekly: vec![WeeklyAverage {
                week: 2,
                average_rating: 95.0,
                application_count: 1,
            }],
            summary: PipelineSummary {
                loaded: 2,
                accepted: 1,
                rejected: 1,
                merged: 2,
                ..PipelineSummary::default()
            },
        };

        let report = build_report(&output);
        assert!(report.starts_with("# Application Rating Report"));
        assert!(report.contains("- Applications loaded: 2"));
        assert!(report.contains("| 2 | 1 | 95.00 |"));
        assert!(report.contains("- A (IT, Warsaw, Średnie) rating 95.00 submitted 2024-01-08\n"));
    }

    #[test]
    fn report_shows_matched_industry_attributes() {
        let mut matched = rated("A", 80.0);
        matched.record.industry_attributes = vec![Some("Tech".to_string()), None];
        let output = PipelineOutput {
            attribute_names: vec!["Sector".to_string(), "Risk".to_string()],
            accepted: vec![matched],
            weekly: vec![],
            summary: PipelineSummary::default(),
        };

        let report = build_report(&output);
        assert!(report.contains("rating 80.00 submitted 2024-01-08 [Sector=Tech]"));
    }

    #[test]
    fn empty_report_says_so() {
        let output = PipelineOutput {
            attribute_names: vec![],
            accepted: vec![],
            weekly: vec![],
            summary: PipelineSummary::default(),
        };

        let report = build_report(&output);
        assert_eq!(report.matches("No accepted applications.").count(), 2);
    }

    fn empty_output() -> PipelineOutput {
        PipelineOutput {
            attribute_names: vec![],
            accepted: vec![],
            weekly: vec![],
            summary: PipelineSummary::default(),
        }
    }

    #[test]
    fn write_report_creates_file() {
        let path = std::env::temp_dir().join("application_rating_report_test.md");
        let _ = std::fs::remove_file(&path);

        write_report(&path, &empty_output()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Application Rating Report"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_report_error_names_the_path() {
        let path = std::env::temp_dir()
            .join("application_rating_missing_dir")
            .join("report.md");

        let err = write_report(&path, &empty_output()).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
        assert!(err.to_string().contains("report.md"));
    }

    #[test]
    fn weekly_json_is_an_array_of_weeks() {
        let json = weekly_json(&[WeeklyAverage {
            week: 7,
            average_rating: 42.5,
            application_count: 3,
        }])
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["week"], 7);
        assert_eq!(value[0]["average_rating"], 42.5);
        assert_eq!(value[0]["application_count"], 3);
    }
}
