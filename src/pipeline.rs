use std::path::PathBuf;

use tracing::{debug, info};

use crate::clean::{self, CleanSummary};
use crate::loader;
use crate::merge;
use crate::models::{RatedApplication, WeeklyAverage};
use crate::rating;
use crate::weekly;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub applications: PathBuf,
    pub industries: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub loaded: usize,
    pub clean: CleanSummary,
    pub industries: usize,
    pub merged: usize,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub attribute_names: Vec<String>,
    pub accepted: Vec<RatedApplication>,
    pub weekly: Vec<WeeklyAverage>,
    pub summary: PipelineSummary,
}

#[tracing::instrument(
    skip(config),
    fields(
        applications = %config.applications.display(),
        industries = %config.industries.display()
    )
)]
pub fn run(config: &PipelineConfig) -> anyhow::Result<PipelineOutput> {
    let raw = loader::load_applications(&config.applications)?;
    let industries = loader::load_industries(&config.industries)?;
    let loaded = raw.len();

    let (applications, clean_summary) = clean::clean(raw);
    info!(
        loaded,
        unique = applications.len(),
        duplicates = clean_summary.duplicates_dropped,
        external_ratings_filled = clean_summary.external_ratings_filled,
        education_levels_filled = clean_summary.education_levels_filled,
        "Cleaned applications"
    );

    let merged = merge::left_join(applications, &industries);
    let merged_count = merged.len();
    debug!(rows = merged_count, industries = industries.rows.len(), "Merged industry data");

    let rated = rating::rate_all(merged)?;
    let accepted = rating::accepted(rated);
    info!(
        accepted = accepted.len(),
        rejected = merged_count - accepted.len(),
        "Rated applications"
    );

    let weekly = weekly::weekly_averages(&accepted)?;
    info!(weeks = weekly.len(), "Aggregated weekly averages");

    let summary = PipelineSummary {
        loaded,
        clean: clean_summary,
        industries: industries.rows.len(),
        merged: merged_count,
        accepted: accepted.len(),
        rejected: merged_count - accepted.len(),
    };

    Ok(PipelineOutput {
        attribute_names: industries.attribute_names,
        accepted,
        weekly,
        summary,
    })
}
