use std::ops::RangeInclusive;

use anyhow::Context;

use crate::models::{MergedRecord, RatedApplication};

pub const AGE_BAND: RangeInclusive<f64> = 35.0..=55.0;
pub const WORKING_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const PREFERRED_CITY: &str = "Warsaw";
pub const PREFERRED_REGION: &str = "Masovian Voivodeship";
pub const MARRIED: &str = "Married";

pub const AGE_BONUS: f64 = 20.0;
pub const WORKING_DAY_BONUS: f64 = 20.0;
pub const MARRIED_BONUS: f64 = 20.0;
pub const LOCATION_BONUS: f64 = 10.0;
pub const HIGH_EXTERNAL_BONUS: f64 = 20.0;
pub const LOW_EXTERNAL_PENALTY: f64 = 20.0;

pub const HIGH_EXTERNAL_RATING: f64 = 7.0;
pub const LOW_EXTERNAL_RATING: f64 = 2.0;

/// Scores a single merged row. Missing Age, Score or Amount is an error;
/// empty text fields simply fail to match their rule.
pub fn score_row(record: &MergedRecord) -> anyhow::Result<f64> {
    let application = &record.application;
    let id = &application.applicant_id;

    let age = application
        .age
        .with_context(|| format!("applicant {id} has no Age"))?;
    let score = application
        .score
        .with_context(|| format!("applicant {id} has no Score"))?;
    let amount = application
        .amount
        .with_context(|| format!("applicant {id} has no Amount"))?;

    let mut rating = 0.0;

    if AGE_BAND.contains(&age) {
        rating += AGE_BONUS;
    }
    if WORKING_DAYS.contains(&application.submission_day.as_str()) {
        rating += WORKING_DAY_BONUS;
    }
    if application.marital_status == MARRIED {
        rating += MARRIED_BONUS;
    }
    if application.city == PREFERRED_CITY || application.region == PREFERRED_REGION {
        rating += LOCATION_BONUS;
    }

    rating += score;

    rating += external_adjustment(application.external_rating);

    // Runs last and wins over everything above.
    if amount == 0.0 || application.external_rating == 0.0 {
        rating = 0.0;
    }

    Ok(rating)
}

pub fn external_adjustment(external_rating: f64) -> f64 {
    if external_rating >= HIGH_EXTERNAL_RATING {
        HIGH_EXTERNAL_BONUS
    } else if external_rating <= LOW_EXTERNAL_RATING {
        -LOW_EXTERNAL_PENALTY
    } else {
        0.0
    }
}

pub fn rate_all(records: Vec<MergedRecord>) -> anyhow::Result<Vec<RatedApplication>> {
    records
        .into_iter()
        .map(|record| -> anyhow::Result<RatedApplication> {
            let rating = score_row(&record)?;
            Ok(RatedApplication { record, rating })
        })
        .collect()
}

/// Drops every row whose rating is not strictly positive.
pub fn accepted(rated: Vec<RatedApplication>) -> Vec<RatedApplication> {
    rated.into_iter().filter(|row| row.rating > 0.0).collect()
}
