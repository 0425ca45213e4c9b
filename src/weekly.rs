use std::collections::BTreeMap;

use anyhow::bail;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{RatedApplication, WeeklyAverage};

// Slash dates with a four-digit year last are month-first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_submission_date(value: &str) -> anyhow::Result<NaiveDate> {
    let value = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp.date());
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }

    bail!("unrecognised submission date {value:?}")
}

pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Mean rating per ISO week number. Rows are bucketed on the week number
/// alone, so week 2 of two different years lands in the same bucket.
pub fn weekly_averages(accepted: &[RatedApplication]) -> anyhow::Result<Vec<WeeklyAverage>> {
    let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for row in accepted {
        let application = &row.record.application;
        let date = match parse_submission_date(&application.submission_date) {
            Ok(date) => date,
            Err(err) => bail!("applicant {}: {err}", application.applicant_id),
        };

        let entry = buckets.entry(iso_week(date)).or_insert((0.0, 0));
        entry.0 += row.rating;
        entry.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(week, (total, count))| WeeklyAverage {
            week,
            average_rating: total / count as f64,
            application_count: count,
        })
        .collect())
}
