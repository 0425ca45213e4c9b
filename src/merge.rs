use std::collections::HashMap;

use crate::models::{Application, IndustryTable, MergedRecord};

/// Left join on the industry name. Every application survives; an application
/// matching several industry rows yields one merged row per match, in the
/// order those rows appear in the industry table.
pub fn left_join(applications: Vec<Application>, industries: &IndustryTable) -> Vec<MergedRecord> {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, row) in industries.rows.iter().enumerate() {
        index.entry(row.industry.as_str()).or_default().push(position);
    }

    let mut merged = Vec::with_capacity(applications.len());
    for application in applications {
        match index.get(application.industry.as_str()) {
            Some(matches) => {
                for &position in matches {
                    merged.push(MergedRecord {
                        application: application.clone(),
                        industry_attributes: industries.rows[position]
                            .attributes
                            .iter()
                            .cloned()
                            .map(Some)
                            .collect(),
                    });
                }
            }
            None => merged.push(MergedRecord {
                application,
                industry_attributes: vec![None; industries.attribute_names.len()],
            }),
        }
    }

    merged
}
