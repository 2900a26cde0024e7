use crate::models::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for one country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics per country, ordered by country name.
pub fn grouped_summary(points: &[Observation]) -> Vec<Summary> {
    let mut groups: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
    for p in points {
        let entry = groups.entry(p.country.as_str()).or_default();
        match p.value {
            Some(v) => entry.0.push(v),
            None => entry.1 += 1,
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for (country, (mut vals, missing)) in groups {
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let mean = if count > 0 {
            Some(vals.iter().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            country: country.to_string(),
            count,
            missing,
            min: vals.first().copied(),
            max: vals.last().copied(),
            mean,
            median,
        });
    }
    out
}
