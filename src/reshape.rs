//! Wide-to-long reshaping of indicator tables.
//!
//! Pipeline per dataset: project onto the kept columns, keep only allow-listed
//! countries, then melt each selected year column into one [`Observation`] per
//! (country, year). Missing cells stay missing.

use crate::config::{COUNTRY_ALLOW_LIST, COUNTRY_COLUMN, YEAR_ALLOW_LIST};
use crate::error::WrangleError;
use crate::models::Observation;
use crate::table::WideTable;
use ahash::AHashSet;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{3}$").expect("static year regex"));

/// Parse a year-column label (`"2010"`) into a calendar year.
///
/// Only four-digit labels without a leading zero are accepted, so the year
/// always formats back to the original label.
pub fn parse_year(label: &str) -> Result<i32, WrangleError> {
    if !YEAR_LABEL.is_match(label) {
        return Err(WrangleError::UnparseableYear(label.to_string()));
    }
    label
        .parse::<i32>()
        .map_err(|_| WrangleError::UnparseableYear(label.to_string()))
}

fn parse_value(
    country: &str,
    column: &str,
    cell: Option<&str>,
) -> Result<Option<f64>, WrangleError> {
    let raw = match cell.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };
    match raw.parse::<f64>() {
        // NaN and infinities cannot be plotted; treat them as missing.
        Ok(v) if !v.is_finite() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(WrangleError::InvalidValue {
            country: country.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Reshape a wide table into long-format observations.
///
/// - `keep_columns`: columns to project onto; must contain [`COUNTRY_COLUMN`].
/// - `value_years`: year columns to melt; each must also be in `keep_columns`.
///
/// Output length is `rows matching the allow-list × value_years.len()`, ordered
/// year-major (all countries for the first year, then the next year, …).
/// No allow-listed rows is not an error: the result is simply empty.
pub fn reshape(
    table: &WideTable,
    keep_columns: &[&str],
    value_years: &[&str],
) -> Result<Vec<Observation>, WrangleError> {
    // Projection: every kept column must exist.
    let mut kept = Vec::with_capacity(keep_columns.len());
    for &name in keep_columns {
        let idx = table
            .column_index(name)
            .ok_or_else(|| WrangleError::MissingColumn(name.to_string()))?;
        kept.push((name, idx));
    }
    let lookup = |name: &str| {
        kept.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, idx)| *idx)
            .ok_or_else(|| WrangleError::MissingColumn(name.to_string()))
    };
    let country_idx = lookup(COUNTRY_COLUMN)?;

    let mut melt = Vec::with_capacity(value_years.len());
    for &label in value_years {
        let idx = lookup(label)?;
        melt.push((label, parse_year(label)?, idx));
    }

    let allow: AHashSet<&str> = COUNTRY_ALLOW_LIST.iter().copied().collect();
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut countries = Vec::new();
    for row in table.rows() {
        let Some(country) = row.get(country_idx) else {
            continue;
        };
        if !allow.contains(country) {
            continue;
        }
        if !seen.insert(country) {
            return Err(WrangleError::DuplicateCountry(country.to_string()));
        }
        countries.push((country, row));
    }

    let mut out = Vec::with_capacity(countries.len() * melt.len());
    for &(label, year, idx) in &melt {
        for &(country, row) in &countries {
            out.push(Observation {
                country: country.to_string(),
                year,
                value: parse_value(country, label, row.get(idx))?,
            });
        }
    }

    log::debug!(
        "reshaped {} of {} rows into {} observations",
        countries.len(),
        table.rows().len(),
        out.len()
    );
    Ok(out)
}

/// [`reshape`] with the default projection: country column plus [`YEAR_ALLOW_LIST`].
pub fn reshape_default(table: &WideTable) -> Result<Vec<Observation>, WrangleError> {
    let mut keep = Vec::with_capacity(YEAR_ALLOW_LIST.len() + 1);
    keep.push(COUNTRY_COLUMN);
    keep.extend_from_slice(YEAR_ALLOW_LIST);
    reshape(table, &keep, YEAR_ALLOW_LIST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawRecord;

    fn table(rows: &[[&str; 3]]) -> WideTable {
        WideTable::new(
            vec!["Country Name".into(), "2000".into(), "2019".into()],
            rows.iter().map(|r| RawRecord::new(r.iter().copied())).collect(),
        )
    }

    #[test]
    fn year_labels_round_trip() {
        for label in ["1990", "2000", "2010", "2019"] {
            assert_eq!(parse_year(label).unwrap().to_string(), label);
        }
        for bad in ["", "19x0", "0990", "20190", "Country Name", " 2019"] {
            assert!(matches!(parse_year(bad), Err(WrangleError::UnparseableYear(_))), "{bad}");
        }
    }

    #[test]
    fn filters_to_allow_list_and_melts_year_major() {
        let t = table(&[
            ["Brazil", "1", "2"],
            ["Aruba", "3", "4"],
            ["China", "5", ""],
        ]);
        let obs = reshape(&t, &["Country Name", "2000", "2019"], &["2000", "2019"]).unwrap();
        let got: Vec<(&str, i32, Option<f64>)> = obs
            .iter()
            .map(|o| (o.country.as_str(), o.year, o.value))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Brazil", 2000, Some(1.0)),
                ("China", 2000, Some(5.0)),
                ("Brazil", 2019, Some(2.0)),
                ("China", 2019, None),
            ]
        );
    }

    #[test]
    fn missing_keep_column_is_an_error() {
        let t = table(&[["Brazil", "1", "2"]]);
        let err = reshape(&t, &["Country Name", "1990"], &["1990"]).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(c) if c == "1990"));
    }

    #[test]
    fn value_year_outside_keep_columns_is_missing() {
        let t = table(&[["Brazil", "1", "2"]]);
        let err = reshape(&t, &["Country Name", "2000"], &["2019"]).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(c) if c == "2019"));
    }

    #[test]
    fn non_year_value_column_is_unparseable() {
        let t = WideTable::new(
            vec!["Country Name".into(), "Country Code".into()],
            vec![RawRecord::new(["Brazil", "BRA"])],
        );
        let err = reshape(&t, &["Country Name", "Country Code"], &["Country Code"]).unwrap_err();
        assert!(matches!(err, WrangleError::UnparseableYear(_)));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let t = table(&[["India", "n/a", "2"]]);
        let err = reshape(&t, &["Country Name", "2000", "2019"], &["2000"]).unwrap_err();
        assert!(
            matches!(err, WrangleError::InvalidValue { ref country, .. } if country == "India")
        );
    }

    #[test]
    fn duplicate_allow_listed_country_is_rejected() {
        let t = table(&[["India", "1", "2"], ["India", "3", "4"]]);
        let err = reshape(&t, &["Country Name", "2000"], &["2000"]).unwrap_err();
        assert!(matches!(err, WrangleError::DuplicateCountry(c) if c == "India"));
    }

    #[test]
    fn country_match_is_exact() {
        let t = table(&[
            ["china", "1", "2"],
            ["China ", "1", "2"],
            ["Russia", "1", "2"],
            ["United States of America", "1", "2"],
            ["BRAZIL", "1", "2"],
            ["Brazil", "3", "4"],
        ]);
        let years = ["2000", "2019"];
        let obs = reshape(&t, &["Country Name", "2000", "2019"], &years).unwrap();
        assert_eq!(obs.len(), years.len());
        assert!(obs.iter().all(|o| o.country == "Brazil"));
    }

    #[test]
    fn non_finite_cells_are_missing() {
        let t = table(&[["China", "inf", "NaN"], ["Brazil", "-infinity", "7"]]);
        let obs = reshape(&t, &["Country Name", "2000", "2019"], &["2000", "2019"]).unwrap();
        let values: Vec<Option<f64>> = obs.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![None, None, None, Some(7.0)]);
    }

    #[test]
    fn no_matching_rows_yields_empty() {
        let t = table(&[["World", "1", "2"]]);
        let obs = reshape(&t, &["Country Name", "2000", "2019"], &["2000", "2019"]).unwrap();
        assert!(obs.is_empty());
    }
}
