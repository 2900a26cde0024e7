use std::fs;
use tempfile::tempdir;
use wdi_dashboard::models::Observation;
use wdi_dashboard::{Sources, build_charts, storage};

fn sample(n: usize) -> Vec<Observation> {
    (0..n)
        .map(|i| Observation {
            country: "Brazil".into(),
            year: 1990 + 10 * i as i32,
            value: if i == 1 { None } else { Some(100.0 + i as f64) },
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("gdp.csv");
    storage::save_csv(&rows, "GDP_in_USD", &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("country,year,GDP_in_USD\n"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("Brazil,2000,\n"));

    let json_path = dir.path().join("gdp.json");
    storage::save_json(&rows, &json_path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    assert!(v[1]["value"].is_null());
}

#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let points = vec![Observation {
        country: "@foo".into(),
        year: 2019,
        value: Some(1.0),
    }];
    let dir = tempdir().unwrap();
    let path = dir.path().join("inj.csv");
    storage::save_csv(&points, "v", &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    assert_eq!(&row[0], "'@foo");
}

#[test]
fn figures_json_has_five_entries() {
    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let charts = build_charts(&Sources::from_dir(fixtures)).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("figures.json");
    storage::save_figures_json(&charts, &path, true).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let figs = v.as_array().unwrap();
    assert_eq!(figs.len(), 5);
    assert_eq!(figs[0]["data"].as_array().unwrap().len(), 6);
    assert_eq!(figs[2]["data"][0]["type"], "bar");
    assert_eq!(figs[4]["layout"]["yaxis"]["title"], "F.D.I.");
}
