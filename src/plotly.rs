//! Serialize chart descriptors into Plotly figure JSON (`{"data": [...], "layout": {...}}`).
//!
//! This is the hand-off format for a web front end; nothing here renders.

use crate::models::{Axis, ChartDescriptor, RenderMode, Series};
use serde_json::{Map, Value, json};

fn trace(series: &Series) -> Value {
    let mut t = Map::new();
    match series.mode {
        RenderMode::Line => {
            t.insert("type".into(), json!("scatter"));
            t.insert("mode".into(), json!("lines"));
        }
        RenderMode::Bar => {
            t.insert("type".into(), json!("bar"));
        }
    }
    if let Some(name) = &series.name {
        t.insert("name".into(), json!(name));
    }
    t.insert("x".into(), json!(series.x));
    // Missing values become `null`, which Plotly draws as gaps.
    t.insert("y".into(), json!(series.y));
    Value::Object(t)
}

fn axis(a: &Axis) -> Value {
    let mut m = Map::new();
    m.insert("title".into(), json!(a.title));
    if let Some(t) = a.ticks {
        m.insert("autotick".into(), json!(t.auto));
        m.insert("tick0".into(), json!(t.start));
        m.insert("dtick".into(), json!(t.step));
    }
    Value::Object(m)
}

/// One Plotly figure.
pub fn figure_json(chart: &ChartDescriptor) -> Value {
    json!({
        "data": chart.series.iter().map(trace).collect::<Vec<_>>(),
        "layout": {
            "title": chart.layout.title,
            "xaxis": axis(&chart.layout.x_axis),
            "yaxis": axis(&chart.layout.y_axis),
        }
    })
}

/// All figures as a JSON array, in input order.
pub fn figures_json(charts: &[ChartDescriptor]) -> Value {
    Value::Array(charts.iter().map(figure_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layout, SeriesX, TickConfig};

    #[test]
    fn line_figure_carries_tick_settings_and_nulls() {
        let chart = ChartDescriptor {
            series: vec![Series {
                name: Some("India".into()),
                x: SeriesX::Years(vec![1990, 2000]),
                y: vec![None, Some(2.5)],
                mode: RenderMode::Line,
            }],
            layout: Layout {
                title: "GDP - 1990 to 2019 (USD)".into(),
                x_axis: Axis {
                    title: "Year".into(),
                    ticks: Some(TickConfig { auto: false, start: 1990, step: 10 }),
                },
                y_axis: Axis::titled("GDP"),
            },
        };
        let v = figure_json(&chart);
        assert_eq!(v["data"][0]["type"], "scatter");
        assert_eq!(v["data"][0]["mode"], "lines");
        assert_eq!(v["data"][0]["name"], "India");
        assert_eq!(v["data"][0]["x"], json!([1990, 2000]));
        assert_eq!(v["data"][0]["y"], json!([null, 2.5]));
        assert_eq!(v["layout"]["xaxis"]["autotick"], false);
        assert_eq!(v["layout"]["xaxis"]["tick0"], 1990);
        assert_eq!(v["layout"]["xaxis"]["dtick"], 10);
        assert!(v["layout"]["yaxis"].get("dtick").is_none());
    }

    #[test]
    fn bar_figure_has_no_name() {
        let chart = ChartDescriptor {
            series: vec![Series {
                name: None,
                x: SeriesX::Categories(vec!["China".into()]),
                y: vec![Some(1.0)],
                mode: RenderMode::Bar,
            }],
            layout: Layout {
                title: "t".into(),
                x_axis: Axis::titled("Country"),
                y_axis: Axis::titled("EXP"),
            },
        };
        let v = figure_json(&chart);
        assert_eq!(v["data"][0]["type"], "bar");
        assert!(v["data"][0].get("name").is_none());
        assert_eq!(v["data"][0]["x"], json!(["China"]));
    }
}
