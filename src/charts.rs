//! Chart assembly: one parametrized procedure for the five dashboard indicators.
//!
//! Each indicator is reshaped with the default projection and then shaped as
//! either a per-country time series (line traces) or a single-year
//! cross-section (one bar trace, tallest first).
//!
//! ### Example
//! ```no_run
//! use wdi_dashboard::{Sources, charts};
//!
//! let figures = charts::build_charts(&Sources::from_dir("data"))?;
//! assert_eq!(figures.len(), 5);
//! # Ok::<(), wdi_dashboard::WrangleError>(())
//! ```

use crate::config::{HEADER_ROWS, SNAPSHOT_YEAR, Sources, TICK_START, TICK_STEP, YEAR_ALLOW_LIST};
use crate::error::WrangleError;
use crate::models::{
    Axis, ChartDescriptor, Layout, Observation, RenderMode, Series, SeriesX, TickConfig,
};
use crate::reshape::reshape_default;
use crate::table::WideTable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The dashboard indicators, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Gdp,
    GdpPerCapita,
    Exports,
    Imports,
    Fdi,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::Gdp,
        Indicator::GdpPerCapita,
        Indicator::Exports,
        Indicator::Imports,
        Indicator::Fdi,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    /// One line per country across all snapshot years.
    TimeSeries,
    /// One bar per country for a single year, sorted by value descending.
    CrossSection { year: i32 },
}

/// Per-indicator chart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSpec {
    pub indicator: Indicator,
    /// Leading part of the chart title, e.g. "GDP per capita".
    pub title: &'static str,
    /// Column label for the value in tidy exports.
    pub metric: &'static str,
    pub y_title: &'static str,
    pub shape: ChartShape,
}

impl IndicatorSpec {
    pub fn for_indicator(indicator: Indicator) -> Self {
        let (title, metric, y_title, shape) = match indicator {
            Indicator::Gdp => ("GDP", "GDP_in_USD", "GDP", ChartShape::TimeSeries),
            Indicator::GdpPerCapita => (
                "GDP per capita",
                "GDP_per_capita",
                "GDP per capita",
                ChartShape::TimeSeries,
            ),
            Indicator::Exports => (
                "Exports of goods and services",
                "EXP",
                "EXP",
                ChartShape::CrossSection { year: SNAPSHOT_YEAR },
            ),
            Indicator::Imports => (
                "Imports of goods and services",
                "IMP",
                "IMP",
                ChartShape::CrossSection { year: SNAPSHOT_YEAR },
            ),
            Indicator::Fdi => (
                "Foreign direct investment",
                "FDI",
                "F.D.I.",
                ChartShape::TimeSeries,
            ),
        };
        Self {
            indicator,
            title,
            metric,
            y_title,
            shape,
        }
    }

    fn layout(&self) -> Layout {
        match self.shape {
            ChartShape::TimeSeries => {
                let first = YEAR_ALLOW_LIST.first().copied().unwrap_or_default();
                let last = YEAR_ALLOW_LIST.last().copied().unwrap_or_default();
                Layout {
                    title: format!("{} - {} to {} (USD)", self.title, first, last),
                    x_axis: Axis {
                        title: "Year".into(),
                        ticks: Some(TickConfig {
                            auto: false,
                            start: TICK_START,
                            step: TICK_STEP,
                        }),
                    },
                    y_axis: Axis::titled(self.y_title),
                }
            }
            ChartShape::CrossSection { year } => Layout {
                title: format!("{} in {} (USD)", self.title, year),
                x_axis: Axis::titled("Country"),
                y_axis: Axis::titled(self.y_title),
            },
        }
    }
}

/// Descending by value, missing values last. Stable for ties.
fn by_value_desc(a: &Observation, b: &Observation) -> Ordering {
    match (a.value, b.value) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn time_series(mut obs: Vec<Observation>) -> Vec<Series> {
    obs.sort_by_key(|o| o.year);

    // Countries in first-seen order.
    let mut countries: Vec<String> = Vec::new();
    for o in &obs {
        if !countries.contains(&o.country) {
            countries.push(o.country.clone());
        }
    }

    countries
        .into_iter()
        .map(|country| {
            let (x, y): (Vec<i32>, Vec<Option<f64>>) = obs
                .iter()
                .filter(|o| o.country == country)
                .map(|o| (o.year, o.value))
                .unzip();
            Series {
                name: Some(country),
                x: SeriesX::Years(x),
                y,
                mode: RenderMode::Line,
            }
        })
        .collect()
}

fn cross_section(mut obs: Vec<Observation>, year: i32) -> Vec<Series> {
    obs.sort_by(by_value_desc);
    let (x, y): (Vec<String>, Vec<Option<f64>>) = obs
        .into_iter()
        .filter(|o| o.year == year)
        .map(|o| (o.country, o.value))
        .unzip();
    if x.is_empty() {
        return Vec::new();
    }
    vec![Series {
        name: None,
        x: SeriesX::Categories(x),
        y,
        mode: RenderMode::Bar,
    }]
}

/// Group reshaped observations into series and attach the indicator's layout.
pub fn assemble_chart(spec: &IndicatorSpec, observations: Vec<Observation>) -> ChartDescriptor {
    let series = match spec.shape {
        ChartShape::TimeSeries => time_series(observations),
        ChartShape::CrossSection { year } => cross_section(observations, year),
    };
    if series.is_empty() {
        log::warn!("{:?}: no data for the allow-listed countries", spec.indicator);
    }
    ChartDescriptor {
        series,
        layout: spec.layout(),
    }
}

/// Reshape one table and assemble its chart.
pub fn build_chart(
    spec: &IndicatorSpec,
    table: &WideTable,
) -> Result<ChartDescriptor, WrangleError> {
    let observations = reshape_default(table)?;
    log::debug!(
        "{:?}: {} observations as {}",
        spec.indicator,
        observations.len(),
        spec.metric
    );
    Ok(assemble_chart(spec, observations))
}

/// Build all five charts, loading each indicator's table through `load`.
///
/// Output order is always [`Indicator::ALL`]. The first load or reshape error
/// aborts the batch.
pub fn build_charts_with<F>(mut load: F) -> Result<Vec<ChartDescriptor>, WrangleError>
where
    F: FnMut(Indicator) -> Result<WideTable, WrangleError>,
{
    Indicator::ALL
        .iter()
        .map(|&indicator| {
            let table = load(indicator)?;
            build_chart(&IndicatorSpec::for_indicator(indicator), &table)
        })
        .collect()
}

/// Build all five charts from World Bank CSV exports on disk.
pub fn build_charts(sources: &Sources) -> Result<Vec<ChartDescriptor>, WrangleError> {
    build_charts_with(|indicator| WideTable::from_path(sources.path(indicator), HEADER_ROWS))
}
