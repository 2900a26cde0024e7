use serde::{Deserialize, Serialize};

/// Tidy structure used by this crate (one row = one observation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    /// `None` when the source cell was empty; never coerced to zero.
    pub value: Option<f64>,
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Line,
    Bar,
}

/// X coordinates of a series: calendar years for line charts, category labels for bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesX {
    Years(Vec<i32>),
    Categories(Vec<String>),
}

impl SeriesX {
    /// Number of x coordinates; always equals the series' `y.len()`.
    pub fn len(&self) -> usize {
        match self {
            SeriesX::Years(v) => v.len(),
            SeriesX::Categories(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One trace of a chart. `x` and `y` are parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label; bar series over countries carry none.
    pub name: Option<String>,
    pub x: SeriesX,
    pub y: Vec<Option<f64>>,
    pub mode: RenderMode,
}

/// Manual tick placement, passed through untouched to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    pub auto: bool,
    pub start: i32,
    pub step: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub ticks: Option<TickConfig>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ticks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

/// Series plus layout for one chart; built once and handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub series: Vec<Series>,
    pub layout: Layout,
}
