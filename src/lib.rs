//! wdi_dashboard
//!
//! Turns World Bank wide-format indicator exports (one column per year) into
//! tidy `(country, year, value)` observations and chart-ready descriptors for a
//! five-chart economy dashboard (BRICS + USA).
//!
//! ### Features
//! - Skip the export's metadata lines and read the wide table
//! - Filter to a fixed country allow-list and melt snapshot years into rows
//! - Assemble line (time-series) and bar (cross-section) chart descriptors
//! - Export Plotly figure JSON, tidy CSV/JSON, and per-country summaries
//!
//! ### Example
//! ```no_run
//! use wdi_dashboard::{Sources, charts, plotly};
//!
//! let figures = charts::build_charts(&Sources::from_dir("data"))?;
//! println!("{}", plotly::figures_json(&figures));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charts;
pub mod config;
pub mod error;
pub mod models;
pub mod plotly;
pub mod reshape;
pub mod stats;
pub mod storage;
pub mod table;

pub use charts::{ChartShape, Indicator, IndicatorSpec, build_charts};
pub use config::Sources;
pub use error::WrangleError;
pub use models::{ChartDescriptor, Observation, RenderMode, Series, SeriesX};
pub use reshape::{reshape, reshape_default};
pub use table::{RawRecord, WideTable};
