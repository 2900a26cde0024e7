//! Fixed schema constants and per-indicator source configuration.

use crate::charts::Indicator;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Identifier column of a World Bank wide-format export.
pub const COUNTRY_COLUMN: &str = "Country Name";

/// Economies compared by every chart (BRICS + USA). Matching is exact.
pub const COUNTRY_ALLOW_LIST: &[&str] = &[
    "United States",
    "China",
    "India",
    "Brazil",
    "Russian Federation",
    "South Africa",
];

/// Snapshot years retained when reshaping, oldest first.
pub const YEAR_ALLOW_LIST: &[&str] = &["1990", "2000", "2010", "2019"];

/// Leading metadata lines ("Data Source", "Last Updated Date", blanks) before the header.
pub const HEADER_ROWS: usize = 4;

/// Year used for cross-sectional (bar) charts.
pub const SNAPSHOT_YEAR: i32 = 2019;

/// First tick and tick interval on time-series x axes.
pub const TICK_START: i32 = 1990;
pub const TICK_STEP: i32 = 10;

/// One dataset path per indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    pub gdp: PathBuf,
    pub gdp_per_capita: PathBuf,
    pub exports: PathBuf,
    pub imports: PathBuf,
    pub fdi: PathBuf,
}

impl Sources {
    /// Default World Bank export file names, resolved under `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            gdp: dir.join("API_NY.GDP.MKTP.CD_DS2_en_csv_v2_1926685.csv"),
            gdp_per_capita: dir.join("API_NY.GDP.PCAP.CD_DS2_en_csv_v2_1926744.csv"),
            exports: dir.join("API_NE.EXP.GNFS.CD_DS2_en_csv_v2_1928255.csv"),
            imports: dir.join("API_NE.IMP.GNFS.CD_DS2_en_csv_v2_1926771.csv"),
            fdi: dir.join("API_BX.KLT.DINV.CD.WD_DS2_en_csv_v2_1927091.csv"),
        }
    }

    /// Load sources from a JSON document such as
    /// `{"gdp": "gdp.csv", "gdp_per_capita": "...", "exports": "...", "imports": "...", "fdi": "..."}`.
    ///
    /// Relative paths are resolved against the directory holding the JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read sources file {}", path.display()))?;
        let sources: Sources = serde_json::from_str(&text)
            .with_context(|| format!("parse sources file {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(sources.resolved_against(base))
    }

    fn resolved_against(self, base: &Path) -> Self {
        let fix = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            gdp: fix(self.gdp),
            gdp_per_capita: fix(self.gdp_per_capita),
            exports: fix(self.exports),
            imports: fix(self.imports),
            fdi: fix(self.fdi),
        }
    }

    pub fn path(&self, indicator: Indicator) -> &Path {
        match indicator {
            Indicator::Gdp => &self.gdp,
            Indicator::GdpPerCapita => &self.gdp_per_capita,
            Indicator::Exports => &self.exports,
            Indicator::Imports => &self.imports,
            Indicator::Fdi => &self.fdi,
        }
    }
}
