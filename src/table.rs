//! Wide-format dataset loading: one row per country, one column per year.
//!
//! World Bank CSV exports open with a few metadata lines before the real
//! header, and every line ends with a trailing comma (an extra, unnamed column).
//! Both are tolerated here so the reshaper only ever sees a header plus rows.

use crate::error::WrangleError;
use crate::reshape::parse_year;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// One raw row of the wide input. Cells are kept as text; an empty cell means missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    cells: Vec<String>,
}

impl RawRecord {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Cell at `idx`, `None` when the row is shorter than the header.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).map(String::as_str)
    }
}

impl From<&StringRecord> for RawRecord {
    fn from(rec: &StringRecord) -> Self {
        Self::new(rec.iter())
    }
}

/// A header plus rows, as read from a wide-format export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WideTable {
    columns: Vec<String>,
    rows: Vec<RawRecord>,
}

impl WideTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRecord>) -> Self {
        Self { columns, rows }
    }

    /// Read a CSV file, skipping `skip_lines` physical lines before the header.
    pub fn from_path<P: AsRef<Path>>(path: P, skip_lines: usize) -> Result<Self, WrangleError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WrangleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(BufReader::new(file), skip_lines, path)?;
        log::debug!(
            "loaded {} ({} columns, {} rows)",
            path.display(),
            table.columns.len(),
            table.rows.len()
        );
        Ok(table)
    }

    /// Same as [`WideTable::from_path`] for any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, skip_lines: usize) -> Result<Self, WrangleError> {
        Self::read(reader, skip_lines, Path::new("<reader>"))
    }

    fn read<R: BufRead>(
        mut reader: R,
        skip_lines: usize,
        origin: &Path,
    ) -> Result<Self, WrangleError> {
        let io_err = |source| WrangleError::Io {
            path: origin.to_path_buf(),
            source,
        };
        let mut line = Vec::new();
        for _ in 0..skip_lines {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(io_err)? == 0 {
                return Err(WrangleError::MissingHeader(skip_lines));
            }
        }
        Self::parse_csv(reader, skip_lines, origin.to_path_buf())
    }

    fn parse_csv<R: Read>(
        reader: R,
        skipped: usize,
        origin: PathBuf,
    ) -> Result<Self, WrangleError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let csv_err = |source| WrangleError::Csv {
            path: origin.clone(),
            source,
        };

        let mut records = rdr.records();
        let header = match records.next() {
            Some(rec) => rec.map_err(csv_err)?,
            None => return Err(WrangleError::MissingHeader(skipped)),
        };
        let columns: Vec<String> = header.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for rec in records {
            let rec = rec.map_err(csv_err)?;
            rows.push(RawRecord::from(&rec));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    /// Position of a named column (exact match on the header label).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Header labels that are calendar years, in header order.
    pub fn year_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| parse_year(c).is_ok())
            .collect()
    }
}
