use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or reshaping an indicator dataset.
///
/// Every variant is fatal for the dataset it concerns; `charts::build_charts`
/// surfaces the first one unmodified and produces no partial batch.
#[derive(Debug, Error)]
pub enum WrangleError {
    /// A requested column is not present in the dataset header.
    #[error("missing column: {0:?}")]
    MissingColumn(String),

    /// A year-column label does not parse to a calendar year.
    #[error("unparseable year label: {0:?}")]
    UnparseableYear(String),

    /// A non-empty cell that is not a number.
    #[error("invalid value {value:?} for {country:?} in column {column:?}")]
    InvalidValue {
        country: String,
        column: String,
        value: String,
    },

    /// The same allow-listed country appears on more than one row.
    #[error("duplicate country identifier: {0:?}")]
    DuplicateCountry(String),

    /// The source ended before a header row could be read.
    #[error("dataset has no header row after skipping {0} line(s)")]
    MissingHeader(usize),

    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
