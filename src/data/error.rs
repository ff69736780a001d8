use std::path::PathBuf;

use thiserror::Error;

/// The only hard failure of the data layer: the source file can't be used.
///
/// Missing columns are not errors; each computation falls back to a zero or
/// empty value instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("couldn't read data from {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl DataError {
    pub fn unavailable(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        DataError::DataUnavailable {
            path: path.into(),
            source,
        }
    }
}
