use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the recovery times or drawing the chart
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("could not read csv file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read csv line: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv file has no header line")]
    EmptyHeader,

    #[error("csv header is missing the required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("invalid value '{value}' for column '{column}' on line {line}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("csv file has a header but no data rows, nothing to plot")]
    EmptyDataset,

    #[error("could not draw the chart: {0}")]
    Drawing(String),

    #[error("could not write png file {}: {}", .path.display(), .message)]
    Write { path: PathBuf, message: String },
}

impl PlotError {
    /// true for the errors raised before anything is drawn
    pub fn is_load_error(&self) -> bool {
        !matches!(self, PlotError::Drawing(_) | PlotError::Write { .. })
    }
}
