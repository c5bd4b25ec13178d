use thiserror::Error;

/// Shape violations caught when building a [`Grid`](crate::grid::Grid).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,

    #[error("row {0} has no cells")]
    EmptyRow(usize),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell buffer has {found} values, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Errors raised while reading matrix text (files or matrix strings).
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("multi-digit value {value} at row {row}, column {col}")]
    MultiDigit { row: usize, col: usize, value: i64 },

    #[error("value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange { value: i64, min: i32, max: i32 },

    #[error("invalid character {ch:?} at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },

    #[error("matrix string is empty")]
    EmptyString,

    #[error("invalid matrix token: {0}")]
    InvalidToken(String),

    #[error("no matrix files found in {0}")]
    EmptyDir(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or validating an analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Toml(String),

    #[error("invalid value range [{min}, {max}]")]
    InvalidRange { min: i32, max: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by the rendering adapter while writing region output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("region has no cells to crop")]
    EmptyRegion,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
