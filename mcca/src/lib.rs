pub mod config;
pub mod error;
pub mod geometry;
pub mod graphviz;
pub mod grid;
pub mod matfile;
pub mod naming;
pub mod palette;
pub mod region;
pub mod render;

pub use config::AnalysisConfig;
pub use error::{ConfigError, GridError, MatrixError, RenderError};
pub use grid::Grid;
pub use region::{analyze, Algorithm, Analysis, MaxRegion, RegionFinder};
