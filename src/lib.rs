pub mod atlas;
pub mod config;
pub mod error;
pub mod file_load;

pub use config::{AtlasConfig, DataPaths};
pub use error::{AtlasError, Result};
