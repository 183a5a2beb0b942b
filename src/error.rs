use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("degenerate {axis} domain: min and max are both {value}")]
    DegenerateDomain { axis: &'static str, value: f64 },
    #[error("colour domain must satisfy min < 0 < max, got [{min}, {max}]")]
    InvalidColorDomain { min: f64, max: f64 },
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("column {0:?} not found in record source")]
    MissingColumn(String),
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
