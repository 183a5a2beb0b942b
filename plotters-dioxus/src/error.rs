use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("drawing backend failed: {0}")]
    Backend(String),
    #[error("cannot render an empty surface ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("bitmap of {width}x{height} does not match its pixel buffer")]
    BitmapSize { width: u32, height: u32 },
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

pub(crate) fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}
