pub mod canvas;
pub mod colormap;
pub mod error;
pub mod plotter;

pub use canvas::{
    BitmapCanvas, Canvas, DioxusDrawingArea, EstimatedMetrics, Font, FontWeight, TextMeasure,
    render_png_data_uri, stretch_to,
};
pub use colormap::{Gradient, Rgb};
pub use error::RenderError;
pub use plotter::PlotImage;
