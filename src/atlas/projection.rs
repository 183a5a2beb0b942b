use crate::atlas::record::PointRecord;
use crate::config::{GeoBounds, ViewportConfig};
use crate::error::{AtlasError, Result};

/// On-screen rectangle of the map for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Pixel size used when stretching the map image, at least 0.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

fn remap(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (v - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Unclamped linear mapping of `v` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn linear_map(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    if in_min == in_max {
        return Err(AtlasError::DegenerateDomain {
            axis: "input",
            value: in_min,
        });
    }
    Ok(remap(v, in_min, in_max, out_min, out_max))
}

/// Largest rectangle with the configured aspect ratio that fits the window, the outer
/// margin and the width fraction, centred in the window.
pub fn layout_viewport(window_width: f64, window_height: f64, config: &ViewportConfig) -> Viewport {
    let window_width = window_width.max(0.0);
    let window_height = window_height.max(0.0);
    let available_w = (window_width - 2.0 * config.outer_margin).max(0.0);
    let available_h = (window_height - 2.0 * config.outer_margin).max(0.0);

    let width = (window_width * config.width_fraction)
        .min(available_w)
        .min(available_h * config.aspect_ratio);
    let height = width / config.aspect_ratio;

    Viewport {
        x: (window_width - width) / 2.0,
        y: (window_height - height) / 2.0,
        width,
        height,
    }
}

/// Equirectangular projection onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    bounds: GeoBounds,
}

impl Projector {
    pub fn new(bounds: GeoBounds) -> Result<Self> {
        linear_map(0.0, bounds.min_lon, bounds.max_lon, 0.0, 1.0).map_err(|_| {
            AtlasError::DegenerateDomain {
                axis: "longitude",
                value: bounds.min_lon,
            }
        })?;
        linear_map(0.0, bounds.min_lat, bounds.max_lat, 0.0, 1.0).map_err(|_| {
            AtlasError::DegenerateDomain {
                axis: "latitude",
                value: bounds.min_lat,
            }
        })?;
        Ok(Self { bounds })
    }

    pub fn project(&self, lat: f64, lon: f64, viewport: &Viewport) -> (f64, f64) {
        let b = &self.bounds;
        let x = remap(lon, b.min_lon, b.max_lon, viewport.x, viewport.right());
        // pixel y grows downwards, latitude grows upwards
        let y = remap(lat, b.min_lat, b.max_lat, viewport.bottom(), viewport.y);
        (x, y)
    }

    pub fn project_record(&self, record: &PointRecord, viewport: &Viewport) -> Option<(f64, f64)> {
        if !record.latitude.is_finite() || !record.longitude.is_finite() {
            return None;
        }
        Some(self.project(record.latitude, record.longitude, viewport))
    }
}
