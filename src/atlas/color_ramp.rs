use plotters_dioxus::{Gradient, Rgb};

use crate::config::ColorDomain;
use crate::error::{AtlasError, Result};

/// Diverging elevation ramp: blues below sea level, reds above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    min_elevation: f64,
    max_elevation: f64,
    below: Gradient,
    above: Gradient,
}

impl ColorRamp {
    pub fn new(domain: &ColorDomain) -> Result<Self> {
        if !(domain.min_elevation < 0.0 && domain.max_elevation > 0.0) {
            return Err(AtlasError::InvalidColorDomain {
                min: domain.min_elevation,
                max: domain.max_elevation,
            });
        }
        Ok(Self {
            min_elevation: domain.min_elevation,
            max_elevation: domain.max_elevation,
            below: Gradient::new(domain.dark_blue, domain.light_blue),
            above: Gradient::new(domain.light_red, domain.dark_red),
        })
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    /// Colour for `elevation`, saturating outside the domain. `None` only for NaN.
    pub fn color_for(&self, elevation: f64) -> Option<Rgb> {
        if elevation.is_nan() {
            return None;
        }
        let color = if elevation >= 0.0 {
            let ratio = (elevation / self.max_elevation).clamp(0.0, 1.0);
            self.above.at(ratio)
        } else {
            let ratio = ((elevation - self.min_elevation) / -self.min_elevation).clamp(0.0, 1.0);
            self.below.at(ratio)
        };
        Some(color)
    }
}
