use plotters_dioxus::Rgb;
use std::path::{Path, PathBuf};

use crate::error::{AtlasError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self {
            min_lon: -180.0,
            max_lon: 180.0,
            min_lat: -90.0,
            max_lat: 90.0,
        }
    }
}

/// Elevation limits of the two colour ramps and their endpoint colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDomain {
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub light_red: Rgb,
    pub dark_red: Rgb,
    pub light_blue: Rgb,
    pub dark_blue: Rgb,
}

impl Default for ColorDomain {
    fn default() -> Self {
        Self {
            min_elevation: -6000.0,
            max_elevation: 7000.0,
            light_red: Rgb::new(255, 160, 122),
            dark_red: Rgb::new(139, 0, 0),
            light_blue: Rgb::new(173, 216, 230),
            dark_blue: Rgb::new(0, 31, 63),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// width / height of the map image
    pub aspect_ratio: f64,
    /// Share of the window width the map tries to occupy.
    pub width_fraction: f64,
    pub outer_margin: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 2.0,
            width_fraction: 0.66,
            outer_margin: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub diameter: f64,
    /// Hit radius around a point centre, independent of `diameter`.
    pub pick_radius: f64,
    pub highlight: Rgb,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            diameter: 6.0,
            pick_radius: 3.0,
            highlight: Rgb::new(255, 255, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    pub padding: f64,
    pub line_height: f64,
    pub corner_radius: f64,
    pub font_size: f64,
    /// Extra width reserved for bold lines.
    pub bold_extra_width: f64,
    /// Horizontal gap between the anchor and the panel.
    pub anchor_offset: f64,
    pub edge_margin: f64,
    pub background: Rgb,
    pub text: Rgb,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            padding: 10.0,
            line_height: 18.0,
            corner_radius: 5.0,
            font_size: 12.0,
            bold_extra_width: 10.0,
            anchor_offset: PointStyle::default().diameter / 2.0 + 5.0,
            edge_margin: 5.0,
            background: Rgb::new(255, 255, 100),
            text: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendStyle {
    pub width: u32,
    pub strip_height: f64,
    pub tick_length: f64,
    pub font_size: f64,
    /// Inset from the lower-left corner of the viewport.
    pub inset: f64,
    pub text: Rgb,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            width: 240,
            strip_height: 12.0,
            tick_length: 4.0,
            font_size: 11.0,
            inset: 14.0,
            text: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtlasConfig {
    pub title: String,
    pub title_font_size: f64,
    pub title_color: Rgb,
    /// Gap between the bottom of the title and the top of the map.
    pub title_gap: f64,
    /// Smallest distance of the title from the top of the surface.
    pub title_min_y: f64,
    pub background: Rgb,
    pub bounds: GeoBounds,
    pub colors: ColorDomain,
    pub viewport: ViewportConfig,
    pub points: PointStyle,
    pub tooltip: TooltipStyle,
    pub legend: LegendStyle,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            title: "Volcanoes of the World".to_string(),
            title_font_size: 20.0,
            title_color: Rgb::new(60, 40, 20),
            title_gap: 12.0,
            title_min_y: 8.0,
            background: Rgb::new(210, 180, 140),
            bounds: GeoBounds::default(),
            colors: ColorDomain::default(),
            viewport: ViewportConfig::default(),
            points: PointStyle::default(),
            tooltip: TooltipStyle::default(),
            legend: LegendStyle::default(),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AtlasError::InvalidSetting {
            name,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AtlasError::InvalidSetting {
            name,
            reason: format!("must be zero or more, got {value}"),
        })
    }
}

impl AtlasConfig {
    /// Startup check; a config that passes can never hit a degenerate mapping at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.bounds.min_lon == self.bounds.max_lon {
            return Err(AtlasError::DegenerateDomain {
                axis: "longitude",
                value: self.bounds.min_lon,
            });
        }
        if self.bounds.min_lat == self.bounds.max_lat {
            return Err(AtlasError::DegenerateDomain {
                axis: "latitude",
                value: self.bounds.min_lat,
            });
        }
        let c = &self.colors;
        if !(c.min_elevation < 0.0 && c.max_elevation > 0.0) {
            return Err(AtlasError::InvalidColorDomain {
                min: c.min_elevation,
                max: c.max_elevation,
            });
        }
        positive("viewport.aspect_ratio", self.viewport.aspect_ratio)?;
        positive("viewport.width_fraction", self.viewport.width_fraction)?;
        if self.viewport.width_fraction > 1.0 {
            return Err(AtlasError::InvalidSetting {
                name: "viewport.width_fraction",
                reason: format!("must not exceed 1, got {}", self.viewport.width_fraction),
            });
        }
        non_negative("viewport.outer_margin", self.viewport.outer_margin)?;
        non_negative("title_gap", self.title_gap)?;
        non_negative("title_min_y", self.title_min_y)?;
        positive("points.diameter", self.points.diameter)?;
        non_negative("points.pick_radius", self.points.pick_radius)?;
        positive("tooltip.line_height", self.tooltip.line_height)?;
        positive("tooltip.font_size", self.tooltip.font_size)?;
        non_negative("tooltip.padding", self.tooltip.padding)?;
        non_negative("tooltip.edge_margin", self.tooltip.edge_margin)?;
        if self.legend.width < 2 {
            return Err(AtlasError::InvalidSetting {
                name: "legend.width",
                reason: "needs at least one column per ramp".to_string(),
            });
        }
        Ok(())
    }
}

/// Where the record CSV and the map image live.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub records: PathBuf,
    pub map_image: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            records: PathBuf::from("assets/volcanoes.csv"),
            map_image: PathBuf::from("assets/world_map_dark_gray.png"),
        }
    }
}

impl DataPaths {
    /// Parses a paths file: first non-empty line is the CSV, second the map image.
    /// Missing lines keep their defaults.
    pub fn parse(content: &str) -> Self {
        let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
        let defaults = Self::default();
        Self {
            records: lines.next().map(PathBuf::from).unwrap_or(defaults.records),
            map_image: lines.next().map(PathBuf::from).unwrap_or(defaults.map_image),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::info!("no paths file at {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
