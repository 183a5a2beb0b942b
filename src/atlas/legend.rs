use plotters_dioxus::{Font, Rgb, TextMeasure};

use crate::atlas::color_ramp::ColorRamp;
use crate::atlas::projection::Viewport;
use crate::config::LegendStyle;

/// One pixel column of the gradient strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSlice {
    pub x: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    /// Position of the tick mark.
    pub x: f64,
    pub label: String,
    /// Left edge of the label text.
    pub label_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub strip_height: f64,
    pub tick_bottom: f64,
    pub label_y: f64,
    pub slices: Vec<LegendSlice>,
    pub ticks: Vec<LegendTick>,
}

/// Elevations sampled by each column: the left half walks the negative ramp from the
/// domain minimum towards (not onto) 0, the right half walks 0..=max.
pub fn legend_elevations(ramp: &ColorRamp, width: u32) -> Vec<f64> {
    let left = width / 2;
    let right = width - left;
    let min = ramp.min_elevation();
    let max = ramp.max_elevation();

    let below = (0..left).map(|i| min * (1.0 - i as f64 / left as f64));
    let above = (0..right).map(|j| {
        if right == 1 {
            0.0
        } else {
            max * j as f64 / (right - 1) as f64
        }
    });
    below.chain(above).collect()
}

fn elevation_label(value: f64) -> String {
    format!("{value}m")
}

pub fn layout_legend(
    ramp: &ColorRamp,
    viewport: &Viewport,
    style: &LegendStyle,
    measure: &impl TextMeasure,
) -> LegendLayout {
    let font = Font::normal(style.font_size);
    let width = style.width as f64;
    let block_height = style.strip_height + style.tick_length + 2.0 + style.font_size;
    let x = viewport.x + style.inset;
    let y = viewport.bottom() - style.inset - block_height;

    let slices = legend_elevations(ramp, style.width)
        .into_iter()
        .enumerate()
        .filter_map(|(i, e)| {
            ramp.color_for(e).map(|color| LegendSlice {
                x: x + i as f64,
                color,
            })
        })
        .collect();

    let mid = x + (style.width / 2) as f64;
    let end = x + width - 1.0;
    let ticks = [
        (x, ramp.min_elevation(), 0.0),
        (mid, 0.0, 0.5),
        (end, ramp.max_elevation(), 1.0),
    ]
    .into_iter()
    .map(|(tick_x, value, align)| {
        let label = elevation_label(value);
        let label_x = tick_x - measure.text_width(&label, font) * align;
        LegendTick {
            x: tick_x,
            label,
            label_x,
        }
    })
    .collect();

    LegendLayout {
        x,
        y,
        width,
        strip_height: style.strip_height,
        tick_bottom: y + style.strip_height + style.tick_length,
        label_y: y + style.strip_height + style.tick_length + 2.0,
        slices,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorDomain;
    use plotters_dioxus::EstimatedMetrics;
    use pretty_assertions::assert_eq;

    fn ramp() -> ColorRamp {
        ColorRamp::new(&ColorDomain::default()).expect("valid domain")
    }

    fn viewport() -> Viewport {
        Viewport { x: 100.0, y: 50.0, width: 800.0, height: 400.0 }
    }

    #[test]
    fn halves_sample_their_own_ramp() {
        let samples = legend_elevations(&ramp(), 240);
        assert_eq!(samples.len(), 240);
        assert_eq!(samples[0], -6000.0);
        assert!(samples[..120].iter().all(|&e| e < 0.0));
        assert_eq!(samples[120], 0.0);
        assert_eq!(samples[239], 7000.0);
        assert!(samples.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn odd_width_gives_the_extra_column_to_the_positive_half() {
        let samples = legend_elevations(&ramp(), 5);
        assert_eq!(samples, vec![-6000.0, -3000.0, 0.0, 3500.0, 7000.0]);
    }

    #[test]
    fn one_slice_per_column_with_ramp_colours() {
        let d = ColorDomain::default();
        let style = LegendStyle::default();
        let layout = layout_legend(&ramp(), &viewport(), &style, &EstimatedMetrics::default());
        assert_eq!(layout.slices.len(), style.width as usize);
        assert_eq!(layout.slices[0].color, d.dark_blue);
        assert_eq!(layout.slices[120].color, d.light_red);
        assert_eq!(layout.slices[239].color, d.dark_red);
        assert_eq!(layout.slices[239].x, layout.x + 239.0);
    }

    #[test]
    fn ticks_mark_ends_and_midpoint() {
        let style = LegendStyle::default();
        let m = EstimatedMetrics::default();
        let layout = layout_legend(&ramp(), &viewport(), &style, &m);
        let labels: Vec<&str> = layout.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["-6000m", "0m", "7000m"]);
        assert_eq!(layout.ticks[0].x, layout.x);
        assert_eq!(layout.ticks[1].x, layout.x + 120.0);
        assert_eq!(layout.ticks[2].x, layout.x + 239.0);
        assert_eq!(layout.ticks[0].label_x, layout.x);
        let end_width = m.text_width("7000m", Font::normal(style.font_size));
        assert!((layout.ticks[2].label_x + end_width - layout.ticks[2].x).abs() < 1e-9);
    }

    #[test]
    fn legend_sits_inside_the_lower_left_corner() {
        let style = LegendStyle::default();
        let vp = viewport();
        let layout = layout_legend(&ramp(), &vp, &style, &EstimatedMetrics::default());
        assert_eq!(layout.x, vp.x + style.inset);
        assert!(layout.y > vp.y);
        assert!(layout.label_y + style.font_size <= vp.bottom() - style.inset + 1e-9);
    }

    #[test]
    fn legend_ignores_live_data() {
        let style = LegendStyle::default();
        let m = EstimatedMetrics::default();
        let a = layout_legend(&ramp(), &viewport(), &style, &m);
        let b = layout_legend(&ramp(), &viewport(), &style, &m);
        assert_eq!(a, b);
    }
}
