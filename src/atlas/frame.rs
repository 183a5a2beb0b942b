use image::RgbImage;
use plotters_dioxus::{Canvas, Font, RenderError, Rgb, TextMeasure, stretch_to};
use std::borrow::Cow;

use crate::atlas::color_ramp::ColorRamp;
use crate::atlas::hit_test::{Hover, find_hover};
use crate::atlas::legend::{LegendLayout, layout_legend};
use crate::atlas::projection::{Projector, Viewport, layout_viewport};
use crate::atlas::record::PointRecord;
use crate::atlas::tooltip::{TooltipLayout, layout_tooltip, tooltip_lines};
use crate::config::AtlasConfig;
use crate::error::Result;

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Drawing surface (width, height) in pixels.
    pub surface: (f64, f64),
    pub mouse: Option<(f64, f64)>,
    pub records: &'a [PointRecord],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Index of the record in load order.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

/// Result of the pure half of a frame pass. Holds no state beyond this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan<'a> {
    pub surface: (f64, f64),
    pub viewport: Viewport,
    pub dots: Vec<Dot>,
    pub hover: Option<Hover<'a>>,
    pub tooltip: Option<TooltipLayout>,
    pub title: TitleLayout,
    pub legend: LegendLayout,
}

pub struct FrameCompositor {
    config: AtlasConfig,
    projector: Projector,
    ramp: ColorRamp,
}

impl FrameCompositor {
    pub fn new(config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        let projector = Projector::new(config.bounds)?;
        let ramp = ColorRamp::new(&config.colors)?;
        Ok(Self {
            config,
            projector,
            ramp,
        })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn viewport(&self, surface: (f64, f64)) -> Viewport {
        layout_viewport(surface.0, surface.1, &self.config.viewport)
    }

    fn dots(&self, records: &[PointRecord], viewport: &Viewport) -> Vec<Dot> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_plottable())
            .filter_map(|(index, record)| {
                let (x, y) = self.projector.project_record(record, viewport)?;
                let color = self.ramp.color_for(record.elevation)?;
                Some(Dot {
                    index,
                    x,
                    y,
                    color,
                    hovered: false,
                })
            })
            .collect()
    }

    fn title(&self, surface: (f64, f64), viewport: &Viewport, measure: &impl TextMeasure) -> TitleLayout {
        let font = Font::bold(self.config.title_font_size);
        let width = measure.text_width(&self.config.title, font);
        TitleLayout {
            text: self.config.title.clone(),
            x: (surface.0 - width) / 2.0,
            y: (viewport.y - self.config.title_font_size - self.config.title_gap)
                .max(self.config.title_min_y),
            font,
        }
    }

    pub fn plan<'a>(&self, input: &FrameInput<'a>, measure: &impl TextMeasure) -> FramePlan<'a> {
        let records = input.records;
        let viewport = self.viewport(input.surface);
        let mut dots = self.dots(records, &viewport);

        let hit = input.mouse.and_then(|mouse| {
            let positions: Vec<(f64, f64)> = dots.iter().map(|d| (d.x, d.y)).collect();
            find_hover(mouse, &positions, self.config.points.pick_radius)
        });
        let hover = hit.map(|i| {
            let dot = &mut dots[i];
            dot.hovered = true;
            Hover {
                record: &records[dot.index],
                index: dot.index,
                x: dot.x,
                y: dot.y,
            }
        });

        let tooltip = hover.map(|h| {
            layout_tooltip(
                (h.x, h.y),
                &tooltip_lines(h.record),
                input.surface,
                &self.config.tooltip,
                measure,
            )
        });

        FramePlan {
            surface: input.surface,
            viewport,
            dots,
            hover,
            tooltip,
            title: self.title(input.surface, &viewport, measure),
            legend: layout_legend(&self.ramp, &viewport, &self.config.legend, measure),
        }
    }

    /// Draws `plan`. `map_image` is stretched to the viewport when its size differs.
    pub fn paint<C: Canvas>(
        &self,
        plan: &FramePlan<'_>,
        map_image: Option<&RgbImage>,
        canvas: &mut C,
    ) -> std::result::Result<(), RenderError> {
        let config = &self.config;
        canvas.fill_background(config.background)?;

        if let Some(image) = map_image {
            let (w, h) = plan.viewport.pixel_size();
            let image = if image.dimensions() == (w, h) {
                Cow::Borrowed(image)
            } else {
                Cow::Owned(stretch_to(image, w, h))
            };
            canvas.blit_image(&image, plan.viewport.x, plan.viewport.y)?;
        }

        let d = config.points.diameter;
        for dot in plan.dots.iter().filter(|dot| !dot.hovered) {
            canvas.fill_ellipse(dot.x, dot.y, d, d, dot.color)?;
        }
        // hovered dot last so neighbours never cover it
        if let Some(dot) = plan.dots.iter().find(|dot| dot.hovered) {
            canvas.fill_ellipse(dot.x, dot.y, d, d, config.points.highlight)?;
        }

        if let Some(tooltip) = &plan.tooltip {
            self.paint_tooltip(tooltip, canvas)?;
        }

        self.paint_title(&plan.title, canvas)?;
        self.paint_legend(&plan.legend, canvas)
    }

    fn paint_title<C: Canvas>(&self, title: &TitleLayout, canvas: &mut C) -> std::result::Result<(), RenderError> {
        canvas.draw_text(&title.text, title.x, title.y, title.font, self.config.title_color)
    }

    fn paint_legend<C: Canvas>(&self, legend: &LegendLayout, canvas: &mut C) -> std::result::Result<(), RenderError> {
        let style = &self.config.legend;
        let strip_bottom = legend.y + legend.strip_height - 1.0;
        for slice in &legend.slices {
            canvas.stroke_vline(slice.x, legend.y, strip_bottom, slice.color)?;
        }
        let font = Font::normal(style.font_size);
        for tick in &legend.ticks {
            canvas.stroke_vline(tick.x, legend.y, legend.tick_bottom, style.text)?;
            canvas.draw_text(&tick.label, tick.label_x, legend.label_y, font, style.text)?;
        }
        Ok(())
    }

    fn paint_tooltip<C: Canvas>(&self, tooltip: &TooltipLayout, canvas: &mut C) -> std::result::Result<(), RenderError> {
        let style = &self.config.tooltip;
        let p = &tooltip.panel;
        canvas.fill_rounded_rect(p.x, p.y, p.width, p.height, style.corner_radius, style.background)?;
        for run in &tooltip.runs {
            canvas.draw_text(&run.text, run.x, run.y, run.font, style.text)?;
        }
        Ok(())
    }
}
