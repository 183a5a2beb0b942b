use plotters_dioxus::{Font, TextMeasure};

use crate::atlas::record::PointRecord;
use crate::config::TooltipStyle;

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipLine {
    /// Bold line rendered on its own, e.g. the volcano name.
    Title(String),
    /// Label followed directly by its value.
    Field { label: String, value: String },
}

impl TooltipLine {
    pub fn field(label: &str, value: impl Into<String>) -> Self {
        TooltipLine::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    pub panel: PanelRect,
    pub runs: Vec<TextRun>,
}

pub fn tooltip_lines(record: &PointRecord) -> Vec<TooltipLine> {
    vec![
        TooltipLine::Title(record.name.clone()),
        TooltipLine::field("Country: ", record.country.as_str()),
        TooltipLine::field("", record.elevation_label()),
        TooltipLine::field("Type: ", record.volcano_type.as_str()),
        TooltipLine::field("Type category: ", record.type_category.as_str()),
        TooltipLine::field("Status: ", record.status.as_str()),
        TooltipLine::field("Last known eruption: ", record.last_eruption.as_str()),
    ]
}

fn line_width(line: &TooltipLine, style: &TooltipStyle, measure: &impl TextMeasure) -> f64 {
    match line {
        TooltipLine::Title(text) => {
            measure.text_width(text, Font::bold(style.font_size)) + style.bold_extra_width
        }
        TooltipLine::Field { label, value } => {
            measure.text_width(&format!("{label}{value}"), Font::normal(style.font_size))
        }
    }
}

/// Pulls a panel that fits the surface back inside it. Oversized panels are left alone.
fn contain(pos: f64, size: f64, extent: f64) -> f64 {
    if size <= extent && pos + size > extent {
        (extent - size).max(0.0)
    } else {
        pos
    }
}

fn place_horizontally(anchor_x: f64, width: f64, surface_width: f64, style: &TooltipStyle) -> f64 {
    let mut x = anchor_x + style.anchor_offset;
    if x + width > surface_width {
        x = anchor_x - style.anchor_offset - width;
    }
    if x < 0.0 {
        x = style.edge_margin;
    }
    contain(x, width, surface_width)
}

fn place_vertically(anchor_y: f64, height: f64, surface_height: f64, style: &TooltipStyle) -> f64 {
    let mut y = anchor_y - height / 2.0;
    if y + height > surface_height {
        y = surface_height - height - style.edge_margin;
    }
    if y < 0.0 {
        y = style.edge_margin;
    }
    contain(y, height, surface_height)
}

/// Sizes the panel for `lines` and places it beside `anchor`, flipping and clamping
/// so it stays on a `surface` of the given (width, height).
pub fn layout_tooltip(
    anchor: (f64, f64),
    lines: &[TooltipLine],
    surface: (f64, f64),
    style: &TooltipStyle,
    measure: &impl TextMeasure,
) -> TooltipLayout {
    let content_width = lines
        .iter()
        .map(|line| line_width(line, style, measure))
        .fold(0.0, f64::max);
    let width = content_width + 2.0 * style.padding;
    let height = lines.len() as f64 * style.line_height + 2.0 * style.padding;

    let panel = PanelRect {
        x: place_horizontally(anchor.0, width, surface.0, style),
        y: place_vertically(anchor.1, height, surface.1, style),
        width,
        height,
    };

    let text_x = panel.x + style.padding;
    let mut runs = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        let y = panel.y + style.padding + i as f64 * style.line_height;
        match line {
            TooltipLine::Title(text) => runs.push(TextRun {
                text: text.clone(),
                x: text_x,
                y,
                font: Font::bold(style.font_size),
            }),
            TooltipLine::Field { label, value } => {
                let font = Font::normal(style.font_size);
                if !label.is_empty() {
                    runs.push(TextRun {
                        text: label.clone(),
                        x: text_x,
                        y,
                        font,
                    });
                }
                runs.push(TextRun {
                    text: value.clone(),
                    x: text_x + measure.text_width(label, font),
                    y,
                    font,
                });
            }
        }
    }

    TooltipLayout { panel, runs }
}
