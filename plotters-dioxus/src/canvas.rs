use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use std::f64::consts::TAU;
use std::io::Cursor;

use crate::colormap::Rgb;
use crate::error::{RenderError, backend_err};

pub type DioxusDrawingArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub const fn normal(size: f64) -> Self {
        Self { size, weight: FontWeight::Normal }
    }

    pub const fn bold(size: f64) -> Self {
        Self { size, weight: FontWeight::Bold }
    }
}

pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn text_width(&self, text: &str, font: Font) -> f64;
}

/// Drawing primitives a frame is made of. Coordinates are surface pixels,
/// colours are passed per call.
pub trait Canvas: TextMeasure {
    fn fill_background(&mut self, color: Rgb) -> Result<(), RenderError>;
    /// Draws `image` unscaled with its top-left corner at `(x, y)`.
    fn blit_image(&mut self, image: &RgbImage, x: f64, y: f64) -> Result<(), RenderError>;
    fn fill_ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        color: Rgb,
    ) -> Result<(), RenderError>;
    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb,
    ) -> Result<(), RenderError>;
    fn stroke_vline(&mut self, x: f64, y0: f64, y1: f64, color: Rgb) -> Result<(), RenderError>;
    /// Text anchored at its top-left corner.
    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: Font,
        color: Rgb,
    ) -> Result<(), RenderError>;
}

/// Width estimate used when no font backend is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMetrics {
    pub advance_ratio: f64,
    pub bold_ratio: f64,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.55,
            bold_ratio: 0.6,
        }
    }
}

impl TextMeasure for EstimatedMetrics {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        let ratio = match font.weight {
            FontWeight::Normal => self.advance_ratio,
            FontWeight::Bold => self.bold_ratio,
        };
        text.chars().count() as f64 * font.size * ratio
    }
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn text_style(font: Font, color: Rgb) -> TextStyle<'static> {
    let style = match font.weight {
        FontWeight::Normal => FontStyle::Normal,
        FontWeight::Bold => FontStyle::Bold,
    };
    FontDesc::new(FontFamily::SansSerif, font.size, style).color(&RGBColor::from(color))
}

pub struct BitmapCanvas<'a> {
    area: DioxusDrawingArea<'a>,
    fallback: EstimatedMetrics,
}

impl<'a> BitmapCanvas<'a> {
    pub fn new(area: DioxusDrawingArea<'a>) -> Self {
        Self {
            area,
            fallback: EstimatedMetrics::default(),
        }
    }

    pub fn present(&self) -> Result<(), RenderError> {
        self.area.present().map_err(backend_err)
    }
}

impl TextMeasure for BitmapCanvas<'_> {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        match self.area.estimate_text_size(text, &text_style(font, Rgb::BLACK)) {
            Ok((w, _)) => w as f64,
            Err(e) => {
                tracing::debug!("font backend cannot measure {text:?}: {e}");
                self.fallback.text_width(text, font)
            }
        }
    }
}

impl Canvas for BitmapCanvas<'_> {
    fn fill_background(&mut self, color: Rgb) -> Result<(), RenderError> {
        self.area.fill(&RGBColor::from(color)).map_err(backend_err)
    }

    fn blit_image(&mut self, image: &RgbImage, x: f64, y: f64) -> Result<(), RenderError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }
        let element: BitMapElement<'_, (i32, i32)> =
            BitMapElement::with_ref((px(x), px(y)), (width, height), image.as_raw())
                .ok_or(RenderError::BitmapSize { width, height })?;
        self.area.draw(&element).map_err(backend_err)
    }

    fn fill_ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        color: Rgb,
    ) -> Result<(), RenderError> {
        let style = RGBColor::from(color).filled();
        if (width - height).abs() < 0.5 {
            let radius = (width / 2.0).max(0.5);
            return self
                .area
                .draw(&Circle::new((px(cx), px(cy)), px(radius), style))
                .map_err(backend_err);
        }
        let (rx, ry) = (width / 2.0, height / 2.0);
        let outline: Vec<(i32, i32)> = (0..32)
            .map(|i| {
                let a = TAU * i as f64 / 32.0;
                (px(cx + rx * a.cos()), px(cy + ry * a.sin()))
            })
            .collect();
        self.area
            .draw(&Polygon::new(outline, style))
            .map_err(backend_err)
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb,
    ) -> Result<(), RenderError> {
        let style = RGBColor::from(color).filled();
        let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);
        let (x1, y1) = (x + width, y + height);

        self.area
            .draw(&Rectangle::new([(px(x), px(y + r)), (px(x1), px(y1 - r))], style))
            .map_err(backend_err)?;
        self.area
            .draw(&Rectangle::new([(px(x + r), px(y)), (px(x1 - r), px(y1))], style))
            .map_err(backend_err)?;
        if r < 0.5 {
            return Ok(());
        }
        for (cx, cy) in [(x + r, y + r), (x1 - r, y + r), (x + r, y1 - r), (x1 - r, y1 - r)] {
            self.area
                .draw(&Circle::new((px(cx), px(cy)), px(r), style))
                .map_err(backend_err)?;
        }
        Ok(())
    }

    fn stroke_vline(&mut self, x: f64, y0: f64, y1: f64, color: Rgb) -> Result<(), RenderError> {
        self.area
            .draw(&PathElement::new(
                vec![(px(x), px(y0)), (px(x), px(y1))],
                RGBColor::from(color).stroke_width(1),
            ))
            .map_err(backend_err)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: Font,
        color: Rgb,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        self.area
            .draw(&Text::new(text.to_string(), (px(x), px(y)), text_style(font, color)))
            .map_err(backend_err)
    }
}

/// Resizes `image` to exactly `width` x `height`, ignoring its aspect ratio.
pub fn stretch_to(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if width == 0 || height == 0 {
        return RgbImage::new(0, 0);
    }
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    image::imageops::resize(image, width, height, FilterType::Triangle)
}

pub fn encode_png_data_uri(rgb: &[u8], width: u32, height: u32) -> Result<String, RenderError> {
    let mut png_data = Vec::new();
    let encoder = PngEncoder::new(Cursor::new(&mut png_data));
    encoder.write_image(rgb, width, height, ExtendedColorType::Rgb8)?;

    let buffer_base64 = BASE64_STANDARD.encode(&png_data);
    Ok(format!("data:image/png;base64,{}", buffer_base64))
}

/// Runs `draw` against a fresh `width` x `height` bitmap and returns it as a PNG data URI.
pub fn render_png_data_uri<F>(width: u32, height: u32, draw: F) -> Result<String, RenderError>
where
    F: FnOnce(&mut BitmapCanvas<'_>) -> Result<(), RenderError>,
{
    if width == 0 || height == 0 {
        return Err(RenderError::EmptySurface { width, height });
    }
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let area = BitMapBackend::with_buffer(buffer.as_mut_slice(), (width, height))
            .into_drawing_area();
        let mut canvas = BitmapCanvas::new(area);
        draw(&mut canvas)?;
        canvas.present()?;
    }
    encode_png_data_uri(&buffer, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn estimated_metrics_scale_with_length_and_weight() {
        let m = EstimatedMetrics::default();
        let normal = m.text_width("Etna", Font::normal(10.0));
        let bold = m.text_width("Etna", Font::bold(10.0));
        assert!((normal - 22.0).abs() < 1e-9);
        assert!(bold > normal);
        assert_eq!(m.text_width("", Font::normal(12.0)), 0.0);
    }

    #[test]
    fn stretch_produces_requested_size() {
        let img = RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        let out = stretch_to(&img, 9, 3);
        assert_eq!(out.dimensions(), (9, 3));
        assert_eq!(stretch_to(&img, 4, 2), img);
        assert_eq!(stretch_to(&img, 0, 5).dimensions(), (0, 0));
    }

    #[test]
    fn empty_surface_is_rejected() {
        let res = render_png_data_uri(0, 10, |_| Ok(()));
        assert!(matches!(res, Err(RenderError::EmptySurface { width: 0, height: 10 })));
    }

    #[test]
    fn shapes_render_to_png_data_uri() {
        let uri = render_png_data_uri(32, 16, |canvas| {
            canvas.fill_background(Rgb::new(210, 180, 140))?;
            let map = RgbImage::from_pixel(8, 4, image::Rgb([40, 40, 40]));
            canvas.blit_image(&map, 2.0, 2.0)?;
            canvas.fill_ellipse(10.0, 8.0, 6.0, 6.0, Rgb::new(139, 0, 0))?;
            canvas.fill_ellipse(20.0, 8.0, 8.0, 4.0, Rgb::new(0, 31, 63))?;
            canvas.fill_rounded_rect(1.0, 1.0, 12.0, 8.0, 3.0, Rgb::new(255, 255, 100))?;
            canvas.stroke_vline(30.0, 2.0, 12.0, Rgb::BLACK)
        })
        .expect("render");
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn encoded_frame_decodes_back_to_its_pixels() {
        let rgb = vec![255u8, 0, 0, 0, 255, 0];
        let uri = encode_png_data_uri(&rgb, 2, 1).expect("encode");
        let payload = uri.trim_start_matches("data:image/png;base64,");
        let png = BASE64_STANDARD.decode(payload).expect("base64");
        let decoded = image::load_from_memory(&png).expect("png").to_rgb8();
        assert_eq!(decoded.as_raw(), &rgb);
    }
}
