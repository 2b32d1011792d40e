// File: crates/dash-render-skia/src/lib.rs
// Summary: Paints dashboard scene frames onto Skia CPU raster surfaces and encodes PNG.
// Notes:
// - Frames are in view coordinates: the group offset (the view margin, or the treemap's
//   slide-out position) is applied here, as is the group opacity.
// - Elements carrying the `highlighted` class get a ring in the theme's highlight colour;
//   highlighted circles are drawn at twice their radius.

pub mod theme;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dash_core::color::Color;
use dash_core::scene::{Anchor, Frame, FrameItem, Shape, Style, Tooltip, Weight};
use dash_core::views::HIGHLIGHTED;
use skia_safe as skia;

pub use theme::Theme;

const TOOLTIP_PAD: f32 = 6.0;
const LINE_SPACING: f32 = 1.25;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Device pixels per view pixel.
    pub scale: f32,
    /// Text is skipped when false (keeps pixel tests independent of installed fonts).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 1.0, draw_labels: true }
    }
}

pub struct SkiaRenderer {
    theme: Theme,
    opts: RenderOptions,
}

impl SkiaRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme, opts: RenderOptions::default() }
    }

    pub fn with_options(mut self, opts: RenderOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Rasterize `frame` and return the encoded PNG.
    pub fn render_to_png_bytes(&self, frame: &Frame) -> Result<Vec<u8>> {
        let s = self.opts.scale.max(0.01);
        let w = ((frame.width as f32 * s).ceil() as i32).max(1);
        let h = ((frame.height as f32 * s).ceil() as i32).max(1);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(self.theme.background);
        canvas.save();
        canvas.scale((s, s));
        self.paint_frame(canvas, frame);
        canvas.restore();

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render `frame` to a PNG at `path`, creating parent directories.
    pub fn render_to_png(&self, frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_png_bytes(frame)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Write one `<container>.png` per frame into `dir`.
    pub fn render_all(&self, frames: &[(String, Frame)], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(frames.len());
        for (id, frame) in frames {
            let path = dir.join(format!("{id}.png"));
            self.render_to_png(frame, &path).with_context(|| format!("render view '{id}'"))?;
            log::info!("wrote {} ({}x{})", path.display(), frame.width, frame.height);
            written.push(path);
        }
        Ok(written)
    }

    fn paint_frame(&self, canvas: &skia::Canvas, frame: &Frame) {
        let opacity = frame.group.opacity.clamp(0.0, 1.0) as f32;
        canvas.save();
        canvas.translate((frame.group.offset.0 as f32, frame.group.offset.1 as f32));
        if opacity > 0.0 {
            for layer in &frame.layers {
                log::trace!("paint layer '{}' ({} items)", layer.name, layer.items.len());
                for item in &layer.items {
                    self.draw_item(canvas, item, opacity);
                }
            }
            if let Some(tip) = &frame.tooltip {
                self.draw_tooltip(canvas, tip);
            }
        }
        canvas.restore();
    }

    fn draw_item(&self, canvas: &skia::Canvas, item: &FrameItem, group_opacity: f32) {
        let style = &item.mark.style;
        let alpha = (style.opacity as f32 * group_opacity).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let highlighted = item.has_class(HIGHLIGHTED);
        let ring = highlighted.then(|| stroke_paint(self.theme.highlight, 2.0, alpha));

        match &item.mark.shape {
            Shape::Rect { x, y, width, height } => {
                let rect = skia::Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32);
                for paint in paints(style, alpha) {
                    canvas.draw_rect(rect, &paint);
                }
                if let Some(ring) = &ring {
                    canvas.draw_rect(rect, ring);
                }
            }
            Shape::Circle { cx, cy, r } => {
                let r = (if highlighted { *r * 2.0 } else { *r }) as f32;
                let center = (*cx as f32, *cy as f32);
                for paint in paints(style, alpha) {
                    canvas.draw_circle(center, r, &paint);
                }
                if let Some(ring) = &ring {
                    canvas.draw_circle(center, r, ring);
                }
            }
            Shape::Line { x1, y1, x2, y2 } => {
                let (p1, p2) = ((*x1 as f32, *y1 as f32), (*x2 as f32, *y2 as f32));
                if let Some(stroke) = style.stroke {
                    let width = style.stroke_width as f32 * if highlighted { 2.0 } else { 1.0 };
                    canvas.draw_line(p1, p2, &stroke_paint(to_skia(stroke), width, alpha));
                }
                if highlighted {
                    canvas.draw_line(p1, p2, &stroke_paint(self.theme.highlight, 1.0, alpha));
                }
            }
            Shape::Polygon { points } => {
                let Some(((x0, y0), rest)) = points.split_first() else {
                    return;
                };
                let mut path = skia::Path::new();
                path.move_to((*x0 as f32, *y0 as f32));
                for (x, y) in rest {
                    path.line_to((*x as f32, *y as f32));
                }
                path.close();
                for paint in paints(style, alpha) {
                    canvas.draw_path(&path, &paint);
                }
                if let Some(ring) = &ring {
                    canvas.draw_path(&path, ring);
                }
            }
            Shape::Text { x, y, text, size, anchor, weight, rotate } => {
                if !self.opts.draw_labels || text.is_empty() {
                    return;
                }
                let color = match (self.theme.text, style.fill) {
                    (Some(over), Some(_)) => over,
                    (_, Some(fill)) => to_skia(fill),
                    (_, None) => return,
                };
                let mut paint = fill_paint(color, alpha);
                if highlighted {
                    paint.set_color(self.theme.highlight);
                    paint.set_alpha_f(alpha);
                }
                let font = font(*size as f32, *weight);
                canvas.save();
                canvas.translate((*x as f32, *y as f32));
                if *rotate != 0.0 {
                    canvas.rotate(*rotate as f32, None);
                }
                for (i, line) in text.lines().enumerate() {
                    let (width, _) = font.measure_str(line, Some(&paint));
                    let dx = match anchor {
                        Anchor::Start => 0.0,
                        Anchor::Middle => -width / 2.0,
                        Anchor::End => -width,
                    };
                    let dy = i as f32 * *size as f32 * LINE_SPACING;
                    canvas.draw_str(line, (dx, dy), &font, &paint);
                }
                canvas.restore();
            }
        }
    }

    /// Box below-centre of the anchor point, one text line per `\n`.
    fn draw_tooltip(&self, canvas: &skia::Canvas, tip: &Tooltip) {
        let size = 12.0f32;
        let font = font(size, Weight::Normal);
        let text_paint = fill_paint(self.theme.tooltip_text, 1.0);
        let lines: Vec<&str> = tip.text.lines().collect();
        let width = if self.opts.draw_labels {
            lines.iter().map(|l| font.measure_str(l, Some(&text_paint)).0).fold(0.0f32, f32::max)
        } else {
            0.0
        };
        let height = lines.len() as f32 * size * LINE_SPACING;
        let left = tip.x as f32 - width / 2.0 - TOOLTIP_PAD;
        let top = tip.y as f32 + 8.0;
        let rect = skia::Rect::from_xywh(left, top, width + 2.0 * TOOLTIP_PAD, height + 2.0 * TOOLTIP_PAD);
        canvas.draw_rect(rect, &fill_paint(self.theme.tooltip_fill, 1.0));
        canvas.draw_rect(rect, &stroke_paint(self.theme.tooltip_border, 1.0, 1.0));
        if !self.opts.draw_labels {
            return;
        }
        for (i, line) in lines.iter().enumerate() {
            let baseline = top + TOOLTIP_PAD + size * (0.85 + i as f32 * LINE_SPACING);
            canvas.draw_str(line, (left + TOOLTIP_PAD, baseline), &font, &text_paint);
        }
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn fill_paint(color: skia::Color, alpha: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint.set_alpha_f(color.a() as f32 / 255.0 * alpha);
    paint
}

fn stroke_paint(color: skia::Color, width: f32, alpha: f32) -> skia::Paint {
    let mut paint = fill_paint(color, alpha);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

/// Fill then stroke, whichever the style defines.
fn paints(style: &Style, alpha: f32) -> Vec<skia::Paint> {
    let mut out = Vec::with_capacity(2);
    if let Some(fill) = style.fill {
        out.push(fill_paint(to_skia(fill), alpha));
    }
    if let Some(stroke) = style.stroke {
        if style.stroke_width > 0.0 {
            out.push(stroke_paint(to_skia(stroke), style.stroke_width as f32, alpha));
        }
    }
    out
}

fn font(size: f32, weight: Weight) -> skia::Font {
    let mut font = skia::Font::default();
    font.set_size(size.max(1.0));
    font.set_embolden(weight == Weight::Bold);
    font
}
