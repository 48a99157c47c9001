//! Canvas2D backend for the display list

use std::f64::consts::TAU;

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{
    CanvasGradient, CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
    ImageData,
};

use super::frame::{DrawCmd, Frame, Stroke};
use super::palette::{self, Color};
use crate::backdrop::Backdrop;

/// Paints frames onto a 2D context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    noise: Option<HtmlCanvasElement>,
    stains: Option<HtmlCanvasElement>,
    sponge: Option<HtmlImageElement>,
    /// `createConicGradient` is available
    conic_gradients: bool,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

fn offscreen(document: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("not a canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(canvas)?;
        let conic_gradients = js_sys::Reflect::has(&ctx, &JsValue::from_str("createConicGradient"))
            .unwrap_or(false);
        if !conic_gradients {
            log::warn!("Conic gradients unsupported, guide ring falls back to a flat stroke");
        }
        Ok(Self {
            ctx,
            noise: None,
            stains: None,
            sponge: None,
            conic_gradients,
        })
    }

    /// Image used for the textured sponge cursor
    pub fn set_sponge(&mut self, image: HtmlImageElement) {
        self.sponge = Some(image);
    }

    /// Rasterize both backdrop layers into offscreen canvases
    pub fn set_backdrop(&mut self, document: &Document, backdrop: &Backdrop) -> Result<(), JsValue> {
        let noise = &backdrop.noise;
        let noise_canvas = offscreen(document, noise.width, noise.height)?;
        if noise.width > 0 && noise.height > 0 {
            let data = ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(noise.pixels.as_slice()),
                noise.width,
                noise.height,
            )?;
            context_2d(&noise_canvas)?.put_image_data(&data, 0.0, 0.0)?;
        }

        let stain_canvas = offscreen(document, noise.width, noise.height)?;
        let ctx = context_2d(&stain_canvas)?;
        ctx.set_stroke_style_str(&palette::TEA_STAIN.css());
        for blotch in &backdrop.stains.blotches {
            ctx.set_line_width(blotch.line_width as f64);
            trace(&ctx, &blotch.points, true);
            ctx.stroke();
        }

        self.noise = Some(noise_canvas);
        self.stains = Some(stain_canvas);
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.css());
        self.ctx.set_line_width(stroke.width as f64);
        let (cap, join) = if stroke.round {
            ("round", "round")
        } else {
            ("butt", "miter")
        };
        self.ctx.set_line_cap(cap);
        self.ctx.set_line_join(join);
    }

    fn fill_and_stroke(&self, fill: Option<Color>, stroke: Option<&Stroke>) {
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(&fill.css());
            self.ctx.fill();
        }
        if let Some(stroke) = stroke {
            self.apply_stroke(stroke);
            self.ctx.stroke();
        }
    }

    fn conic_gradient(&self) -> Option<CanvasGradient> {
        if !self.conic_gradients {
            return None;
        }
        let create = js_sys::Reflect::get(&self.ctx, &JsValue::from_str("createConicGradient"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        let zero = JsValue::from_f64(0.0);
        let gradient = create
            .call3(&self.ctx, &zero, &zero, &zero)
            .ok()?
            .dyn_into::<CanvasGradient>()
            .ok()?;
        gradient.add_color_stop(0.0, &palette::GUIDE_RING_START.css()).ok()?;
        gradient.add_color_stop(1.0, &palette::GUIDE_RING_END.css()).ok()?;
        Some(gradient)
    }

    /// Paint one frame
    pub fn paint(&self, frame: &Frame) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        for cmd in &frame.commands {
            match cmd {
                DrawCmd::Noise => match &self.noise {
                    Some(layer) => ctx.draw_image_with_html_canvas_element(layer, 0.0, 0.0)?,
                    None => {
                        ctx.set_fill_style_str(&palette::BACKGROUND.css());
                        ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);
                    }
                },
                DrawCmd::Stains => {
                    if let Some(layer) = &self.stains {
                        ctx.draw_image_with_html_canvas_element(layer, 0.0, 0.0)?;
                    }
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    self.fill_and_stroke(*fill, stroke.as_ref());
                }
                DrawCmd::Arc {
                    center,
                    radius,
                    start,
                    end,
                    stroke,
                } => {
                    ctx.begin_path();
                    ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        *start as f64,
                        *end as f64,
                    )?;
                    self.fill_and_stroke(None, Some(stroke));
                }
                DrawCmd::Path {
                    points,
                    closed,
                    fill,
                    stroke,
                } => {
                    trace(ctx, points, *closed);
                    self.fill_and_stroke(*fill, stroke.as_ref());
                }
                DrawCmd::Rect {
                    min,
                    size,
                    fill,
                    stroke,
                } => {
                    ctx.begin_path();
                    ctx.rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                    self.fill_and_stroke(*fill, stroke.as_ref());
                }
                DrawCmd::Text {
                    text,
                    pos,
                    font,
                    fill,
                    outline,
                    alpha,
                } => {
                    ctx.save();
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_font(&font.css());
                    ctx.set_fill_style_str(&fill.css());
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                    if let Some(outline) = outline {
                        self.apply_stroke(outline);
                        ctx.stroke_text(text, pos.x as f64, pos.y as f64)?;
                    }
                    ctx.restore();
                }
                DrawCmd::GuideRing {
                    center,
                    radius,
                    rotation,
                    width,
                } => {
                    ctx.save();
                    ctx.translate(center.x as f64, center.y as f64)?;
                    ctx.rotate(*rotation as f64)?;
                    match self.conic_gradient() {
                        Some(gradient) => ctx.set_stroke_style_canvas_gradient(&gradient),
                        None => ctx.set_stroke_style_str(&palette::GUIDE_RING_END.css()),
                    }
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.arc(0.0, 0.0, *radius as f64, 0.0, TAU)?;
                    ctx.stroke();
                    ctx.restore();
                }
                DrawCmd::Sponge {
                    center,
                    radius,
                    textured,
                } => self.paint_sponge(center.x as f64, center.y as f64, *radius as f64, *textured)?,
            }
        }
        Ok(())
    }

    fn paint_sponge(&self, x: f64, y: f64, r: f64, textured: bool) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let border = Stroke::new(palette::LINE, palette::LINE_WIDTH_THIN);
        match self.sponge.as_ref().filter(|_| textured) {
            Some(image) => {
                ctx.save();
                ctx.begin_path();
                ctx.arc(x, y, r, 0.0, TAU)?;
                ctx.clip();
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    x - r,
                    y - r,
                    r * 2.0,
                    r * 2.0,
                )?;
                ctx.restore();
                ctx.begin_path();
                ctx.arc(x, y, r, 0.0, TAU)?;
                self.fill_and_stroke(None, Some(&border));
            }
            None => {
                ctx.begin_path();
                ctx.arc(x, y, r, 0.0, TAU)?;
                self.fill_and_stroke(Some(palette::HIGHLIGHT), Some(&border));
            }
        }
        Ok(())
    }
}

fn trace(ctx: &CanvasRenderingContext2d, points: &[glam::Vec2], closed: bool) {
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x as f64, p.y as f64);
        } else {
            ctx.line_to(p.x as f64, p.y as f64);
        }
    }
    if closed {
        ctx.close_path();
    }
}
