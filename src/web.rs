//! Painting straight onto an HTML canvas, for live previews in the browser.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::{Colour, FontSpec, Measure, Px, Surface};

/// A [Surface] backed by a browser 2D canvas context.
///
/// Canvas calls that fail are logged and otherwise ignored, so a broken
/// context degrades into missing paint rather than a failed render.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    font: FontSpec,
    stack: Vec<FontSpec>,
}

fn check(op: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(op, error = ?err, "canvas call failed");
    }
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> CanvasSurface {
        let font = FontSpec::new("sans-serif", Px(10.0));
        ctx.set_font(&font.to_css());
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        CanvasSurface {
            ctx,
            font,
            stack: Vec::new(),
        }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    fn circle(&self, cx: Px, cy: Px, radius: Px) -> bool {
        if !radius.is_usable() {
            tracing::warn!(radius = *radius, "skipping circle with degenerate radius");
            return false;
        }
        self.ctx.begin_path();
        check(
            "arc",
            self.ctx
                .arc(f64::from(*cx), f64::from(*cy), f64::from(*radius), 0.0, 2.0 * PI),
        );
        true
    }
}

impl Measure for CanvasSurface {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        if *font != self.font {
            self.ctx.set_font(&font.to_css());
        }
        let width = match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to measure text");
                0.0
            }
        };
        if *font != self.font {
            self.ctx.set_font(&self.font.to_css());
        }
        Px(width)
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: Px, y: Px, width: Px, height: Px) {
        self.ctx.clear_rect(
            f64::from(*x),
            f64::from(*y),
            f64::from(*width),
            f64::from(*height),
        );
    }

    fn set_colour(&mut self, colour: Colour) {
        let hex = colour.to_hex();
        self.ctx.set_fill_style_str(&hex);
        self.ctx.set_stroke_style_str(&hex);
    }

    fn stroke_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        if self.circle(cx, cy, radius) {
            self.ctx.stroke();
        }
    }

    fn fill_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        if self.circle(cx, cy, radius) {
            self.ctx.fill();
        }
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.ctx.set_font(&font.to_css());
        self.font = font.clone();
    }

    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn fill_text(&mut self, text: &str, x: Px, y: Px) {
        check(
            "fill_text",
            self.ctx.fill_text(text, f64::from(*x), f64::from(*y)),
        );
    }

    fn save(&mut self) {
        self.stack.push(self.font.clone());
        self.ctx.save();
    }

    fn restore(&mut self) {
        if let Some(font) = self.stack.pop() {
            self.font = font;
            self.ctx.restore();
        }
    }

    fn translate(&mut self, x: Px, y: Px) {
        check("translate", self.ctx.translate(f64::from(*x), f64::from(*y)));
    }

    fn rotate(&mut self, angle: f32) {
        check("rotate", self.ctx.rotate(f64::from(angle)));
    }
}
