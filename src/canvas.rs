// Surface implementation over a 2D canvas context, plus the lookups the
// browser host needs from the page (canvas element, theme accent).

use crate::color::Color;
use crate::surface::Surface;
use crate::utils;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

// CSS custom property the page theme stores its accent in
pub const ACCENT_PROPERTY: &str = "--primary-color";

pub struct CanvasSurface {
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasSurface { context }
    }

    // None when the canvas cannot hand out a 2D context
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(ctx) => ctx.dyn_into::<CanvasRenderingContext2d>()?,
            None => return Ok(None),
        };
        Ok(Some(CanvasSurface::new(context)))
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, opacity: f64) {
        self.context.set_global_alpha(opacity);
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        if self.context.arc(x, y, radius.max(0.0), 0.0, PI * 2.0).is_ok() {
            self.context.fill();
        }
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, opacity: f64) {
        self.context.set_global_alpha(opacity);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

pub fn find_canvas(
    document: &Document,
    canvas_id: &str,
) -> Result<Option<HtmlCanvasElement>, JsValue> {
    match document.get_element_by_id(canvas_id) {
        Some(element) => Ok(Some(element.dyn_into::<HtmlCanvasElement>()?)),
        None => Ok(None),
    }
}

// Viewport size in whole pixels; 0 when the window reports nothing usable
pub fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

// Current accent from the page stylesheet, None if unset or unparseable
pub fn read_accent(window: &Window) -> Option<Color> {
    let root = window.document()?.document_element()?;
    let style = window.get_computed_style(&root).ok()??;
    let value = style.get_property_value(ACCENT_PROPERTY).ok()?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match Color::parse(value) {
        Ok(color) => Some(color),
        Err(e) => {
            utils::warn(&format!("ignoring {}: {}", ACCENT_PROPERTY, e));
            None
        }
    }
}
