// src/web/canvas.rs
//! `Surface` over a `<canvas>` 2D context.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{EngineError, SurfaceError};
use crate::surface::Surface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up the canvas element with `id` in the current document.
    pub fn by_id(id: &str, alpha: bool) -> Result<Self, EngineError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| EngineError::Platform("no document".into()))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| EngineError::Platform(format!("no element with id `{}`", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::Platform(format!("element `{}` is not a canvas", id)))?;
        Self::from_canvas(canvas, alpha)
    }

    /// Opens a 2D context on `canvas`.
    pub fn from_canvas(canvas: HtmlCanvasElement, alpha: bool) -> Result<Self, EngineError> {
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::from_bool(alpha))
            .map_err(EngineError::platform)?;
        let context = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(EngineError::platform)?
            .ok_or_else(|| EngineError::Platform("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::Platform("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.context
            .draw_image_with_html_image_element(image, x, y)
            .map_err(|err| SurfaceError::from_js("drawImage", err))
    }

    fn image_size(&self, image: &HtmlImageElement) -> (f64, f64) {
        (image.width() as f64, image.height() as f64)
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.context
            .translate(x, y)
            .map_err(|err| SurfaceError::from_js("translate", err))
    }

    fn rotate(&mut self, angle: f64) -> Result<(), SurfaceError> {
        self.context
            .rotate(angle)
            .map_err(|err| SurfaceError::from_js("rotate", err))
    }
}
