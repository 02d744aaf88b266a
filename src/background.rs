// Browser host for the particle field: owns the canvas, drives frames through
// requestAnimationFrame and follows window resizes, tab visibility and theme
// changes.

use crate::canvas::{self, CanvasSurface};
use crate::color::Color;
use crate::config::{BoundaryPolicy, FieldConfig, LinkStyle};
use crate::field::ParticleField;
use crate::scheduler::{FrameScheduler, LoopToken};
use crate::utils::{self, Timer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Inner {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    field: ParticleField,
    scheduler: FrameScheduler,
    frame_request: Option<i32>,
    // Loop the pending frame belongs to
    frame_token: Option<LoopToken>,
    hidden: bool,
    profiling: bool,
}

impl Inner {
    fn tick(&mut self) {
        let _timer = Timer::maybe(self.profiling, "ParticleBackground::frame");
        self.field.frame(&mut self.surface);
    }

    fn redraw(&mut self) {
        let _timer = Timer::maybe(self.profiling, "ParticleBackground::render");
        self.field.render(&mut self.surface);
    }

    fn request_frame(&mut self, token: LoopToken, callback: &FrameCallback) -> Result<(), JsValue> {
        if self.frame_request.is_some() {
            return Ok(());
        }
        if let Some(cb) = callback.borrow().as_ref() {
            let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            self.frame_request = Some(id);
            self.frame_token = Some(token);
        }
        Ok(())
    }

    fn cancel_frame(&mut self) {
        self.frame_token = None;
        if let Some(id) = self.frame_request.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                utils::warn(&format!("cancelAnimationFrame failed: {:?}", e));
            }
        }
    }

    fn resize_to(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.resize(width, height);
        // Resizing wipes the canvas; repaint if no loop is going to
        if !self.scheduler.is_running() && !self.hidden {
            self.redraw();
        }
    }

    fn set_hidden(&mut self, hidden: bool, callback: &FrameCallback) -> Result<(), JsValue> {
        self.hidden = hidden;
        if hidden {
            self.scheduler.suspend();
            self.cancel_frame();
            self.surface
                .context
                .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
            Ok(())
        } else if let Some(token) = self.scheduler.resume() {
            self.request_frame(token, callback)
        } else {
            Ok(())
        }
    }

    fn reconfigure<F: FnOnce(FieldConfig) -> FieldConfig>(&mut self, change: F) {
        let config = change(*self.field.config());
        self.field.reconfigure(config);
    }
}

#[wasm_bindgen]
pub struct ParticleBackground {
    inner: Rc<RefCell<Inner>>,
    frame_callback: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
    on_visibility: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl ParticleBackground {
    // Binds to the canvas with the given id. Resolves to `undefined` when the
    // page has no such canvas, which leaves the rest of the page untouched.
    pub fn attach(canvas_id: &str) -> Result<Option<ParticleBackground>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let canvas = match canvas::find_canvas(&document, canvas_id)? {
            Some(canvas) => canvas,
            None => {
                utils::log(&format!("no #{} canvas, particle background disabled", canvas_id));
                return Ok(None);
            }
        };
        let surface = match CanvasSurface::from_canvas(&canvas)? {
            Some(surface) => surface,
            None => {
                utils::warn("canvas has no 2d context, particle background disabled");
                return Ok(None);
            }
        };

        let accent = canvas::read_accent(&window).unwrap_or(Color::DEFAULT_ACCENT);
        let field = ParticleField::new(FieldConfig::default().with_accent(accent));
        let hidden = document.hidden();

        let inner = Rc::new(RefCell::new(Inner {
            window: window.clone(),
            document: document.clone(),
            canvas,
            surface,
            field,
            scheduler: FrameScheduler::new(),
            frame_request: None,
            frame_token: None,
            hidden,
            profiling: false,
        }));

        {
            let (width, height) = canvas::viewport_size(&window);
            inner.borrow_mut().resize_to(width, height);
        }

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let inner = inner.clone();
            let callback = frame_callback.clone();
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let mut inner = inner.borrow_mut();
                inner.frame_request = None;
                let token = match inner.frame_token.take() {
                    Some(token) if inner.scheduler.should_run(token) => token,
                    _ => return,
                };
                inner.tick();
                if let Err(e) = inner.request_frame(token, &callback) {
                    utils::warn(&format!("requestAnimationFrame failed: {:?}", e));
                }
            }) as Box<dyn FnMut()>));
        }

        let on_resize = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move || {
                let mut inner = inner.borrow_mut();
                let (width, height) = canvas::viewport_size(&inner.window);
                inner.resize_to(width, height);
            }) as Box<dyn FnMut()>)
        };

        let on_visibility = {
            let inner = inner.clone();
            let callback = frame_callback.clone();
            Closure::wrap(Box::new(move || {
                let mut inner = inner.borrow_mut();
                let hidden = inner.document.hidden();
                if let Err(e) = inner.set_hidden(hidden, &callback) {
                    utils::warn(&format!("visibility change failed: {:?}", e));
                }
            }) as Box<dyn FnMut()>)
        };

        let background = ParticleBackground {
            inner,
            frame_callback,
            on_resize,
            on_visibility,
        };
        // On failure `background` drops here, which unregisters whatever did
        // get registered and releases the frame callback
        background.listen()?;
        Ok(Some(background))
    }

    // Starts the frame loop; the returned token is what `stop` expects.
    pub fn start(&self) -> Result<LoopToken, JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_frame();
        let token = inner.scheduler.start();
        if inner.hidden {
            inner.scheduler.suspend();
        } else {
            inner.request_frame(token, &self.frame_callback)?;
        }
        Ok(token)
    }

    pub fn stop(&self, token: &LoopToken) -> bool {
        let mut inner = self.inner.borrow_mut();
        let stopped = inner.scheduler.stop(*token);
        if stopped {
            inner.cancel_frame();
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().scheduler.is_running()
    }

    // Advances and draws a single frame outside the loop.
    pub fn frame(&self) {
        self.inner.borrow_mut().tick();
    }

    pub fn render(&self) {
        self.inner.borrow_mut().redraw();
    }

    // Re-reads the viewport size, as the window resize listener does.
    pub fn resize(&self) {
        let mut inner = self.inner.borrow_mut();
        let (width, height) = canvas::viewport_size(&inner.window);
        inner.resize_to(width, height);
    }

    pub fn resize_to(&self, width: u32, height: u32) {
        self.inner.borrow_mut().resize_to(width, height);
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .set_hidden(!visible, &self.frame_callback)
    }

    // Takes any CSS color the accent property accepts (hex or rgb()).
    pub fn set_theme_color(&self, css: &str) -> Result<(), JsValue> {
        let color = Color::parse(css).map_err(|e| JsValue::from_str(&e))?;
        self.inner.borrow_mut().field.set_accent(color);
        Ok(())
    }

    // Picks up the page's current accent, keeping the old one if unset.
    pub fn refresh_theme(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(color) = canvas::read_accent(&inner.window) {
            inner.field.set_accent(color);
        }
    }

    pub fn theme_color(&self) -> String {
        self.inner.borrow().field.accent().to_css()
    }

    pub fn particle_count(&self) -> usize {
        self.inner.borrow().field.len()
    }

    pub fn set_max_particles(&self, max: u32) {
        if max > crate::config::PARTICLE_CEILING {
            utils::warn(&format!(
                "max particles {} capped at {}",
                max,
                crate::config::PARTICLE_CEILING
            ));
        }
        self.inner
            .borrow_mut()
            .reconfigure(|c| c.with_max_particles(max));
    }

    pub fn set_density_divisor(&self, divisor: f64) {
        self.inner
            .borrow_mut()
            .reconfigure(|c| c.with_density_divisor(divisor));
    }

    pub fn set_connect_distance(&self, distance: f64) {
        self.inner
            .borrow_mut()
            .reconfigure(|c| c.with_connect_distance(distance));
    }

    pub fn set_boundary(&self, boundary: BoundaryPolicy) {
        self.inner
            .borrow_mut()
            .reconfigure(|c| c.with_boundary(boundary));
    }

    pub fn set_links(&self, style: LinkStyle, alpha: f64) {
        self.inner
            .borrow_mut()
            .reconfigure(|c| c.with_links(style, alpha));
    }

    pub fn set_profiling(&self, enabled: bool) {
        self.inner.borrow_mut().profiling = enabled;
    }
}

impl ParticleBackground {
    fn listen(&self) -> Result<(), JsValue> {
        let inner = self.inner.borrow();
        inner
            .window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())?;
        inner.document.add_event_listener_with_callback(
            "visibilitychange",
            self.on_visibility.as_ref().unchecked_ref(),
        )?;
        Ok(())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_frame();
        let _ = inner.window.remove_event_listener_with_callback(
            "resize",
            self.on_resize.as_ref().unchecked_ref(),
        );
        let _ = inner.document.remove_event_listener_with_callback(
            "visibilitychange",
            self.on_visibility.as_ref().unchecked_ref(),
        );
        // Breaks the callback's reference cycle back to itself
        self.frame_callback.borrow_mut().take();
    }
}
