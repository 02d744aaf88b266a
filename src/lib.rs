// Animated particle background for a page canvas.
//
// ParticleField is the host-independent engine: it owns the particles,
// moves them and draws them (with links between close neighbours) onto any
// Surface. ParticleBackground hosts it on an HTML canvas in the
// browser.

mod utils;

pub mod background;
pub mod canvas;
pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod scheduler;
pub mod surface;

pub use background::ParticleBackground;
pub use color::Color;
pub use config::{BoundaryPolicy, FieldConfig, LinkStyle, PARTICLE_CEILING};
pub use field::{Link, ParticleField};
pub use particle::Particle;
pub use scheduler::{FrameScheduler, LoopState, LoopToken};
pub use surface::{DrawCommand, RecordingSurface, Surface};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Attaches to `canvas_id` and starts animating right away, the way the page
// does on DOM ready. `undefined` when the canvas is missing.
#[wasm_bindgen]
pub fn start_background(canvas_id: &str) -> Result<Option<ParticleBackground>, JsValue> {
    initialize();
    let background = match ParticleBackground::attach(canvas_id)? {
        Some(background) => background,
        None => return Ok(None),
    };
    background.start()?;
    Ok(Some(background))
}
