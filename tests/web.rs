// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field_backdrop::canvas::CanvasSurface;
use particle_field_backdrop::{
    BoundaryPolicy, Color, FieldConfig, ParticleBackground, ParticleField, Surface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn context_of(canvas: &HtmlCanvasElement) -> CanvasRenderingContext2d {
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap()
}

// Count of pixels with any coverage
fn painted_pixels(canvas: &HtmlCanvasElement) -> usize {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let data = context_of(canvas).get_image_data(0.0, 0.0, w, h).unwrap().data();
    data.chunks(4).filter(|px| px[3] != 0).count()
}

#[wasm_bindgen_test]
fn missing_canvas_is_not_an_error() {
    let attached = ParticleBackground::attach("no-such-canvas").unwrap();
    assert!(attached.is_none());
}

#[wasm_bindgen_test]
fn attach_sizes_canvas_and_populates() {
    let canvas = add_canvas("bg-attach");
    let background = ParticleBackground::attach("bg-attach").unwrap().unwrap();
    let config = FieldConfig::default();
    let expected = config.particle_count(canvas.width(), canvas.height());
    assert_eq!(background.particle_count(), expected);

    background.resize_to(800, 600);
    assert_eq!((canvas.width(), canvas.height()), (800, 600));
    assert_eq!(background.particle_count(), 40);
    background.resize_to(400, 300);
    assert_eq!(background.particle_count(), 10);
}

#[wasm_bindgen_test]
fn start_stop_with_tokens() {
    add_canvas("bg-loop");
    let background = ParticleBackground::attach("bg-loop").unwrap().unwrap();
    background.set_visible(true).unwrap();
    let first = background.start().unwrap();
    assert!(background.is_running());
    let second = background.start().unwrap();
    assert!(!background.stop(&first));
    assert!(background.is_running());
    assert!(background.stop(&second));
    assert!(!background.is_running());
}

#[wasm_bindgen_test]
fn hidden_page_suspends_loop_and_clears_canvas() {
    let canvas = add_canvas("bg-hidden");
    let background = ParticleBackground::attach("bg-hidden").unwrap().unwrap();
    background.set_visible(true).unwrap();
    background.resize_to(400, 300);
    background.render();
    assert!(painted_pixels(&canvas) > 0);

    background.start().unwrap();
    background.set_visible(false).unwrap();
    assert!(!background.is_running());
    assert_eq!(painted_pixels(&canvas), 0);
    background.set_visible(true).unwrap();
    assert!(background.is_running());
}

#[wasm_bindgen_test]
fn theme_color_updates() {
    add_canvas("bg-theme");
    let background = ParticleBackground::attach("bg-theme").unwrap().unwrap();
    background.set_theme_color("#60a5fa").unwrap();
    assert_eq!(background.theme_color(), "rgb(96, 165, 250)");
    assert!(background.set_theme_color("not a color").is_err());
    assert_eq!(background.theme_color(), "rgb(96, 165, 250)");
}

#[wasm_bindgen_test]
fn canvas_surface_draws_field() {
    let canvas = add_canvas("bg-surface");
    canvas.set_width(200);
    canvas.set_height(200);
    let ctx = context_of(&canvas);
    let mut surface = CanvasSurface::new(ctx.clone());
    surface.fill_circle(100.0, 100.0, 5.0, Color::rgb(255, 0, 0), 1.0);
    let pixel = ctx.get_image_data(100.0, 100.0, 1.0, 1.0).unwrap().data();
    assert_eq!(pixel[0], 255);
    assert_eq!(pixel[3], 255);

    let mut field = ParticleField::with_seed(
        FieldConfig::default().with_boundary(BoundaryPolicy::Wrap),
        3,
    );
    field.initialize(200, 200);
    field.frame(&mut surface);
    surface.clear(200.0, 200.0);
    let pixel = ctx.get_image_data(100.0, 100.0, 1.0, 1.0).unwrap().data();
    assert_eq!(pixel[3], 0);
}

#[wasm_bindgen_test]
fn dropped_background_stops_listening() {
    let canvas = add_canvas("bg-drop");
    let background = ParticleBackground::attach("bg-drop").unwrap().unwrap();
    let window = web_sys::window().unwrap();

    background.resize_to(123, 45);
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_ne!((canvas.width(), canvas.height()), (123, 45));

    background.resize_to(123, 45);
    let token = background.start().unwrap();
    drop(background);
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    let document = window.document().unwrap();
    document
        .dispatch_event(&Event::new("visibilitychange").unwrap())
        .unwrap();
    assert_eq!((canvas.width(), canvas.height()), (123, 45));
    assert!(token.id() > 0);
}
