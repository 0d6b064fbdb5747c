#![cfg(target_arch = "wasm32")]
//! WASM entry point: builds the scene from the rasterized glyph variants,
//! wires input, and starts the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use planet_core::{GlyphPointSet, PlanetScene, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod glyph;
mod input;
mod modal;
mod render;
mod sprites;

use constants::{
    CANVAS_ID, GLYPH_COMPACT_CANVAS, GLYPH_COMPACT_FONT_PX, GLYPH_COMPACT_TEXT, GLYPH_DEPTH_LAYERS,
    GLYPH_EXPANDED_CANVAS, GLYPH_EXPANDED_FONT_PX, GLYPH_EXPANDED_TEXT, MODAL_ID, QUOTE_TEXTS,
};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("planet-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // Rasterize both glyph variants once at startup
    let (cw, ch) = GLYPH_COMPACT_CANVAS;
    let compact_raster = glyph::rasterize_text(
        &document,
        GLYPH_COMPACT_TEXT,
        GLYPH_COMPACT_FONT_PX,
        cw,
        ch,
        GLYPH_DEPTH_LAYERS,
    )?;
    let (ew, eh) = GLYPH_EXPANDED_CANVAS;
    let expanded_raster = glyph::rasterize_text(
        &document,
        GLYPH_EXPANDED_TEXT,
        GLYPH_EXPANDED_FONT_PX,
        ew,
        eh,
        GLYPH_DEPTH_LAYERS,
    )?;
    let compact = GlyphPointSet::from_raster(&compact_raster.positions, &compact_raster.edge_indices)?;
    let expanded =
        GlyphPointSet::from_raster(&expanded_raster.positions, &expanded_raster.edge_indices)?;
    let compact_edges = compact.edges.clone();
    let expanded_edges = expanded.edges.clone();

    // Quote billboard textures
    let quotes: Vec<String> = QUOTE_TEXTS.iter().map(|s| s.to_string()).collect();
    let mut sprite_textures = Vec::with_capacity(quotes.len());
    for q in &quotes {
        sprite_textures.push(sprites::make_quote_texture(&document, q)?);
    }
    let sprite_base_scales: Vec<(f32, f32)> =
        sprite_textures.iter().map(|t| t.base_scale).collect();

    let config = SceneConfig {
        quote_texts: quotes.clone(),
        ..SceneConfig::default()
    };
    let scene = Rc::new(RefCell::new(PlanetScene::new(config, compact, expanded)));
    let orbit = Rc::new(RefCell::new(camera::OrbitRig::from_camera(
        &scene.borrow().camera,
    )));

    // Renderer; failing to acquire WebGPU aborts setup before any input wiring
    let setup = {
        let s = scene.borrow();
        render::RenderSetup {
            star_count: s.stars.positions.len(),
            planet_count: s.planet.len(),
            text_count: s.morph.len(),
            compact_edges: &compact_edges,
            expanded_edges: &expanded_edges,
            sprites: &sprite_textures,
        }
    };
    let gpu = frame::init_gpu(&canvas, setup)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;

    let start = Instant::now();

    // Modal dismissal: click anywhere on the backdrop
    {
        let doc = document.clone();
        dom::add_click_listener(&document, MODAL_ID, move || {
            modal::hide(&doc);
        });
    }

    // Pointer/wheel/keyboard handlers
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        orbit: orbit.clone(),
        quotes: Rc::new(quotes),
        start,
    });

    // Frame loop driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        orbit,
        canvas,
        gpu: Some(gpu),
        sprite_base_scales,
        start,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
