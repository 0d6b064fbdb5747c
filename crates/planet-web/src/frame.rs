//! Frame loop: advance the simulation, assemble GPU buffers, render.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec4;
use instant::Instant;
use planet_core::PlanetScene;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::OrbitRig;
use crate::constants::{
    GLOW_RADIUS_FACTOR, PLANET_POINT_SIZE, STAR_POINT_SIZE, TEXT_POINT_SIZE,
};
use crate::render::{
    ActiveEdges, FrameData, GpuState, LineVertex, PointInstance, RenderSetup, SpriteInstance,
    Uniforms,
};
use crate::{dom, render};

pub struct FrameContext {
    pub scene: Rc<RefCell<PlanetScene>>,
    pub orbit: Rc<RefCell<OrbitRig>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState<'static>>,
    /// World-space quad size per quote texture at scale factor 1.
    pub sprite_base_scales: Vec<(f32, f32)>,
    pub start: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.start.elapsed().as_secs_f64();
        dom::sync_canvas_backing_size(&self.canvas);
        let width = self.canvas.width();
        let height = self.canvas.height();
        let aspect = width as f32 / height.max(1) as f32;
        let viewport = dom::viewport_size();

        let mut scene = self.scene.borrow_mut();
        self.orbit.borrow_mut().update(&mut scene.camera, aspect);
        scene.step(now, viewport);

        // Hovering a quote reads as clickable
        let cursor = if scene.hovered_quote().is_some() {
            "pointer"
        } else {
            "default"
        };
        let _ = self.canvas.style().set_property("cursor", cursor);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // Planet cloud, rotated into world space
        let planet_rot = scene.planet_rotation();
        let mut planet = Vec::with_capacity(scene.planet.len());
        for i in 0..scene.planet.len() {
            planet.push(PointInstance {
                pos: (planet_rot * scene.planet.positions[i]).to_array(),
                scale: PLANET_POINT_SIZE,
                color: Vec4::from((scene.planet.colors[i], 1.0)).to_array(),
            });
        }

        // Starfield
        let mut stars = Vec::with_capacity(scene.stars.positions.len());
        for p in &scene.stars.positions {
            stars.push(PointInstance {
                pos: p.to_array(),
                scale: STAR_POINT_SIZE,
                color: [1.0, 1.0, 1.0, 1.0],
            });
        }

        // Glyph points double as the wireframe vertex buffer
        let text_rot = scene.text_rotation(now);
        let mut text = Vec::with_capacity(scene.morph.len());
        let mut lines = Vec::with_capacity(scene.morph.len());
        for i in 0..scene.morph.len() {
            let pos = (text_rot * scene.morph.positions[i]).to_array();
            let color = scene.morph.colors[i];
            text.push(PointInstance {
                pos,
                scale: TEXT_POINT_SIZE,
                color: Vec4::from((color, 1.0)).to_array(),
            });
            lines.push(LineVertex {
                pos,
                color: color.to_array(),
            });
        }
        let edges = if scene.morph.factor < 0.5 {
            ActiveEdges::Compact
        } else {
            ActiveEdges::Expanded
        };

        // Quote billboards
        let mut quote_sprites = Vec::with_capacity(scene.sprites.sprites.len());
        for s in &scene.sprites.sprites {
            let (bx, by) = self
                .sprite_base_scales
                .get(s.text_index)
                .copied()
                .unwrap_or((1.0, 1.0));
            quote_sprites.push(SpriteInstance {
                pos: s.position.to_array(),
                scale: [bx * s.current_scale, by * s.current_scale],
                opacity: s.opacity,
                _pad: [0.0; 2],
            });
        }

        let uniforms = Uniforms {
            view: scene.camera.view_matrix().to_cols_array_2d(),
            proj: scene.camera.projection_matrix().to_cols_array_2d(),
            time: scene.glow_time(),
            spin_factor: scene.spin_speed_factor(),
            cursor_proximity: scene.cursor_proximity(),
            glow_radius: scene.config.sphere_radius * GLOW_RADIUS_FACTOR * scene.glow_scale(),
        };

        gpu.resize_if_needed(width, height);
        if let Err(e) = gpu.render(&FrameData {
            uniforms,
            stars: &stars,
            planet: &planet,
            text: &text,
            lines: &lines,
            edges,
            sprites: &quote_sprites,
        }) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    setup: RenderSetup<'_>,
) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, setup).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
