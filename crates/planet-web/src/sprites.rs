//! Quote billboard textures: each floating text is rasterized once into an
//! RGBA image the renderer uploads as a sprite texture.

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{SPRITE_BASE_SCALE, SPRITE_FONT_PX, SPRITE_LINE_HEIGHT};

pub struct SpriteTexture {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// World-space quad size at scale factor 1.
    pub base_scale: (f32, f32),
}

/// Rasterize a (possibly multi-line) quote into a texture, sized to fit the
/// longest line. The billboard keeps the canvas aspect ratio.
pub fn make_quote_texture(document: &web::Document, text: &str) -> anyhow::Result<SpriteTexture> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a canvas: {e:?}"))?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get 2d context: {e:?}"))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a 2d context: {e:?}"))?;

    let font = format!("Bold {SPRITE_FONT_PX}px Arial");
    let line_height = SPRITE_FONT_PX * SPRITE_LINE_HEIGHT;
    let lines: Vec<&str> = text.split('\n').collect();

    ctx.set_font(&font);
    let mut max_width = 0.0_f64;
    for line in &lines {
        let w = ctx.measure_text(line).map(|m| m.width()).unwrap_or(0.0);
        max_width = max_width.max(w);
    }

    let width = (max_width + 40.0).ceil() as u32;
    let height = (lines.len() as f64 * line_height + 20.0).ceil() as u32;
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));

    // Canvas state resets on resize
    ctx.set_font(&font);
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.4)");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let start_y = (height as f64 - (lines.len() as f64 - 1.0) * line_height) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        ctx.fill_text(line, width as f64 / 2.0, start_y + i as f64 * line_height)
            .map_err(|e| anyhow::anyhow!("fill_text: {e:?}"))?;
    }

    let image = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow::anyhow!("get_image_data: {e:?}"))?;
    let rgba = image.data().0;

    let aspect = width as f32 / height.max(1) as f32;
    Ok(SpriteTexture {
        rgba,
        width,
        height,
        base_scale: (SPRITE_BASE_SCALE * aspect, SPRITE_BASE_SCALE),
    })
}
