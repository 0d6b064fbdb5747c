//! Canvas2D glyph rasterizer: turns a text string into a point cloud plus a
//! wireframe edge list, evaluated once at startup per glyph variant.
//!
//! The currency glyph `₿` is drawn from an embedded SVG outline because font
//! coverage for it is unreliable across platforms.

use fnv::FnvHashMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Pixel grid step between sampled points.
const SAMPLING: u32 = 3;
/// World units per canvas pixel.
const POINT_SCALE: f32 = 0.02;
/// Z spacing between depth layers.
const LAYER_DEPTH: f32 = 0.15;
/// Alpha cutoff for a pixel to become a point.
const ALPHA_THRESHOLD: u8 = 128;

/// Official Bitcoin logo outline (SVG path data, 280x280 viewbox).
const BITCOIN_PATH: &str = "M217.021,167.042c18.631-9.483,30.288-26.184,27.565-54.007c-3.667-38.023-36.526-50.773-78.006-54.404l-0.008-52.741 h-32.139l-0.009,51.354c-8.456,0-17.076,0.166-25.657,0.338L108.76,5.897l-32.11-0.003l-0.006,52.728 c-6.959,0.142-13.793,0.277-20.466,0.277v-0.156l-44.33-0.018l0.006,34.282c0,0,23.734-0.446,23.343-0.013 c13.013,0.009,17.262,7.559,18.484,14.076l0.01,60.083v84.397c-0.573,4.09-2.984,10.625-12.083,10.637 c0.414,0.364-23.379-0.004-23.379-0.004l-6.375,38.335h41.817c7.792,0.009,15.448,0.13,22.959,0.19l0.028,53.338l32.102,0.009 l-0.009-52.779c8.832,0.18,17.357,0.258,25.684,0.247l-0.009,52.532h32.138l0.018-53.249c54.022-3.1,91.842-16.697,96.544-67.385 C266.916,192.612,247.692,174.396,217.021,167.042z M109.535,95.321c18.126,0,75.132-5.767,75.14,32.064 c-0.008,36.269-56.996,32.032-75.14,32.032V95.321z M109.521,262.447l0.014-70.672c21.778-0.006,90.085-6.261,90.094,35.32 C199.638,266.971,131.313,262.431,109.521,262.447z";
const BITCOIN_VIEWBOX: f64 = 280.0;

/// Rasterizer output in the flat layout the simulation core consumes.
pub struct RasterGlyph {
    pub positions: Vec<f32>,
    pub edge_indices: Vec<u32>,
}

fn create_canvas_2d(
    document: &web::Document,
    width: u32,
    height: u32,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a canvas: {e:?}"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get 2d context: {e:?}"))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a 2d context: {e:?}"))?;
    Ok((canvas, ctx))
}

fn measure(ctx: &web::CanvasRenderingContext2d, text: &str) -> f64 {
    ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

/// Draw the glyph text into the canvas, substituting the SVG outline for `₿`.
fn draw_text(
    ctx: &web::CanvasRenderingContext2d,
    text: &str,
    font_size: f64,
    center_x: f64,
    center_y: f64,
) -> anyhow::Result<()> {
    ctx.set_fill_style_str("#ff9900");
    ctx.set_font(&format!("bold {font_size}px arial"));
    ctx.set_text_baseline("middle");

    let Some(sym_at) = text.find('\u{20BF}') else {
        ctx.set_text_align("center");
        ctx.fill_text(text, center_x, center_y)
            .map_err(|e| anyhow::anyhow!("fill_text: {e:?}"))?;
        return Ok(());
    };

    let before = &text[..sym_at];
    let after = &text[sym_at + '\u{20BF}'.len_utf8()..];
    let before_width = if before.is_empty() { 0.0 } else { measure(ctx, before) };
    let after_width = if after.is_empty() { 0.0 } else { measure(ctx, after) };

    // The symbol is drawn slightly smaller when inline with other characters
    let standalone = before.is_empty() && after.is_empty();
    let symbol_scale = if standalone { 1.0 } else { 0.82 };
    let symbol_width = font_size * 0.95 * symbol_scale;
    let total_width = before_width + symbol_width + after_width;
    let mut current_x = center_x - total_width / 2.0;

    ctx.set_text_align("left");
    if !before.is_empty() {
        ctx.fill_text(before, current_x, center_y)
            .map_err(|e| anyhow::anyhow!("fill_text: {e:?}"))?;
        current_x += before_width;
    }

    let path = web::Path2d::new_with_path_string(BITCOIN_PATH)
        .map_err(|e| anyhow::anyhow!("bitcoin path: {e:?}"))?;
    let scale = (font_size / BITCOIN_VIEWBOX) * symbol_scale;
    let path_center_x = 138.5;
    let path_center_y = if standalone { 180.0 } else { 185.0 };
    ctx.save();
    ctx.translate(
        current_x + symbol_width / 2.0 - path_center_x * scale,
        center_y - path_center_y * scale,
    )
    .map_err(|e| anyhow::anyhow!("translate: {e:?}"))?;
    ctx.scale(scale, scale)
        .map_err(|e| anyhow::anyhow!("scale: {e:?}"))?;
    ctx.fill_with_path_2d(&path);
    ctx.restore();
    current_x += symbol_width;

    if !after.is_empty() {
        ctx.fill_text(after, current_x, center_y)
            .map_err(|e| anyhow::anyhow!("fill_text: {e:?}"))?;
    }
    Ok(())
}

/// Rasterize `text` into a point set and wireframe edge list.
///
/// Points are sampled every [`SAMPLING`] pixels wherever the rendered alpha
/// clears the threshold, replicated across `depth_layers` Z slices; edges
/// connect each point to its E/S/SE/SW neighbors and to the point above it
/// in the next layer.
pub fn rasterize_text(
    document: &web::Document,
    text: &str,
    font_size: f64,
    canvas_width: u32,
    canvas_height: u32,
    depth_layers: u32,
) -> anyhow::Result<RasterGlyph> {
    let (_canvas, ctx) = create_canvas_2d(document, canvas_width, canvas_height)?;
    let center_x = canvas_width as f64 / 2.0;
    let center_y = canvas_height as f64 / 2.0;
    draw_text(&ctx, text, font_size, center_x, center_y)?;

    let image = ctx
        .get_image_data(0.0, 0.0, canvas_width as f64, canvas_height as f64)
        .map_err(|e: JsValue| anyhow::anyhow!("get_image_data: {e:?}"))?;
    let data = image.data();

    let mut positions: Vec<f32> = Vec::new();
    let mut point_map: FnvHashMap<(u32, u32, u32), u32> = FnvHashMap::default();

    for d in 0..depth_layers {
        let pz = (d as f32 - (depth_layers as f32 - 1.0) / 2.0) * LAYER_DEPTH;
        let mut y = 0;
        while y < canvas_height {
            let mut x = 0;
            while x < canvas_width {
                let alpha = data[((y * canvas_width + x) * 4 + 3) as usize];
                if alpha > ALPHA_THRESHOLD {
                    let index = (positions.len() / 3) as u32;
                    positions.push((x as f32 - canvas_width as f32 / 2.0) * POINT_SCALE);
                    positions.push((canvas_height as f32 / 2.0 - y as f32) * POINT_SCALE);
                    positions.push(pz);
                    point_map.insert((x, y, d), index);
                }
                x += SAMPLING;
            }
            y += SAMPLING;
        }
    }

    let mut edge_indices: Vec<u32> = Vec::new();
    let s = SAMPLING;
    for (&(x, y, d), &index) in &point_map {
        let neighbors = [
            Some((x + s, y, d)),
            Some((x, y + s, d)),
            Some((x + s, y + s, d)),
            x.checked_sub(s).map(|nx| (nx, y + s, d)),
        ];
        for key in neighbors.into_iter().flatten() {
            if let Some(&other) = point_map.get(&key) {
                edge_indices.push(index);
                edge_indices.push(other);
            }
        }
        // Connect depth layers
        if d + 1 < depth_layers {
            if let Some(&above) = point_map.get(&(x, y, d + 1)) {
                edge_indices.push(index);
                edge_indices.push(above);
            }
        }
    }

    log::info!(
        "[glyph] '{text}' -> {} points, {} edges",
        positions.len() / 3,
        edge_indices.len() / 2
    );
    Ok(RasterGlyph {
        positions,
        edge_indices,
    })
}
