use glam::Vec2;
use web_sys as web;

/// Pointer position in page (client) pixels.
#[inline]
pub fn pointer_page_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Pointer position in normalized device coordinates relative to the canvas.
#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Vec2::new((x_css / w) * 2.0 - 1.0, 1.0 - (y_css / h) * 2.0)
}
