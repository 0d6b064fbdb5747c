//! Quote modal overlay, toggled via element ids in the host page.

use web_sys as web;

use crate::constants::{MODAL_ID, MODAL_TEXT_ID};

pub fn show(document: &web::Document, text: &str) {
    if let Some(content) = document.get_element_by_id(MODAL_TEXT_ID) {
        content.set_text_content(Some(text));
    }
    if let Some(el) = document.get_element_by_id(MODAL_ID) {
        let _ = el.set_attribute("style", "");
    }
}

pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MODAL_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(MODAL_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(true)
}
