//! Async clipboard capability. Text and image writes go through the
//! asynchronous Clipboard API; insecure contexts expose neither, so every
//! entry point probes availability first and the UI disables the matching
//! affordance when a capability is absent.

use crate::status::ClipboardError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Clipboard};

#[wasm_bindgen]
extern "C" {
    /// `ClipboardItem` bound by hand: the record-of-blobs constructor is
    /// awkward to reach through the generated bindings.
    type ClipboardItem;

    #[wasm_bindgen(constructor, catch)]
    fn new(items: &js_sys::Object) -> Result<ClipboardItem, JsValue>;
}

fn clipboard() -> Option<Clipboard> {
    let window = web_sys::window()?;
    let navigator = window.navigator();
    let handle =
        js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("clipboard")).ok()?;
    if handle.is_undefined() || handle.is_null() {
        None
    } else {
        Some(navigator.clipboard())
    }
}

fn has_clipboard_item() -> bool {
    web_sys::window()
        .and_then(|window| {
            js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("ClipboardItem")).ok()
        })
        .map(|value| !value.is_undefined())
        .unwrap_or(false)
}

/// True when the host can take an image write at all.
pub fn image_copy_supported() -> bool {
    clipboard().is_some() && has_clipboard_item()
}

pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let clipboard = clipboard().ok_or(ClipboardError::Unavailable)?;
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|_| ClipboardError::WriteRejected)?;
    Ok(())
}

pub async fn write_image(blob: &Blob) -> Result<(), ClipboardError> {
    if !has_clipboard_item() {
        return Err(ClipboardError::Unavailable);
    }
    let clipboard = clipboard().ok_or(ClipboardError::Unavailable)?;
    let record = js_sys::Object::new();
    js_sys::Reflect::set(&record, &JsValue::from_str("image/png"), blob.as_ref())
        .map_err(|_| ClipboardError::WriteRejected)?;
    let item = ClipboardItem::new(&record).map_err(|_| ClipboardError::WriteRejected)?;
    let items = js_sys::Array::of1(item.as_ref());
    JsFuture::from(clipboard.write(&items))
        .await
        .map_err(|_| ClipboardError::WriteRejected)?;
    Ok(())
}
