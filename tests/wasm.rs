//! Browser-side checks for the DOM-backed render path. Run with
//! `wasm-pack test --headless --chrome`; compiled out on native targets.
#![cfg(target_arch = "wasm32")]

use qr_studio::qr_generator::{CodegenEngine, EccLevel, RenderAdapter, RenderOptions};
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn options(payload: &str) -> RenderOptions {
    RenderOptions {
        payload: payload.to_owned(),
        size_px: 256,
        dark: "#000000".to_owned(),
        light: "#ffffff".to_owned(),
        ecc: EccLevel::Medium,
    }
}

#[wasm_bindgen_test]
fn render_produces_a_png_data_url() {
    let adapter = RenderAdapter::new(Rc::new(CodegenEngine));
    let image = adapter.render(&options("https://example.com")).unwrap();
    assert!(image.data_url.starts_with("data:image/png"));
    assert_eq!(image.canvas.width(), 256);
    assert_eq!(image.canvas.height(), 256);
}

#[wasm_bindgen_test]
async fn rendered_image_exports_a_blob() {
    let adapter = RenderAdapter::new(Rc::new(CodegenEngine));
    let image = adapter.render(&options("WIFI:T:WPA;S:Net;;")).unwrap();
    let blob = qr_studio::qr_generator::export_png(&image).await.unwrap();
    assert!(blob.size() > 0.0);
}
