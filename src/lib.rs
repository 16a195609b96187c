use wasm_bindgen::prelude::*;

pub mod app;
pub mod clipboard;
pub mod payload;
pub mod qr_generator;
pub mod status;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    yew::Renderer::<app::App>::new().render();

    Ok(())
}
