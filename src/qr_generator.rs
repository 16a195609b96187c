//! QR rendering: wraps the encoder library behind a small engine trait and
//! paints the resulting module grid onto an off-screen canvas, from which the
//! displayable/downloadable PNG is taken.

use crate::status::RenderError;
use futures::channel::oneshot;
use qrcodegen::{QrCode, QrCodeEcc};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement};

/// Quiet zone around the code, in modules.
const QUIET_ZONE: i32 = 4;

/// Redundancy setting controlling a code's damage tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EccLevel {
    Low,
    Medium,
    Quartile,
    High,
}

impl EccLevel {
    /// Maps the user-facing selector value; unrecognized labels fall back to
    /// the mid-level default.
    pub fn from_label(label: &str) -> EccLevel {
        match label {
            "L" => EccLevel::Low,
            "M" => EccLevel::Medium,
            "Q" => EccLevel::Quartile,
            "H" => EccLevel::High,
            _ => EccLevel::Medium,
        }
    }
}

/// Everything a single render needs. Rebuilt from form state on every
/// generation; carries no identity of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub payload: String,
    pub size_px: u32,
    pub dark: String,
    pub light: String,
    pub ecc: EccLevel,
}

/// Module grid produced by an engine. Row-major, `true` = dark module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    size: i32,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn new(size: i32, modules: Vec<bool>) -> QrMatrix {
        debug_assert_eq!(modules.len(), (size * size) as usize);
        QrMatrix { size, modules }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Dark/light state of a module; coordinates outside the grid read as
    /// light, matching the quiet zone.
    pub fn module(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.size
            && y < self.size
            && self.modules[(y * self.size + x) as usize]
    }
}

/// The encoding collaborator. Injected so tests can substitute their own.
pub trait QrEngine {
    fn encode(&self, payload: &str, ecc: EccLevel) -> Result<QrMatrix, RenderError>;
}

/// Production engine backed by `qrcodegen`.
pub struct CodegenEngine;

impl QrEngine for CodegenEngine {
    fn encode(&self, payload: &str, ecc: EccLevel) -> Result<QrMatrix, RenderError> {
        let ecl = match ecc {
            EccLevel::Low => QrCodeEcc::Low,
            EccLevel::Medium => QrCodeEcc::Medium,
            EccLevel::Quartile => QrCodeEcc::Quartile,
            EccLevel::High => QrCodeEcc::High,
        };
        let qr = QrCode::encode_text(payload, ecl).map_err(|_| RenderError::PayloadTooLong)?;
        let size = qr.size();
        let mut modules = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                modules.push(qr.get_module(x, y));
            }
        }
        Ok(QrMatrix::new(size, modules))
    }
}

/// Image handle owned by the UI. Replaced wholesale on every generation; the
/// canvas is kept off-screen for PNG export, the data URL feeds display and
/// download.
#[derive(Clone)]
pub struct RenderedImage {
    pub canvas: HtmlCanvasElement,
    pub data_url: String,
}

/// Wraps the engine and the canvas painting behind the single `render` call
/// the UI layer uses.
pub struct RenderAdapter {
    engine: Option<Rc<dyn QrEngine>>,
}

impl RenderAdapter {
    pub fn new(engine: Rc<dyn QrEngine>) -> RenderAdapter {
        RenderAdapter { engine: Some(engine) }
    }

    /// Adapter with no engine wired; every render reports
    /// [`RenderError::EngineUnavailable`].
    pub fn disconnected() -> RenderAdapter {
        RenderAdapter { engine: None }
    }

    pub fn render(&self, options: &RenderOptions) -> Result<RenderedImage, RenderError> {
        let engine = self.engine.as_ref().ok_or(RenderError::EngineUnavailable)?;
        let matrix = engine.encode(&options.payload, options.ecc)?;
        let canvas = paint(&matrix, options)?;
        let data_url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|_| RenderError::ExportFailed)?;
        Ok(RenderedImage { canvas, data_url })
    }
}

fn paint(matrix: &QrMatrix, options: &RenderOptions) -> Result<HtmlCanvasElement, RenderError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(RenderError::SurfaceFailed)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| RenderError::SurfaceFailed)?
        .dyn_into()
        .map_err(|_| RenderError::SurfaceFailed)?;
    canvas.set_width(options.size_px);
    canvas.set_height(options.size_px);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or(RenderError::SurfaceFailed)?
        .dyn_into()
        .map_err(|_| RenderError::SurfaceFailed)?;

    let size = options.size_px as f64;
    ctx.set_fill_style_str(&options.light);
    ctx.fill_rect(0.0, 0.0, size, size);

    let scale = size / (matrix.size() + 2 * QUIET_ZONE) as f64;
    ctx.set_fill_style_str(&options.dark);
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            if matrix.module(x, y) {
                ctx.fill_rect(
                    (x + QUIET_ZONE) as f64 * scale,
                    (y + QUIET_ZONE) as f64 * scale,
                    scale,
                    scale,
                );
            }
        }
    }
    Ok(canvas)
}

/// Exports the rendered canvas as a PNG blob. `toBlob` hands its result to a
/// callback, so the call is bridged through a oneshot channel; a `null` blob
/// means the surface produced no data.
pub async fn export_png(image: &RenderedImage) -> Result<Blob, RenderError> {
    let (sender, receiver) = oneshot::channel();
    let mut sender = Some(sender);
    let callback = Closure::wrap(Box::new(move |blob: Option<Blob>| {
        if let Some(sender) = sender.take() {
            let _ = sender.send(blob);
        }
    }) as Box<dyn FnMut(Option<Blob>)>);
    image
        .canvas
        .to_blob(callback.as_ref().unchecked_ref())
        .map_err(|_| RenderError::ExportFailed)?;
    let blob = receiver.await.map_err(|_| RenderError::ExportFailed)?;
    drop(callback);
    blob.ok_or(RenderError::ExportFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEngine;

    impl QrEngine for FailingEngine {
        fn encode(&self, _payload: &str, _ecc: EccLevel) -> Result<QrMatrix, RenderError> {
            Err(RenderError::PayloadTooLong)
        }
    }

    fn options(payload: &str) -> RenderOptions {
        RenderOptions {
            payload: payload.to_owned(),
            size_px: 256,
            dark: "#000000".to_owned(),
            light: "#ffffff".to_owned(),
            ecc: EccLevel::Medium,
        }
    }

    #[test]
    fn label_mapping_defaults_to_medium() {
        assert_eq!(EccLevel::from_label("L"), EccLevel::Low);
        assert_eq!(EccLevel::from_label("M"), EccLevel::Medium);
        assert_eq!(EccLevel::from_label("Q"), EccLevel::Quartile);
        assert_eq!(EccLevel::from_label("H"), EccLevel::High);
        assert_eq!(EccLevel::from_label("ultra"), EccLevel::Medium);
        assert_eq!(EccLevel::from_label(""), EccLevel::Medium);
    }

    #[test]
    fn disconnected_adapter_reports_engine_unavailable() {
        let adapter = RenderAdapter::disconnected();
        assert_eq!(
            adapter.render(&options("hello")).err(),
            Some(RenderError::EngineUnavailable)
        );
    }

    #[test]
    fn engine_failures_pass_through_before_any_painting() {
        let adapter = RenderAdapter::new(Rc::new(FailingEngine));
        assert_eq!(
            adapter.render(&options("hello")).err(),
            Some(RenderError::PayloadTooLong)
        );
    }

    #[test]
    fn codegen_engine_produces_a_plausible_grid() {
        let matrix = CodegenEngine
            .encode("https://example.com", EccLevel::Medium)
            .expect("short payload must encode");
        // Version 1 is 21x21; anything smaller is not a QR code.
        assert!(matrix.size() >= 21);
        // Top-left finder pattern corner is always dark.
        assert!(matrix.module(0, 0));
    }

    #[test]
    fn matrix_reads_light_outside_the_grid() {
        let matrix = QrMatrix::new(2, vec![true, false, false, true]);
        assert!(matrix.module(0, 0));
        assert!(!matrix.module(1, 0));
        assert!(!matrix.module(-1, 0));
        assert!(!matrix.module(0, 2));
    }
}
