use crate::clipboard;
use crate::payload::{self, ContentType, Field, FormFields};
use crate::qr_generator::{
    export_png, CodegenEngine, EccLevel, RenderAdapter, RenderOptions, RenderedImage,
};
use crate::status::Status;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Quiet period after the last field edit before the preview refreshes.
const DEBOUNCE_MS: i32 = 200;

const MIN_SIZE: u32 = 128;
const MAX_SIZE: u32 = 512;
const DEFAULT_SIZE: u32 = 256;
const DEFAULT_DARK: &str = "#000000";
const DEFAULT_LIGHT: &str = "#ffffff";
const DEFAULT_CORRECTION: &str = "M";

const CORRECTION_LEVELS: [(&str, &str); 4] = [
    ("L", "Low"),
    ("M", "Medium"),
    ("Q", "Quartile"),
    ("H", "High"),
];

fn log_error(message: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
}

/// Pending debounced preview refresh. Dropping the closure before the timer
/// fires would leave a dangling callback, so it lives here until the timer is
/// cleared or elapses.
struct PendingPreview {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

pub struct App {
    content_type: ContentType,
    fields: FormFields,
    size: u32,
    dark: String,
    light: String,
    correction: String,
    auto_generate: bool,
    preview: String,
    status: Status,
    image: Option<RenderedImage>,
    renderer: RenderAdapter,
    image_copy_supported: bool,
    pending_preview: Option<PendingPreview>,
}

pub enum Msg {
    SelectType(ContentType),
    Edit(Field, String),
    ToggleHidden,
    SetSize(u32),
    SetDark(String),
    SetLight(String),
    SetCorrection(String),
    ToggleAuto,
    DebounceElapsed,
    Generate,
    Reset,
    CopyPayload,
    CopyImage,
    StatusUpdate(Status),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            content_type: ContentType::Url,
            fields: FormFields::default(),
            size: DEFAULT_SIZE,
            dark: DEFAULT_DARK.to_owned(),
            light: DEFAULT_LIGHT.to_owned(),
            correction: DEFAULT_CORRECTION.to_owned(),
            auto_generate: false,
            preview: String::new(),
            status: Status::info("Fill in the form to create a QR code."),
            image: None,
            renderer: RenderAdapter::new(Rc::new(CodegenEngine)),
            image_copy_supported: clipboard::image_copy_supported(),
            pending_preview: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectType(content_type) => {
                self.content_type = content_type;
                self.preview = self.current_payload();
            }
            Msg::Edit(field, value) => {
                self.fields.set(field, value);
                self.schedule_preview(ctx);
            }
            Msg::ToggleHidden => {
                self.fields.wifi.hidden = !self.fields.wifi.hidden;
                self.schedule_preview(ctx);
            }
            Msg::SetSize(size) => {
                self.size = size.clamp(MIN_SIZE, MAX_SIZE);
                self.schedule_preview(ctx);
            }
            Msg::SetDark(color) => {
                self.dark = color;
                self.schedule_preview(ctx);
            }
            Msg::SetLight(color) => {
                self.light = color;
                self.schedule_preview(ctx);
            }
            Msg::SetCorrection(level) => {
                self.correction = level;
                self.schedule_preview(ctx);
            }
            Msg::ToggleAuto => {
                self.auto_generate = !self.auto_generate;
                self.schedule_preview(ctx);
            }
            Msg::DebounceElapsed => {
                self.pending_preview = None;
                self.preview = self.current_payload();
                if self.auto_generate {
                    self.generate();
                }
            }
            Msg::Generate => self.generate(),
            Msg::Reset => self.reset(),
            Msg::CopyPayload => self.copy_payload(ctx),
            Msg::CopyImage => self.copy_image(ctx),
            Msg::StatusUpdate(status) => self.status = status,
        }
        true
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.cancel_preview();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_type_change = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let ty = ContentType::from_value(&select.value()).unwrap_or(ContentType::Url);
            Msg::SelectType(ty)
        });
        let on_size = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetSize(input.value().parse().unwrap_or(DEFAULT_SIZE))
        });
        let on_dark = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetDark(input.value())
        });
        let on_light = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetLight(input.value())
        });
        let on_correction = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetCorrection(select.value())
        });

        let preview_text = if self.preview.is_empty() {
            "Add content to see the payload preview.".to_owned()
        } else {
            self.preview.clone()
        };
        let copy_image_label = if self.image_copy_supported {
            "Copy image"
        } else {
            "Copy image (unsupported)"
        };
        let download_href = self.image.as_ref().map(|image| image.data_url.clone());
        let download_class = if self.image.is_some() {
            "action"
        } else {
            "action is-disabled"
        };

        html! {
            <main class="layout">
                <section class="panel form">
                    <h1>{ "QR Studio" }</h1>
                    <label class="field" for="content-type">
                        <span>{ "Content type" }</span>
                        <select id="content-type" onchange={on_type_change}>
                            { for ContentType::ALL.iter().map(|ty| html! {
                                <option
                                    value={ty.value()}
                                    selected={self.content_type == *ty}
                                >
                                    { ty.label() }
                                </option>
                            }) }
                        </select>
                    </label>

                    { self.view_fields(ctx) }

                    <label class="field" for="size">
                        <span>{ format!("Size: {}px", self.size) }</span>
                        <input
                            id="size"
                            type="range"
                            min={MIN_SIZE.to_string()}
                            max={MAX_SIZE.to_string()}
                            step="16"
                            value={self.size.to_string()}
                            oninput={on_size}
                        />
                    </label>
                    <div class="row">
                        <label class="field" for="color-dark">
                            <span>{ "Foreground" }</span>
                            <input id="color-dark" type="color" value={self.dark.clone()} oninput={on_dark} />
                        </label>
                        <label class="field" for="color-light">
                            <span>{ "Background" }</span>
                            <input id="color-light" type="color" value={self.light.clone()} oninput={on_light} />
                        </label>
                        <label class="field" for="error-level">
                            <span>{ "Error correction" }</span>
                            <select id="error-level" onchange={on_correction}>
                                { for CORRECTION_LEVELS.iter().map(|(value, label)| html! {
                                    <option value={*value} selected={self.correction == *value}>{ *label }</option>
                                }) }
                            </select>
                        </label>
                    </div>
                    <label class="field toggle" for="auto-generate">
                        <input
                            id="auto-generate"
                            type="checkbox"
                            checked={self.auto_generate}
                            onclick={ctx.link().callback(|_: MouseEvent| Msg::ToggleAuto)}
                        />
                        <span>{ "Generate automatically while typing" }</span>
                    </label>

                    <div class="actions">
                        <button class="action primary" onclick={ctx.link().callback(|_: MouseEvent| Msg::Generate)}>
                            { "Generate QR code" }
                        </button>
                        <button class="action" onclick={ctx.link().callback(|_: MouseEvent| Msg::Reset)}>
                            { "Reset" }
                        </button>
                    </div>
                </section>

                <section class="panel output">
                    {
                        match &self.image {
                            Some(image) => html! {
                                <img class="qr" src={image.data_url.clone()} alt="Generated QR code" />
                            },
                            None => html! {
                                <div class="qr placeholder">{ "Your QR code will appear here." }</div>
                            },
                        }
                    }
                    <pre class="preview">{ preview_text }</pre>
                    <p class="status" data-tone={self.status.tone.as_str()}>{ self.status.text.clone() }</p>
                    <div class="actions">
                        <button class="action" onclick={ctx.link().callback(|_: MouseEvent| Msg::CopyPayload)}>
                            { "Copy payload" }
                        </button>
                        <button
                            class="action"
                            disabled={!self.image_copy_supported}
                            onclick={ctx.link().callback(|_: MouseEvent| Msg::CopyImage)}
                        >
                            { copy_image_label }
                        </button>
                        <a
                            class={download_class}
                            download="qr-code.png"
                            href={download_href}
                            aria-disabled={self.image.is_none().to_string()}
                        >
                            { "Download PNG" }
                        </a>
                    </div>
                </section>
            </main>
        }
    }
}

impl App {
    fn current_payload(&self) -> String {
        payload::encode(self.content_type, &self.fields)
    }

    /// (Re)starts the single debounce window; an edit inside the quiet
    /// period cancels the previous timer, so rapid edits collapse to one
    /// refresh timed from the last of them.
    fn schedule_preview(&mut self, ctx: &Context<Self>) {
        self.cancel_preview();
        let link = ctx.link().clone();
        let closure = Closure::wrap(
            Box::new(move || link.send_message(Msg::DebounceElapsed)) as Box<dyn FnMut()>
        );
        let handle = web_sys::window()
            .expect("no window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                DEBOUNCE_MS,
            )
            .expect("failed to schedule preview refresh");
        self.pending_preview = Some(PendingPreview { handle, _closure: closure });
    }

    fn cancel_preview(&mut self) {
        if let Some(pending) = self.pending_preview.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(pending.handle);
            }
        }
    }

    /// Explicit generation: synchronous, never debounced. An empty payload is
    /// a validation failure and leaves any previously rendered image alone;
    /// otherwise the old image is dropped before rendering so a failure shows
    /// the placeholder, never a stale code.
    fn generate(&mut self) {
        let payload = self.current_payload();
        self.preview = payload.clone();
        if payload.is_empty() {
            self.status = Status::error("Add content to generate a QR code.");
            return;
        }
        self.image = None;
        let options = RenderOptions {
            payload,
            size_px: self.size,
            dark: self.dark.clone(),
            light: self.light.clone(),
            ecc: EccLevel::from_label(&self.correction),
        };
        match self.renderer.render(&options) {
            Ok(image) => {
                self.image = Some(image);
                self.status = Status::success("QR code ready to download.");
            }
            Err(err) => {
                log_error(&format!("render failed: {err}"));
                self.status = Status::error(err.to_string());
            }
        }
    }

    fn reset(&mut self) {
        self.cancel_preview();
        self.content_type = ContentType::Url;
        self.fields = FormFields::default();
        self.size = DEFAULT_SIZE;
        self.dark = DEFAULT_DARK.to_owned();
        self.light = DEFAULT_LIGHT.to_owned();
        self.correction = DEFAULT_CORRECTION.to_owned();
        self.auto_generate = false;
        self.preview = String::new();
        self.image = None;
        self.status = Status::info("Form reset. Ready for a new QR code.");
    }

    fn copy_payload(&mut self, ctx: &Context<Self>) {
        let payload = self.current_payload();
        if payload.is_empty() {
            self.status = Status::error("Add content before copying the payload.");
            return;
        }
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let status = match clipboard::write_text(&payload).await {
                Ok(()) => Status::success("Payload copied to clipboard."),
                Err(err) => Status::error(err.to_string()),
            };
            link.send_message(Msg::StatusUpdate(status));
        });
    }

    fn copy_image(&mut self, ctx: &Context<Self>) {
        if !self.image_copy_supported {
            self.status = Status::error("Image copy is not supported in this browser.");
            return;
        }
        let Some(image) = self.image.clone() else {
            self.status = Status::error("Generate a QR code before copying.");
            return;
        };
        let link = ctx.link().clone();
        wasm_bindgen_futures::spawn_local(async move {
            let status = match export_png(&image).await {
                Ok(blob) => match clipboard::write_image(&blob).await {
                    Ok(()) => Status::success("QR image copied to clipboard."),
                    Err(err) => {
                        log_error(&format!("image copy failed: {err}"));
                        Status::error(err.to_string())
                    }
                },
                Err(err) => {
                    log_error(&format!("image export failed: {err}"));
                    Status::error(err.to_string())
                }
            };
            link.send_message(Msg::StatusUpdate(status));
        });
    }

    fn text_input(
        &self,
        ctx: &Context<Self>,
        field: Field,
        id: &'static str,
        label: &'static str,
        placeholder: &'static str,
        value: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Edit(field, input.value())
        });
        html! {
            <label class="field" for={id}>
                <span>{ label }</span>
                <input id={id} type="text" value={value.to_owned()} placeholder={placeholder} {oninput} />
            </label>
        }
    }

    fn text_area(
        &self,
        ctx: &Context<Self>,
        field: Field,
        id: &'static str,
        label: &'static str,
        value: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::Edit(field, area.value())
        });
        html! {
            <label class="field" for={id}>
                <span>{ label }</span>
                <textarea id={id} rows="3" value={value.to_owned()} {oninput} />
            </label>
        }
    }

    /// Exactly one field group is rendered: the one matching the current
    /// content type. Switching types swaps the whole group.
    fn view_fields(&self, ctx: &Context<Self>) -> Html {
        match self.content_type {
            ContentType::Url => html! {
                <div class="group">
                    { self.text_input(ctx, Field::Url, "url", "URL", "https://example.com", &self.fields.url) }
                </div>
            },
            ContentType::Text => html! {
                <div class="group">
                    { self.text_area(ctx, Field::Text, "text", "Text", &self.fields.text) }
                </div>
            },
            ContentType::Wifi => {
                let on_encryption = ctx.link().callback(|e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    Msg::Edit(Field::WifiEncryption, select.value())
                });
                html! {
                    <div class="group">
                        { self.text_input(ctx, Field::WifiSsid, "wifi-ssid", "Network name (SSID)", "", &self.fields.wifi.ssid) }
                        { self.text_input(ctx, Field::WifiPassword, "wifi-password", "Password", "", &self.fields.wifi.password) }
                        <label class="field" for="wifi-encryption">
                            <span>{ "Encryption" }</span>
                            <select id="wifi-encryption" onchange={on_encryption}>
                                <option value="WPA" selected={self.fields.wifi.encryption == "WPA"}>{ "WPA/WPA2" }</option>
                                <option value="WEP" selected={self.fields.wifi.encryption == "WEP"}>{ "WEP" }</option>
                                <option value="nopass" selected={self.fields.wifi.encryption == "nopass"}>{ "None" }</option>
                            </select>
                        </label>
                        <label class="field toggle" for="wifi-hidden">
                            <input
                                id="wifi-hidden"
                                type="checkbox"
                                checked={self.fields.wifi.hidden}
                                onclick={ctx.link().callback(|_: MouseEvent| Msg::ToggleHidden)}
                            />
                            <span>{ "Hidden network" }</span>
                        </label>
                    </div>
                }
            }
            ContentType::Email => html! {
                <div class="group">
                    { self.text_input(ctx, Field::EmailTo, "email-to", "Recipient", "name@example.com", &self.fields.email.to) }
                    { self.text_input(ctx, Field::EmailSubject, "email-subject", "Subject", "", &self.fields.email.subject) }
                    { self.text_area(ctx, Field::EmailBody, "email-body", "Body", &self.fields.email.body) }
                </div>
            },
            ContentType::Sms => html! {
                <div class="group">
                    { self.text_input(ctx, Field::SmsNumber, "sms-number", "Phone number", "+1 555 0100", &self.fields.sms.number) }
                    { self.text_area(ctx, Field::SmsMessage, "sms-message", "Message", &self.fields.sms.message) }
                </div>
            },
            ContentType::Phone => html! {
                <div class="group">
                    { self.text_input(ctx, Field::PhoneNumber, "phone-number", "Phone number", "+1 555 0100", &self.fields.phone) }
                </div>
            },
        }
    }
}
