//! WebAssembly bindings: DOM wiring, asset loading and paint loops.
//!
//! [`Gallery`] is the page's entry point. For each frame in the manifest
//! it finds the container element, registers the frame with the
//! [`FrameController`], attaches pointer/wheel listeners, asks the
//! [`PresentationHost`] to load the asset and, once loaded, starts a
//! paint loop that hands the host a snapshot on every display refresh.
//!
//! Everything runs on the browser's main thread, so shared state is
//! `Rc<RefCell<..>>`. Listeners, futures and paint loops only hold weak
//! references; dropping the gallery (or removing a frame) detaches them.

// wasm-bindgen expansions spell out full paths.
#![allow(unused_qualifications)]

mod host;
mod listener;
mod paint;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use host::PresentationHost;
use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, MouseEvent, ScrollBehavior, ScrollToOptions,
    WheelEvent,
};

use self::listener::Listener;
use self::paint::PaintLoop;
use crate::error::VitrineError;
use crate::frame::{FrameController, FrameId, FrameSlot};
use crate::input::{EventResponse, InputEvent, PointerButton};
use crate::options::{FrameSpec, Options};
use crate::util::FrameTiming;

/// Paint ticks between FPS log lines.
const PAINT_LOG_INTERVAL: u64 = 600;

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// DOM wiring of one mounted frame.
struct FrameWiring {
    _listeners: Vec<Listener>,
    _paint: Option<PaintLoop>,
}

struct Shared {
    controller: RefCell<FrameController>,
    options: Options,
    host: PresentationHost,
    document: Document,
    carousel: Option<Element>,
    overlay: Option<Element>,
    frames: RefCell<FxHashMap<FrameId, FrameWiring>>,
}

/// The interactive frame carousel, as seen from JavaScript.
///
/// ```js
/// const gallery = new Gallery(new ThreeHost(), null);
/// gallery.mount();
/// ```
#[wasm_bindgen]
pub struct Gallery {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Gallery {
    /// Create a gallery driving `host`. `options_json` overrides the
    /// default options (same shape as the TOML file).
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: PresentationHost,
        options_json: Option<String>,
    ) -> Result<Gallery, JsValue> {
        let options = match options_json {
            Some(json) => Options::from_json(&json).map_err(to_js)?,
            None => Options::default(),
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no global document"))?;

        let carousel =
            document.query_selector(&options.gallery.carousel_selector)?;
        if carousel.is_none() {
            log::warn!(
                "carousel '{}' not found; wheel scrolling disabled",
                options.gallery.carousel_selector
            );
        }
        let overlay = if options.gallery.debug_overlay {
            Some(debug_overlay(&document)?)
        } else {
            None
        };

        let viewport = serde_json::to_string(&options.viewport)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        host.configure(&viewport)
            .map_err(|e| to_js(VitrineError::Web(describe(&e))))?;

        Ok(Self {
            shared: Rc::new(Shared {
                controller: RefCell::new(FrameController::new(
                    options.interaction,
                )),
                options,
                host,
                document,
                carousel,
                overlay,
                frames: RefCell::new(FxHashMap::default()),
            }),
        })
    }

    /// JSON Schema of the tunable option sections, for settings panels.
    #[wasm_bindgen(js_name = optionsSchema)]
    pub fn options_schema() -> Result<String, JsValue> {
        serde_json::to_string(&Options::json_schema())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Mount every frame of the manifest.
    pub fn mount(&self) -> Result<(), JsValue> {
        for spec in &self.shared.options.gallery.frames {
            Shared::add_frame(&self.shared, spec)?;
        }
        Ok(())
    }

    /// Mount one extra frame outside the manifest.
    #[wasm_bindgen(js_name = addFrame)]
    pub fn add_frame(
        &self,
        frame_id: String,
        asset: String,
        scale: Option<f32>,
        orientation: Option<Vec<f32>>,
    ) -> Result<(), JsValue> {
        let mut spec = FrameSpec::new(frame_id, asset);
        spec.scale = scale;
        spec.orientation = orientation.and_then(|o| <[f32; 3]>::try_from(o).ok());
        Shared::add_frame(&self.shared, &spec)
    }

    /// Detach a frame: listeners and paint loop stop, the host drops its
    /// renderer. Returns whether the frame was mounted.
    #[wasm_bindgen(js_name = removeFrame)]
    pub fn remove_frame(&self, frame_id: &str) -> bool {
        self.shared.remove_frame(frame_id)
    }

    /// Latest snapshot of a loaded frame, as JSON.
    pub fn snapshot(&self, frame_id: &str) -> Option<String> {
        let controller = self.shared.controller.borrow();
        let state = controller.state(frame_id)?;
        serde_json::to_string(&state.snapshot(&self.shared.options.viewport))
            .ok()
    }

    /// Id of the frame under the pointer, if any.
    #[wasm_bindgen(js_name = hoveredFrame)]
    pub fn hovered_frame(&self) -> Option<String> {
        self.shared
            .controller
            .borrow()
            .hovered_frame()
            .map(ToString::to_string)
    }

    /// `"loading"`, `"ready"`, `"failed"` or `"unknown"`.
    #[wasm_bindgen(js_name = frameStatus)]
    pub fn frame_status(&self, frame_id: &str) -> String {
        let status = match self.shared.controller.borrow().slot(frame_id) {
            Some(FrameSlot::Loading) => "loading",
            Some(FrameSlot::Ready(_)) => "ready",
            Some(FrameSlot::Failed(_)) => "failed",
            None => "unknown",
        };
        status.to_owned()
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        let ids: Vec<FrameId> =
            self.shared.controller.borrow().frame_ids().cloned().collect();
        for id in ids {
            let _ = self.shared.remove_frame(id.as_str());
        }
    }
}

impl Shared {
    fn add_frame(this: &Rc<Self>, spec: &FrameSpec) -> Result<(), JsValue> {
        let Some(container) = this.document.get_element_by_id(&spec.id) else {
            log::warn!("no container for frame '{}', skipping", spec.id);
            return Ok(());
        };
        let id = FrameId::new(spec.id.as_str());
        if !this.controller.borrow_mut().register(id.clone()) {
            log::warn!("frame '{id}' is already mounted");
            return Ok(());
        }

        let listeners = match attach_listeners(this, &container, &id) {
            Ok(listeners) => listeners,
            Err(e) => {
                let _ = this.controller.borrow_mut().remove(id.as_str());
                return Err(e);
            }
        };
        let _ = this.frames.borrow_mut().insert(
            id.clone(),
            FrameWiring {
                _listeners: listeners,
                _paint: None,
            },
        );

        Self::spawn_load(this, id, spec, container);
        Ok(())
    }

    fn spawn_load(
        this: &Rc<Self>,
        id: FrameId,
        spec: &FrameSpec,
        container: Element,
    ) {
        let seed = spec.seed(&this.options.gallery);
        let o = seed.orientation;
        let request = this.host.load_frame(
            id.as_str(),
            &spec.asset,
            seed.scale,
            vec![o.x, o.y, o.z],
        );
        let weak = Rc::downgrade(this);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match request {
                Ok(promise) => JsFuture::from(promise).await.map(|_| seed),
                Err(e) => Err(e),
            };
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let outcome = outcome.map_err(|e| VitrineError::AssetUnavailable {
                frame: id.to_string(),
                reason: describe(&e),
            });
            let ready =
                shared.controller.borrow_mut().complete_load(id.as_str(), outcome);
            if !ready {
                return;
            }
            // The enter event fired while loading was dropped; replay it
            // if the pointer is still inside.
            if container.matches(":hover").unwrap_or(false) {
                let _ = shared
                    .controller
                    .borrow_mut()
                    .handle_event(id.as_str(), InputEvent::PointerEnter);
            }
            Self::start_painting(&shared, &id);
        });
    }

    fn start_painting(this: &Rc<Self>, id: &FrameId) {
        let weak: Weak<Self> = Rc::downgrade(this);
        let frame = id.clone();
        let mut timing = FrameTiming::new();
        let paint = PaintLoop::start(move || {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            let snapshot = shared
                .controller
                .borrow()
                .state(frame.as_str())
                .map(|s| s.snapshot(&shared.options.viewport));
            let Some(snapshot) = snapshot else {
                return false;
            };
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    if let Err(e) = shared.host.paint(frame.as_str(), &json) {
                        log::warn!("paint of '{frame}' failed: {}", describe(&e));
                    }
                }
                Err(e) => log::warn!("snapshot of '{frame}' not serializable: {e}"),
            }
            timing.tick();
            if timing.is_nth(PAINT_LOG_INTERVAL) {
                log::debug!("frame '{frame}': {:.1} fps", timing.fps());
            }
            true
        });

        match paint {
            Ok(paint) => {
                if let Some(wiring) = this.frames.borrow_mut().get_mut(id) {
                    wiring._paint = Some(paint);
                }
            }
            Err(e) => log::warn!(
                "paint loop for '{id}' not started: {}",
                describe(&e)
            ),
        }
    }

    fn remove_frame(&self, id: &str) -> bool {
        // Drop listeners and the paint loop before the state goes away.
        let wiring = self.frames.borrow_mut().remove(id);
        drop(wiring);
        let removed = self.controller.borrow_mut().remove(id).is_some();
        if removed {
            if let Err(e) = self.host.drop_frame(id) {
                log::warn!("host failed to drop '{id}': {}", describe(&e));
            }
        }
        removed
    }

    /// Carry out the page-side half of a controller response.
    fn apply(&self, response: &EventResponse, event: &Event) {
        if response.prevents_default() {
            event.prevent_default();
        }
        match response {
            EventResponse::ScrollCarousel { left } => self.scroll_carousel(*left),
            EventResponse::Rotated { .. } => {
                if let (Some(overlay), Some(text)) =
                    (&self.overlay, response.diagnostic())
                {
                    overlay.set_text_content(Some(&text));
                }
            }
            _ => {}
        }
    }

    fn scroll_carousel(&self, left: f32) {
        let Some(carousel) = &self.carousel else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(f64::from(left));
        options.set_behavior(ScrollBehavior::Smooth);
        carousel.scroll_by_with_scroll_to_options(&options);
    }
}

/// Attach the six listeners that feed a frame's events to the controller.
fn attach_listeners(
    shared: &Rc<Shared>,
    container: &Element,
    id: &FrameId,
) -> Result<Vec<Listener>, JsValue> {
    Ok(vec![
        forward::<MouseEvent>(shared, container, id, "pointerenter", true, |_| {
            InputEvent::PointerEnter
        })?,
        forward::<MouseEvent>(shared, container, id, "pointerleave", true, |_| {
            InputEvent::PointerLeave
        })?,
        forward::<MouseEvent>(shared, container, id, "pointerdown", true, |e| {
            InputEvent::PointerDown {
                button: PointerButton::from_dom(e.button()),
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            }
        })?,
        forward::<MouseEvent>(shared, container, id, "pointerup", true, |_| {
            InputEvent::PointerUp
        })?,
        forward::<MouseEvent>(shared, container, id, "pointermove", true, |e| {
            InputEvent::PointerMove {
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            }
        })?,
        // Not passive: a hovered wheel must be able to cancel page scroll.
        forward::<WheelEvent>(shared, container, id, "wheel", false, |e| {
            InputEvent::Wheel {
                delta_y: e.delta_y() as f32,
            }
        })?,
    ])
}

/// Listen for `event` on `container`, translate it and hand it to the
/// controller on behalf of frame `id`.
fn forward<E>(
    shared: &Rc<Shared>,
    container: &Element,
    id: &FrameId,
    event: &'static str,
    passive: bool,
    translate: impl Fn(&E) -> InputEvent + 'static,
) -> Result<Listener, JsValue>
where
    E: JsCast,
{
    let weak = Rc::downgrade(shared);
    let id = id.clone();
    Listener::new(container, event, passive, move |dom_event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Some(typed) = dom_event.dyn_ref::<E>() else {
            return;
        };
        let input = translate(typed);
        let response =
            shared.controller.borrow_mut().handle_event(id.as_str(), input);
        shared.apply(&response, &dom_event);
    })
}

/// The rotation readout element, created at the bottom of the page if the
/// document does not provide one.
fn debug_overlay(document: &Document) -> Result<Element, JsValue> {
    if let Some(existing) = document.get_element_by_id("debug-overlay") {
        return Ok(existing);
    }
    let overlay = document.create_element("div")?;
    overlay.set_id("debug-overlay");
    overlay.set_class_name("debug-overlay");
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let _ = body.append_child(&overlay)?;
    Ok(overlay)
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[allow(clippy::needless_pass_by_value)]
fn to_js(err: VitrineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
