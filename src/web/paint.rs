use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::Window;

/// A `requestAnimationFrame` chain bound to a frame's lifetime.
///
/// The tick callback runs once per display refresh until it returns
/// `false` or the loop is dropped; dropping cancels the pending request.
pub(super) struct PaintLoop {
    inner: Rc<PaintInner>,
}

struct PaintInner {
    window: Window,
    /// Pending request id, if a tick is scheduled.
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl PaintLoop {
    /// Schedule the first tick.
    pub(super) fn start(
        mut tick: impl FnMut() -> bool + 'static,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window"))?;
        let inner = Rc::new(PaintInner {
            window,
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak: Weak<PaintInner> = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if tick() {
                inner.schedule();
            }
        });
        *inner.callback.borrow_mut() = Some(callback);
        inner.schedule();

        Ok(Self { inner })
    }
}

impl PaintInner {
    fn schedule(&self) {
        let guard = self.callback.borrow();
        let Some(callback) = guard.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
    }
}

impl Drop for PaintLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.handle.take() {
            let _ = self.inner.window.cancel_animation_frame(handle);
        }
        let _ = self.inner.callback.borrow_mut().take();
    }
}
