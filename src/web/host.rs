use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// JavaScript object that owns each frame's scene, camera and renderer.
    ///
    /// It loads assets and paints snapshots; it never interprets input.
    /// See `public/host.js` for the three.js implementation.
    pub type PresentationHost;

    /// Receive the viewport options (JSON) before any frame loads.
    #[wasm_bindgen(method, catch)]
    pub fn configure(
        this: &PresentationHost,
        viewport_json: &str,
    ) -> Result<(), JsValue>;

    /// Start loading a frame's asset. The promise resolves once the model
    /// is in the scene and rejects if the asset is unavailable.
    #[wasm_bindgen(method, catch, js_name = loadFrame)]
    pub fn load_frame(
        this: &PresentationHost,
        frame_id: &str,
        asset_path: &str,
        scale: f32,
        orientation: Vec<f32>,
    ) -> Result<js_sys::Promise, JsValue>;

    /// Paint one frame from a JSON snapshot.
    #[wasm_bindgen(method, catch)]
    pub fn paint(
        this: &PresentationHost,
        frame_id: &str,
        snapshot_json: &str,
    ) -> Result<(), JsValue>;

    /// Release a frame's renderer after it was removed.
    #[wasm_bindgen(method, catch, js_name = dropFrame)]
    pub fn drop_frame(
        this: &PresentationHost,
        frame_id: &str,
    ) -> Result<(), JsValue>;
}
