//! WASM bridge for Print Swap: exposes the swap engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host forwards DOM
//! pointer and drag events per tile, applies the returned effect lists to
//! the `DataTransfer`, drives `tick` from `requestAnimationFrame`, and
//! renders each tile from `tile_view_json`.

mod logger;

use std::collections::HashMap;

use ps_core::{Entries, ImageId, ImageState, Size, SwapConfig, SwapError};
use ps_editor::{
    DropOutcome, IgnoreReason, MeasuredTile, PrintPage, SwappableTile, TileEffect, TileEvent,
    TileView,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Per-tile interaction state plus its last measured bounds.
struct TileHandle {
    tile: SwappableTile,
    layout: MeasuredTile,
}

/// The main WASM-facing page controller.
///
/// Holds the page orchestrator and one `SwappableTile` per image. All
/// interaction from the host goes through this struct.
#[wasm_bindgen]
pub struct SwapBoard {
    page: PrintPage,
    tiles: HashMap<ImageId, TileHandle>,
}

#[derive(Serialize)]
struct DropResponse<'a> {
    effects: &'a [TileEffect],
    outcome: &'static str,
}

#[wasm_bindgen]
impl SwapBoard {
    /// Create a controller from the entries JSON and an optional config
    /// JSON (empty string means defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(entries_json: &str, config_json: &str) -> Result<SwapBoard, JsValue> {
        console_error_panic_hook_setup();
        logger::init(log::LevelFilter::Info);

        let entries = Entries::from_json(entries_json).map_err(to_js_error)?;
        let config = if config_json.trim().is_empty() {
            SwapConfig::default()
        } else {
            SwapConfig::from_json(config_json).map_err(to_js_error)?
        };
        config.validate().map_err(to_js_error)?;
        log::info!(
            "swap board ready: {} entries, {} tiles",
            entries.len(),
            entries.tile_count()
        );
        Ok(Self::from_parts(entries, config))
    }

    /// Set the console log level (`"off"`, `"error"`, ..., `"trace"`).
    /// Returns `false` for an unknown level name.
    pub fn set_log_level(&mut self, level: &str) -> bool {
        match logger::parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                true
            }
            None => false,
        }
    }

    // ─── Tile events ─────────────────────────────────────────────────────

    /// `pointerdown` on a tile. Bounds are the tile's client rect.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        image: &str,
        client_x: f64,
        client_y: f64,
        button: i16,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> String {
        self.measure(image, MeasuredTile::new(left, top, width, height));
        self.dispatch(
            image,
            &TileEvent::from_pointer_down(client_x, client_y, button),
        )
    }

    pub fn handle_pointer_up(&mut self, image: &str, client_x: f64, client_y: f64) -> String {
        self.dispatch(image, &TileEvent::from_pointer_up(client_x, client_y))
    }

    pub fn handle_drag_start(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragStart)
    }

    pub fn handle_drag_enter(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragEnter)
    }

    pub fn handle_drag_leave(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragLeave)
    }

    pub fn handle_drag_over(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragOver)
    }

    pub fn handle_drag_end(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragEnd)
    }

    pub fn handle_drag_exit(&mut self, image: &str) -> String {
        self.dispatch(image, &TileEvent::DragExit)
    }

    /// `drop` on the tile showing `image`. `payload` is the `text/plain`
    /// drag data. Returns `{"effects": [...], "outcome": "..."}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_drop(
        &mut self,
        image: &str,
        payload: &str,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        now_ms: f64,
    ) -> String {
        let Some(target) = self.resolve(image) else {
            log::debug!("drop on unknown tile {image:?} ignored");
            return r#"{"effects":[],"outcome":"unknown-image"}"#.to_string();
        };
        self.handle_for(target).layout = MeasuredTile::new(left, top, width, height);
        let effects = self.handle_event(
            target,
            &TileEvent::from_drop(client_x, client_y, payload),
        );

        let outcome = effects
            .iter()
            .find_map(|effect| match effect {
                TileEffect::Dropped(info) => Some(self.page.on_drop(target, *info, now_ms)),
                _ => None,
            })
            .map_or("none", outcome_name);

        serde_json::to_string(&DropResponse {
            effects: &effects,
            outcome,
        })
        .unwrap_or_else(|_| r#"{"effects":[],"outcome":"none"}"#.to_string())
    }

    // ─── Clock ───────────────────────────────────────────────────────────

    /// Advance the clock. Returns `true` when a swap committed, so the
    /// host knows to re-read `entries_json`.
    pub fn tick(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        self.advance(now_ms).map_err(to_js_error)
    }

    /// Abort the in-flight swap, if any.
    pub fn cancel_pending(&mut self) -> bool {
        self.page.cancel_pending()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn entries_json(&self) -> String {
        self.page
            .entries()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// `null` for an image that is not on the page.
    pub fn image_state_json(&self, image: &str) -> String {
        serde_json::to_string(&self.state_of(image)).unwrap_or_else(|_| "null".to_string())
    }

    /// Full render description for one tile, `null` if it is not on the page.
    pub fn tile_view_json(&self, image: &str) -> String {
        serde_json::to_string(&self.view_of(image)).unwrap_or_else(|_| "null".to_string())
    }

    /// JSON of the config in effect, defaults filled in.
    pub fn config_json(&self) -> String {
        serde_json::to_string(self.page.config()).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Undo / Redo ─────────────────────────────────────────────────────

    /// Undo the last committed swap. Returns `true` if the entries changed.
    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.page
            .undo()
            .map(|record| record.is_some())
            .map_err(to_js_error)
    }

    /// Redo the last undone swap. Returns `true` if the entries changed.
    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.page
            .redo()
            .map(|record| record.is_some())
            .map_err(to_js_error)
    }

    pub fn can_undo(&self) -> bool {
        self.page.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.page.can_redo()
    }
}

// ─── Internal ────────────────────────────────────────────────────────────

impl SwapBoard {
    fn from_parts(entries: Entries, config: SwapConfig) -> Self {
        Self {
            page: PrintPage::new(entries, config),
            tiles: HashMap::new(),
        }
    }

    fn handle_for(&mut self, image: ImageId) -> &mut TileHandle {
        let config = self.page.config();
        let (width, height) = (config.tile_width, config.tile_height);
        self.tiles.entry(image).or_insert_with(|| TileHandle {
            tile: SwappableTile::new(),
            layout: MeasuredTile::new(0.0, 0.0, width, height),
        })
    }

    /// Id of a tile currently on the page. Host strings naming anything
    /// else are never interned and never get a handle.
    fn resolve(&self, image: &str) -> Option<ImageId> {
        ImageId::lookup(image).filter(|&id| self.page.entries().locate(id).is_some())
    }

    fn measure(&mut self, image: &str, layout: MeasuredTile) {
        if let Some(id) = self.resolve(image) {
            self.handle_for(id).layout = layout;
        }
    }

    fn dispatch(&mut self, image: &str, event: &TileEvent) -> String {
        let Some(id) = self.resolve(image) else {
            log::debug!("event for unknown tile {image:?} ignored");
            return "[]".to_string();
        };
        let effects = self.handle_event(id, event);
        serde_json::to_string(&effects).unwrap_or_else(|_| "[]".to_string())
    }

    fn handle_event(&mut self, image: ImageId, event: &TileEvent) -> Vec<TileEffect> {
        let state = self.page.image_state_of(image);
        let config = self.page.config().clone();
        let handle = self.handle_for(image);
        handle.tile.handle(event, &state, &handle.layout, &config)
    }

    fn advance(&mut self, now_ms: f64) -> Result<bool, SwapError> {
        Ok(self.page.tick(now_ms)?.is_some())
    }

    fn state_of(&self, image: &str) -> Option<ImageState> {
        self.resolve(image).map(|id| self.page.image_state_of(id))
    }

    fn view_of(&self, image: &str) -> Option<TileView> {
        let id = self.resolve(image)?;
        let config = self.page.config();
        let state = self.page.image_state_of(id);
        Some(match self.tiles.get(&id) {
            Some(handle) => TileView::build(&state, &handle.tile, handle.layout.size, config),
            None => TileView::build(
                &state,
                &SwappableTile::new(),
                Size::new(config.tile_width, config.tile_height),
                config,
            ),
        })
    }
}

fn outcome_name(outcome: DropOutcome) -> &'static str {
    match outcome {
        DropOutcome::Accepted(_) => "accepted",
        DropOutcome::Ignored(IgnoreReason::SelfDrop) => "self-drop",
        DropOutcome::Ignored(IgnoreReason::SwapInFlight) => "swap-in-flight",
        DropOutcome::Ignored(IgnoreReason::UnknownImage) => "unknown-image",
    }
}

fn to_js_error(err: SwapError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Print Swap WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
