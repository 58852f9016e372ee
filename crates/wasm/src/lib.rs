//! JavaScript bindings for a glide carousel.
//!
//! The DOM host owns the elements and event listeners; this bridge owns the
//! state. A typical binding:
//!
//! ```text
//! container.addEventListener("mousedown", e => c.pointerDown(e.clientX, e.clientY, "mouse"));
//! window.addEventListener("mousemove", e => c.pointerMove(e.clientX, e.clientY, "mouse"));
//! window.addEventListener("mouseup", () => c.pointerUp("mouse"));
//! container.addEventListener("touchmove", e => {
//!   const t = e.touches[0];
//!   if (c.pointerMove(t.clientX, t.clientY, "touch")) e.preventDefault();
//! }, { passive: false });
//! ```
//!
//! After each call the host applies `offset()` as the strip's `translateX`
//! and `transitionCss()` as its CSS `transition`.

use glide_core::render::{hit_test, render_carousel};
use glide_core::svg::render_svg;
use glide_core::{Carousel, CarouselConfig, NativeScroll, PointerEvent, PointerSource};
use glide_protocol::{HitTarget, Point};
use wasm_bindgen::prelude::*;

fn parse_source(source: &str) -> Result<PointerSource, JsError> {
    match source {
        "touch" => Ok(PointerSource::Touch),
        "mouse" | "pen" => Ok(PointerSource::Mouse),
        other => Err(JsError::new(&format!("unknown pointer source: {other}"))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

/// A mounted carousel. Drop it (`free()`) on unmount; nothing persists.
#[wasm_bindgen]
pub struct GlideCarousel {
    inner: Carousel,
}

#[wasm_bindgen]
impl GlideCarousel {
    /// Mount a carousel from a JSON config such as
    /// `{"item_width": 300, "gap": 16, "show_prev_control": true}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, item_count: usize) -> Result<GlideCarousel, JsError> {
        console_error_panic_hook::set_once();
        let config =
            CarouselConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            inner: Carousel::new(config, item_count),
        })
    }

    /// `touchstart` / `mousedown` inside the container.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, source: &str) -> Result<bool, JsError> {
        let source = parse_source(source)?;
        Ok(self.dispatch(PointerEvent::Down {
            position: Point::new(x, y),
            source,
        }))
    }

    /// `touchmove` / global `mousemove`. Returns `true` when the host must
    /// call `preventDefault()` to keep the page from scrolling.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, source: &str) -> Result<bool, JsError> {
        let source = parse_source(source)?;
        Ok(self.dispatch(PointerEvent::Move {
            position: Point::new(x, y),
            source,
        }))
    }

    /// `touchend` / global `mouseup`.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, source: &str) -> Result<bool, JsError> {
        let source = parse_source(source)?;
        Ok(self.dispatch(PointerEvent::Up { source }))
    }

    /// `touchcancel`: ends the gesture without momentum.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, source: &str) -> Result<bool, JsError> {
        let source = parse_source(source)?;
        Ok(self.dispatch(PointerEvent::Cancel { source }))
    }

    /// Container resize (e.g. from a `ResizeObserver`).
    pub fn resize(&mut self, width: f64) {
        self.inner.set_viewport_width(width);
    }

    #[wasm_bindgen(js_name = setItemCount)]
    pub fn set_item_count(&mut self, item_count: usize) {
        self.inner.set_item_count(item_count);
    }

    /// Replace the layout config, e.g. on a breakpoint change.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsError> {
        let config =
            CarouselConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?;
        self.inner.set_config(config);
        Ok(())
    }

    #[wasm_bindgen(js_name = scrollLeft)]
    pub fn scroll_left(&mut self) -> bool {
        self.inner.scroll_left()
    }

    #[wasm_bindgen(js_name = scrollRight)]
    pub fn scroll_right(&mut self) -> bool {
        self.inner.scroll_right()
    }

    /// Route a click at container-local `(x, y)` to a prev/next control.
    /// Returns whether a control was hit.
    pub fn click(&mut self, x: f64, y: f64, height: f64) -> bool {
        let commands = render_carousel(&self.inner, height);
        match hit_test(&commands, Point::new(x, y)) {
            Some(HitTarget::PrevControl) => {
                self.inner.scroll_left();
                true
            }
            Some(HitTarget::NextControl) => {
                self.inner.scroll_right();
                true
            }
            None => false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    #[wasm_bindgen(js_name = maxOffset)]
    pub fn max_offset(&self) -> f64 {
        self.inner.max_offset()
    }

    #[wasm_bindgen(js_name = visibleCount)]
    pub fn visible_count(&self) -> usize {
        self.inner.visible_count()
    }

    #[wasm_bindgen(js_name = showPrev)]
    pub fn show_prev(&self) -> bool {
        self.inner.show_prev()
    }

    #[wasm_bindgen(js_name = showNext)]
    pub fn show_next(&self) -> bool {
        self.inner.show_next()
    }

    /// Current gesture phase as a snake_case string.
    pub fn phase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    /// CSS `transition` value for the item strip.
    #[wasm_bindgen(js_name = transitionCss)]
    pub fn transition_css(&self) -> String {
        self.inner.transition().css()
    }

    /// Render commands for the current state, as JSON.
    pub fn render(&self, height: f64) -> Result<String, JsError> {
        to_json(&render_carousel(&self.inner, height))
    }

    /// Static SVG snapshot; `labels_json` is a JSON array of card captions.
    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self, height: f64, labels_json: &str, dark: bool) -> Result<String, JsError> {
        let labels: Vec<String> =
            serde_json::from_str(labels_json).map_err(|e| JsError::new(&e.to_string()))?;
        let commands = render_carousel(&self.inner, height);
        Ok(render_svg(
            &commands,
            self.inner.viewport_width(),
            height,
            &labels,
            dark,
        ))
    }
}

impl GlideCarousel {
    fn dispatch(&mut self, event: PointerEvent) -> bool {
        self.inner.handle(event) == NativeScroll::Suppress
    }
}
