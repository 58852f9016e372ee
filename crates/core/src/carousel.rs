use glide_protocol::Transition;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CarouselConfig;
use crate::geometry::Geometry;
use crate::gesture::{Effect, Gesture, Phase, PointerEvent};
use crate::momentum;
use crate::navigation;

/// Whether the host must stop the platform's default scroll handling for
/// the event it just delivered.
///
/// DOM hosts satisfy `Suppress` with `preventDefault()` from a non-passive
/// `touchmove` listener (or `touch-action: none`); other hosts disable
/// their own drag-to-scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeScroll {
    Allow,
    Suppress,
}

/// One mounted carousel.
///
/// Owns the scroll offset and is its only writer. Every entry point runs
/// to completion before returning, so the pointer session, the momentum
/// resolver and the navigation controller never interleave writes.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    item_count: usize,
    viewport_width: f64,
    geometry: Geometry,
    offset: f64,
    gesture: Gesture,
    transition: Transition,
}

impl Carousel {
    /// Mount a carousel over `item_count` items. The viewport is unmeasured
    /// (width 0) until the first [`Carousel::set_viewport_width`].
    pub fn new(config: CarouselConfig, item_count: usize) -> Self {
        let geometry = Geometry::measure(&config, item_count, 0.0);
        let transition = Transition::ease_out(config.motion.navigation_ms);
        Self {
            config,
            item_count,
            viewport_width: 0.0,
            geometry,
            offset: 0.0,
            gesture: Gesture::Idle,
            transition,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current committed scroll offset, always in `[-max_offset, 0]`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn max_offset(&self) -> f64 {
        self.geometry.max_offset
    }

    pub fn visible_count(&self) -> usize {
        self.geometry.visible_count
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn phase(&self) -> Phase {
        self.gesture.phase()
    }

    /// Transition the host should use to present the latest commit.
    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn show_prev(&self) -> bool {
        self.config.show_prev_control && navigation::can_scroll_left(self.offset)
    }

    pub fn show_next(&self) -> bool {
        self.config.show_next_control && navigation::can_scroll_right(self.offset, &self.geometry)
    }

    /// Feed one pointer event through the gesture state machine.
    pub fn handle(&mut self, event: PointerEvent) -> NativeScroll {
        let step = self.gesture.step(event, self.offset, &self.geometry);
        self.gesture = step.gesture;

        match step.effect {
            Effect::None | Effect::Yield => {}
            Effect::Grab => self.transition = Transition::Immediate,
            Effect::Pan { offset } => self.offset = offset,
            Effect::Release { fling: Some(velocity) } => self.apply_momentum(velocity),
            Effect::Release { fling: None } => self.transition = self.resting_transition(),
        }

        if self.gesture.suppresses_native_scroll() {
            NativeScroll::Suppress
        } else {
            NativeScroll::Allow
        }
    }

    /// End any in-flight gesture without momentum, as a platform cancel
    /// would.
    pub fn cancel_gesture(&mut self) {
        if let Some(session) = self.gesture.session() {
            let source = session.source;
            self.handle(PointerEvent::Cancel { source });
        }
    }

    /// Page one stride toward the start. Returns whether the offset moved.
    ///
    /// Ignored while a gesture is active.
    pub fn scroll_left(&mut self) -> bool {
        if self.navigation_blocked() {
            return false;
        }
        let target = navigation::scroll_left(self.offset, self.config.stride(), &self.geometry);
        self.commit_navigation(target)
    }

    /// Page one stride toward the end. Returns whether the offset moved.
    ///
    /// Ignored while a gesture is active.
    pub fn scroll_right(&mut self) -> bool {
        if self.navigation_blocked() {
            return false;
        }
        let target = navigation::scroll_right(self.offset, self.config.stride(), &self.geometry);
        self.commit_navigation(target)
    }

    /// Resize signal from the host. Re-derives the limits and re-clamps.
    ///
    /// Non-finite or negative widths are stored as 0.
    pub fn set_viewport_width(&mut self, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        self.recompute();
    }

    /// The caller re-rendered with a different number of items.
    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count == self.item_count {
            return;
        }
        self.item_count = item_count;
        if item_count == 0 && self.gesture.is_active() {
            debug!("item list emptied mid-gesture, aborting session");
            self.gesture = Gesture::Idle;
            self.transition = self.resting_transition();
        }
        self.recompute();
    }

    /// Swap layout parameters, e.g. on a responsive breakpoint change.
    pub fn set_config(&mut self, config: CarouselConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.geometry = Geometry::measure(&self.config, self.item_count, self.viewport_width);
        let clamped = self.geometry.clamp(self.offset);
        if clamped != self.offset {
            debug!(
                from = self.offset,
                to = clamped,
                max_offset = self.geometry.max_offset,
                "re-clamped offset"
            );
            self.offset = clamped;
        }
    }

    fn apply_momentum(&mut self, velocity: f64) {
        let target = momentum::project(
            self.offset,
            velocity,
            self.config.motion.momentum_multiplier,
            &self.geometry,
        );
        debug!(velocity, from = self.offset, to = target, "momentum");
        self.offset = target;
        self.transition = Transition::ease_out(self.config.motion.momentum_ms);
    }

    fn navigation_blocked(&self) -> bool {
        if self.gesture.is_active() {
            debug!(phase = ?self.phase(), "navigation ignored during gesture");
            return true;
        }
        false
    }

    fn commit_navigation(&mut self, target: f64) -> bool {
        let moved = target != self.offset;
        debug!(from = self.offset, to = target, "navigate");
        self.offset = target;
        self.transition = Transition::ease_out(self.config.motion.navigation_ms);
        moved
    }

    fn resting_transition(&self) -> Transition {
        Transition::ease_out(self.config.motion.navigation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerSource;
    use glide_protocol::Point;

    fn carousel(items: usize, width: f64) -> Carousel {
        let mut c = Carousel::new(CarouselConfig::new(300.0, 16.0).unwrap(), items);
        c.set_viewport_width(width);
        c
    }

    fn down(x: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, 0.0),
            source: PointerSource::Mouse,
        }
    }

    fn mv(x: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, 0.0),
            source: PointerSource::Mouse,
        }
    }

    const UP: PointerEvent = PointerEvent::Up {
        source: PointerSource::Mouse,
    };

    #[test]
    fn transitions_follow_gesture_lifecycle() {
        let mut c = carousel(10, 1000.0);
        assert_eq!(c.transition(), Transition::ease_out(300));

        c.handle(down(500.0));
        assert_eq!(c.transition(), Transition::Immediate);
        assert_eq!(c.handle(mv(480.0)), NativeScroll::Suppress);
        assert_eq!(c.offset(), -20.0);
        assert_eq!(c.transition(), Transition::Immediate);

        assert_eq!(c.handle(UP), NativeScroll::Allow);
        assert_eq!(c.offset(), -20.0 - 20.0 * 15.0);
        assert_eq!(c.transition(), Transition::ease_out(500));
    }

    #[test]
    fn navigation_is_ignored_mid_gesture() {
        let mut c = carousel(10, 1000.0);
        c.handle(down(500.0));
        assert!(!c.scroll_right());
        assert_eq!(c.offset(), 0.0);
        c.handle(UP);
        assert!(c.scroll_right());
        assert_eq!(c.offset(), -316.0);
        assert_eq!(c.transition(), Transition::ease_out(300));
    }

    #[test]
    fn emptying_list_mid_drag_aborts_session() {
        let mut c = carousel(10, 1000.0);
        c.handle(down(500.0));
        c.handle(mv(300.0));
        assert_eq!(c.offset(), -200.0);

        c.set_item_count(0);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.max_offset(), 0.0);
        assert!(!c.show_prev() && !c.show_next());

        // The rest of the interrupted gesture is harmless.
        assert_eq!(c.handle(mv(100.0)), NativeScroll::Allow);
        c.handle(UP);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn resize_keeps_valid_offset_in_place() {
        let mut c = carousel(10, 1000.0);
        c.scroll_right();
        c.scroll_right();
        assert_eq!(c.offset(), -632.0);
        c.set_viewport_width(1200.0);
        assert_eq!(c.offset(), -632.0);
        c.set_viewport_width(3000.0);
        assert_eq!(c.offset(), -144.0);
    }

    #[test]
    fn breakpoint_config_change_reclamps() {
        let mut c = carousel(10, 1000.0);
        for _ in 0..20 {
            c.scroll_right();
        }
        assert_eq!(c.offset(), -2144.0);
        c.set_config(CarouselConfig::new(200.0, 16.0).unwrap());
        assert_eq!(c.max_offset(), 10.0 * 200.0 + 9.0 * 16.0 - 1000.0);
        assert_eq!(c.offset(), -c.max_offset());
    }

    #[test]
    fn control_flags_gate_affordances() {
        let config = CarouselConfig::new(300.0, 16.0)
            .unwrap()
            .with_controls(false, true);
        let mut c = Carousel::new(config, 10);
        c.set_viewport_width(1000.0);
        c.scroll_right();
        assert!(!c.show_prev());
        assert!(c.show_next());
    }

    #[test]
    fn cancel_gesture_skips_momentum() {
        let mut c = carousel(10, 1000.0);
        c.handle(down(500.0));
        c.handle(mv(450.0));
        c.cancel_gesture();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.offset(), -50.0);
        assert_eq!(c.transition(), Transition::ease_out(300));
    }

    #[test]
    fn unusable_viewport_widths_store_as_zero() {
        for width in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -40.0] {
            let mut c = carousel(3, 500.0);
            c.set_viewport_width(width);
            assert_eq!(c.viewport_width(), 0.0, "width {width}");
            assert_eq!(c.max_offset(), 3.0 * 300.0 + 2.0 * 16.0);
        }
    }
}
