//! Presentation-side easing of the item strip.
//!
//! The carousel commits final offsets; hosts without a CSS transition
//! engine use an [`Animator`] to slide the *displayed* strip toward each
//! commit. The animator reads committed offsets and never writes them.

use glide_protocol::Transition;

#[derive(Debug, Clone)]
pub struct Animator {
    displayed: f64,
    from: f64,
    target: f64,
    elapsed_ms: f64,
    transition: Transition,
}

impl Animator {
    pub fn new(offset: f64) -> Self {
        Self {
            displayed: offset,
            from: offset,
            target: offset,
            elapsed_ms: 0.0,
            transition: Transition::Immediate,
        }
    }

    /// Feed the latest committed offset and the transition it was
    /// committed with. A no-op when neither changed.
    pub fn retarget(&mut self, target: f64, transition: Transition) {
        if target == self.target && transition == self.transition {
            return;
        }
        self.target = target;
        self.transition = transition;
        self.from = self.displayed;
        self.elapsed_ms = 0.0;
        if transition == Transition::Immediate {
            self.displayed = target;
            self.from = target;
        }
    }

    /// Advance by `dt_ms` and return the displayed offset.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        match self.transition {
            Transition::Immediate => self.displayed = self.target,
            Transition::Eased {
                duration_ms,
                easing,
            } => {
                self.elapsed_ms += dt_ms.max(0.0);
                let t = if duration_ms == 0 {
                    1.0
                } else {
                    self.elapsed_ms / f64::from(duration_ms)
                };
                self.displayed = if t >= 1.0 {
                    self.target
                } else {
                    self.from + (self.target - self.from) * easing.sample(t)
                };
            }
        }
        self.displayed
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn is_animating(&self) -> bool {
        self.displayed != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_tracks_exactly() {
        let mut a = Animator::new(0.0);
        a.retarget(-40.0, Transition::Immediate);
        assert_eq!(a.displayed(), -40.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn eased_settles_on_target_after_duration() {
        let mut a = Animator::new(-100.0);
        a.retarget(-400.0, Transition::ease_out(500));
        let mid = a.advance(250.0);
        assert!(mid < -100.0 && mid > -400.0);
        // Ease-out covers more than half the distance by the halfway point.
        assert!(mid < -250.0);
        assert!(a.is_animating());
        assert_eq!(a.advance(250.0), -400.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn retarget_mid_flight_starts_from_displayed() {
        let mut a = Animator::new(0.0);
        a.retarget(-316.0, Transition::ease_out(300));
        let shown = a.advance(150.0);
        a.retarget(-632.0, Transition::ease_out(300));
        assert_eq!(a.advance(0.0), shown);
        assert_eq!(a.advance(300.0), -632.0);
    }
}
