//! Pointer session state machine.
//!
//! Touch and mouse input share one machine. A session starts in
//! [`AxisLock::Undecided`], commits to an axis on the first move, and is
//! dropped on release or cancel:
//!
//! ```text
//! Idle --down--> Undecided --move |dx|>|dy|--> HorizontalDrag --move--> HorizontalDrag
//!                          \-move |dx|<=|dy|-> VerticalPassthrough
//! HorizontalDrag | VerticalPassthrough | Undecided --up/cancel--> Idle
//! ```
//!
//! Transitions are pure: [`Gesture::step`] takes the current state, an
//! event and the last committed offset and returns the next state with the
//! [`Effect`] the owner must apply.

use glide_protocol::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    Touch,
    Mouse,
}

/// Raw input, already unified across touch and mouse.
///
/// Hosts emit `Down` only for presses inside the carousel, but `Move`,
/// `Up` and `Cancel` from anywhere, so a mouse drag that leaves the
/// container is still tracked and terminated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        source: PointerSource,
    },
    Move {
        position: Point,
        source: PointerSource,
    },
    Up {
        source: PointerSource,
    },
    Cancel {
        source: PointerSource,
    },
}

impl PointerEvent {
    pub fn source(&self) -> PointerSource {
        match *self {
            Self::Down { source, .. }
            | Self::Move { source, .. }
            | Self::Up { source }
            | Self::Cancel { source } => source,
        }
    }
}

/// Once-per-gesture decision about which axis owns the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisLock {
    Undecided,
    Horizontal,
    Vertical,
}

/// State of one in-flight gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub source: PointerSource,
    pub start: Point,
    pub last_x: f64,
    /// Sum of raw horizontal deltas applied so far (before clamping).
    pub travelled: f64,
    pub axis: AxisLock,
    /// Last raw horizontal delta. Momentum uses this single sample.
    pub velocity: f64,
}

impl DragSession {
    fn begin(position: Point, source: PointerSource) -> Self {
        Self {
            source,
            start: position,
            last_x: position.x,
            travelled: 0.0,
            axis: AxisLock::Undecided,
            velocity: 0.0,
        }
    }

    fn advance(mut self, position: Point, offset: f64, geometry: &Geometry) -> Step {
        match self.axis {
            AxisLock::Undecided => {
                let dx = position.x - self.start.x;
                let dy = position.y - self.start.y;
                if dx.abs() > dy.abs() {
                    debug!(dx, dy, "gesture locked horizontal");
                    self.axis = AxisLock::Horizontal;
                    self.pan(position.x, offset, geometry)
                } else {
                    debug!(dx, dy, "gesture locked vertical, yielding to native scroll");
                    self.axis = AxisLock::Vertical;
                    Step {
                        gesture: Gesture::Active(self),
                        effect: Effect::Yield,
                    }
                }
            }
            AxisLock::Horizontal => self.pan(position.x, offset, geometry),
            AxisLock::Vertical => Step::unchanged(Gesture::Active(self)),
        }
    }

    fn pan(mut self, x: f64, offset: f64, geometry: &Geometry) -> Step {
        let raw = x - self.last_x;
        let committed = geometry.clamp(offset + raw);
        self.velocity = raw;
        self.travelled += raw;
        self.last_x = x;
        trace!(raw, committed, "drag");
        Step {
            gesture: Gesture::Active(self),
            effect: Effect::Pan { offset: committed },
        }
    }
}

/// The gesture half of a carousel: idle, or one active session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Active(DragSession),
}

/// Flattened view of [`Gesture`] for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Undecided,
    HorizontalDrag,
    VerticalPassthrough,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Undecided => "undecided",
            Self::HorizontalDrag => "horizontal_drag",
            Self::VerticalPassthrough => "vertical_passthrough",
        }
    }
}

/// What the owner of a [`Gesture`] must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// A session began. Stop animating the strip so it tracks the pointer.
    Grab,
    /// The gesture is vertical. Native page scrolling owns it from here.
    Yield,
    /// Commit a new live offset, already clamped.
    Pan { offset: f64 },
    /// The session ended. `fling` carries the exit velocity when momentum
    /// should run.
    Release { fling: Option<f64> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub gesture: Gesture,
    pub effect: Effect,
}

impl Step {
    fn unchanged(gesture: Gesture) -> Self {
        Self {
            gesture,
            effect: Effect::None,
        }
    }
}

impl Gesture {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Active(s) => match s.axis {
                AxisLock::Undecided => Phase::Undecided,
                AxisLock::Horizontal => Phase::HorizontalDrag,
                AxisLock::Vertical => Phase::VerticalPassthrough,
            },
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Active(s) => Some(s),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Whether the host must keep the platform from scrolling the page for
    /// the rest of this gesture.
    pub fn suppresses_native_scroll(&self) -> bool {
        self.phase() == Phase::HorizontalDrag
    }

    /// Advance the machine by one event.
    ///
    /// `offset` is the last committed scroll offset; `geometry` bounds any
    /// new one.
    pub fn step(self, event: PointerEvent, offset: f64, geometry: &Geometry) -> Step {
        let session = match self {
            Self::Idle => {
                return match event {
                    PointerEvent::Down { position, source } if is_finite(position) => Step {
                        gesture: Self::Active(DragSession::begin(position, source)),
                        effect: Effect::Grab,
                    },
                    _ => Step::unchanged(self),
                };
            }
            Self::Active(session) => session,
        };

        // A synthesized mouse event must not drive a touch session, and a
        // second press while one is in flight is ignored.
        if event.source() != session.source {
            return Step::unchanged(self);
        }

        match event {
            PointerEvent::Down { .. } => Step::unchanged(self),
            PointerEvent::Move { position, .. } => {
                if !is_finite(position) {
                    return Step::unchanged(self);
                }
                session.advance(position, offset, geometry)
            }
            PointerEvent::Up { .. } => {
                let fling = (session.axis == AxisLock::Horizontal).then_some(session.velocity);
                debug!(?fling, travelled = session.travelled, "gesture released");
                Step {
                    gesture: Self::Idle,
                    effect: Effect::Release { fling },
                }
            }
            PointerEvent::Cancel { .. } => {
                debug!(travelled = session.travelled, "gesture cancelled");
                Step {
                    gesture: Self::Idle,
                    effect: Effect::Release { fling: None },
                }
            }
        }
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
