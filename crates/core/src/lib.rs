//! Gesture carousel core.
//!
//! A carousel instance owns a single scroll offset and the state machine
//! that writes it. Hosts feed pointer events, resize signals and navigation
//! clicks into [`Carousel`] and draw the [`RenderCommand`] list produced by
//! [`render::render_carousel`].
//!
//! ```text
//!   pointer events ─┐
//!   resize         ─┼─▶ Carousel ──▶ render_carousel ──▶ RenderCommand[] ──▶ host
//!   prev/next      ─┘   (offset)                          (PlaceItem,        (egui, DOM,
//!                                                          PushTransform…)    terminal, SVG)
//! ```
//!
//! [`RenderCommand`]: glide_protocol::RenderCommand

pub mod animator;
pub mod carousel;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod momentum;
pub mod navigation;
pub mod render;
pub mod svg;

pub use animator::Animator;
pub use carousel::{Carousel, NativeScroll};
pub use config::{CarouselConfig, ConfigError, MotionTuning};
pub use geometry::Geometry;
pub use gesture::{AxisLock, DragSession, Gesture, Phase, PointerEvent, PointerSource};
