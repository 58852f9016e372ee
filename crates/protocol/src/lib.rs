pub mod commands;
pub mod theme;
pub mod transition;
pub mod types;

pub use commands::{HitTarget, RenderCommand, TextAlign};
pub use theme::ThemeToken;
pub use transition::{Easing, Transition};
pub use types::{Point, Rect};
