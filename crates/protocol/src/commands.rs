use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::transition::Transition;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` per frame. Renderers consume
/// this list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally bordered and tagged with a
    /// hit target for pointer interaction.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        hit: Option<HitTarget>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Reserve `rect` for the caller's item at `index`. The host renders
    /// the item content itself; the protocol never carries it.
    PlaceItem { rect: Rect, index: usize },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push a translation (applied to all subsequent commands until the
    /// matching `PopTransform`). `transition` tells the host how to animate
    /// from the previously displayed translation.
    PushTransform {
        translate: Point,
        transition: Transition,
    },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group. Renderers may use this for layering or
    /// accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

/// Interactive regions a host can hit-test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    PrevControl,
    NextControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_item_roundtrips_through_json() {
        let cmd = RenderCommand::PlaceItem {
            rect: Rect::new(316.0, 0.0, 300.0, 200.0),
            index: 1,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("PlaceItem"));
        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
