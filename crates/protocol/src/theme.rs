use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    // Item cards (hosts paint item content on top)
    CardFill,
    CardBorder,
    CardText,
    CardTextMuted,

    // Prev/next controls
    ControlFill,
    ControlBorder,
    ControlGlyph,
}
