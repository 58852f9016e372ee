use glide_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Self::Dark => {
                let mut v = egui::Visuals::dark();
                v.panel_fill = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
                v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
                v
            }
            Self::Light => egui::Visuals::light(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),    // Mantle
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        CardFill => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),     // Base
        CardBorder => ResolvedColor::rgb(0x31, 0x32, 0x44),   // Surface0
        CardText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),     // Text
        CardTextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8), // Subtext0

        ControlFill => ResolvedColor::rgba(0x45, 0x47, 0x5a, 230), // Surface1
        ControlBorder => ResolvedColor::rgb(0x58, 0x5b, 0x70),     // Surface2
        ControlGlyph => ResolvedColor::rgb(0x89, 0xb4, 0xfa),      // Blue
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        Surface => ResolvedColor::rgb(245, 245, 248),
        Border => ResolvedColor::rgb(210, 210, 220),

        CardFill => ResolvedColor::rgb(255, 255, 255),
        CardBorder => ResolvedColor::rgb(210, 210, 220),
        CardText => ResolvedColor::rgb(20, 20, 30),
        CardTextMuted => ResolvedColor::rgb(100, 100, 110),

        ControlFill => ResolvedColor::rgba(255, 255, 255, 235),
        ControlBorder => ResolvedColor::rgb(210, 210, 220),
        ControlGlyph => ResolvedColor::rgb(50, 110, 220),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 18.0;
pub const FONT_EMPHASIS: f32 = 14.0;
pub const FONT_BODY: f32 = 12.0;
