use serde::{Deserialize, Serialize};

/// How a host should animate the item strip toward a newly committed offset.
///
/// The transition is presentation only. The committed offset is already
/// final when a transition is reported; hosts interpolate the *displayed*
/// position toward it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Track the committed offset exactly (used while a finger or mouse
    /// is dragging the strip).
    Immediate,
    /// Ease toward the committed offset over `duration_ms`.
    Eased { duration_ms: u32, easing: Easing },
}

impl Transition {
    pub fn ease_out(duration_ms: u32) -> Self {
        Self::Eased {
            duration_ms,
            easing: Easing::EaseOut,
        }
    }

    /// CSS `transition` shorthand for the strip's `transform` property.
    pub fn css(&self) -> String {
        match self {
            Self::Immediate => "none".to_string(),
            Self::Eased {
                duration_ms,
                easing,
            } => format!("transform {duration_ms}ms {}", easing.css_name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOut,
}

impl Easing {
    /// Sample the curve at `t` in `[0, 1]`. Out-of-range input is clamped.
    pub fn sample(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            // Cubic ease-out, a close match for CSS `ease-out`.
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseOut => "ease-out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_hits_endpoints_and_leads_linear() {
        assert_eq!(Easing::EaseOut.sample(0.0), 0.0);
        assert_eq!(Easing::EaseOut.sample(1.0), 1.0);
        assert!(Easing::EaseOut.sample(0.5) > Easing::Linear.sample(0.5));
        assert_eq!(Easing::EaseOut.sample(3.0), 1.0);
        assert_eq!(Easing::Linear.sample(-1.0), 0.0);
    }

    #[test]
    fn css_shorthand() {
        assert_eq!(Transition::Immediate.css(), "none");
        assert_eq!(Transition::ease_out(500).css(), "transform 500ms ease-out");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Transition::ease_out(300)).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"eased","duration_ms":300,"easing":"ease_out"}"#
        );
        let back: Transition = serde_json::from_str(r#"{"kind":"immediate"}"#).unwrap();
        assert_eq!(back, Transition::Immediate);
    }
}
