use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("item width must be a finite value greater than zero, got {0}")]
    NonPositiveItemWidth(f64),
    #[error("gap must be a finite value of zero or more, got {0}")]
    NegativeGap(f64),
    #[error("momentum multiplier must be a finite value of zero or more, got {0}")]
    InvalidMomentumMultiplier(f64),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Motion tuning for the momentum and navigation transitions.
///
/// The defaults are the product's reference feel: a flick carries on for
/// 15× the last drag delta and settles over 500ms, button paging animates
/// over 300ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    pub momentum_multiplier: f64,
    pub momentum_ms: u32,
    pub navigation_ms: u32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            momentum_multiplier: 15.0,
            momentum_ms: 500,
            navigation_ms: 300,
        }
    }
}

/// Caller-supplied layout parameters for one carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Width of one item card in px.
    pub item_width: f64,
    /// Horizontal space between adjacent items in px.
    #[serde(default)]
    pub gap: f64,
    /// Whether the "previous" control may render at all.
    #[serde(default = "enabled")]
    pub show_prev_control: bool,
    /// Whether the "next" control may render at all.
    #[serde(default = "enabled")]
    pub show_next_control: bool,
    #[serde(default)]
    pub motion: MotionTuning,
}

fn enabled() -> bool {
    true
}

impl CarouselConfig {
    /// Build a validated config with both controls enabled and the
    /// reference motion tuning.
    pub fn new(item_width: f64, gap: f64) -> Result<Self, ConfigError> {
        let config = Self {
            item_width,
            gap,
            show_prev_control: true,
            show_next_control: true,
            motion: MotionTuning::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_controls(mut self, prev: bool, next: bool) -> Self {
        self.show_prev_control = prev;
        self.show_next_control = next;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.item_width.is_finite() || self.item_width <= 0.0 {
            return Err(ConfigError::NonPositiveItemWidth(self.item_width));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::NegativeGap(self.gap));
        }
        let m = self.motion.momentum_multiplier;
        if !m.is_finite() || m < 0.0 {
            return Err(ConfigError::InvalidMomentumMultiplier(m));
        }
        Ok(())
    }

    /// Distance advanced by one navigation step: one item plus one gap.
    pub fn stride(&self) -> f64 {
        self.item_width + self.gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_widths() {
        assert!(matches!(
            CarouselConfig::new(0.0, 16.0),
            Err(ConfigError::NonPositiveItemWidth(_))
        ));
        assert!(matches!(
            CarouselConfig::new(f64::NAN, 16.0),
            Err(ConfigError::NonPositiveItemWidth(_))
        ));
        assert!(matches!(
            CarouselConfig::new(300.0, -1.0),
            Err(ConfigError::NegativeGap(_))
        ));
        assert!(CarouselConfig::new(300.0, 0.0).is_ok());
    }

    #[test]
    fn json_fills_defaults() {
        let config = CarouselConfig::from_json(r#"{"item_width": 280, "gap": 24}"#).unwrap();
        assert_eq!(config.stride(), 304.0);
        assert!(config.show_prev_control && config.show_next_control);
        assert_eq!(config.motion, MotionTuning::default());

        let config = CarouselConfig::from_json(
            r#"{"item_width": 280, "show_next_control": false, "motion": {"momentum_ms": 800}}"#,
        )
        .unwrap();
        assert_eq!(config.gap, 0.0);
        assert!(!config.show_next_control);
        assert_eq!(config.motion.momentum_ms, 800);
        assert_eq!(config.motion.momentum_multiplier, 15.0);
    }

    #[test]
    fn json_is_validated() {
        assert!(matches!(
            CarouselConfig::from_json(r#"{"item_width": -5}"#),
            Err(ConfigError::NonPositiveItemWidth(_))
        ));
        assert!(matches!(
            CarouselConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CarouselConfig::from_json(
                r#"{"item_width": 100, "motion": {"momentum_multiplier": -2}}"#
            ),
            Err(ConfigError::InvalidMomentumMultiplier(_))
        ));
    }
}
