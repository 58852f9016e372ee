use crate::config::CarouselConfig;

/// Scroll limits derived from the layout config, the item count and the
/// measured viewport width.
///
/// Always re-derived from current inputs via [`Geometry::measure`]; never
/// patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Width of the whole item strip in px.
    pub content_width: f64,
    /// Largest legal distance the strip may be translated left. Offsets
    /// live in `[-max_offset, 0]`.
    pub max_offset: f64,
    /// Number of whole items that fit in the viewport, at least 1.
    pub visible_count: usize,
}

impl Geometry {
    pub fn measure(config: &CarouselConfig, item_count: usize, viewport_width: f64) -> Self {
        // An unmeasured or garbage width behaves like a zero-width viewport.
        let viewport_width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };

        let content_width = if item_count == 0 {
            0.0
        } else {
            let n = item_count as f64;
            n * config.item_width + (n - 1.0) * config.gap
        };
        let max_offset = (content_width - viewport_width).max(0.0);

        let stride = config.stride();
        let visible_count = if viewport_width > 0.0 && stride > 0.0 {
            ((viewport_width / stride).floor() as usize).max(1)
        } else {
            1
        };

        Self {
            content_width,
            max_offset,
            visible_count,
        }
    }

    /// Clamp an offset into `[-max_offset, 0]`. NaN collapses to 0.
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        let clamped = offset.clamp(-self.max_offset, 0.0);
        // Fold -0.0 into 0.0 so hosts never see a negative zero.
        if clamped == 0.0 {
            0.0
        } else {
            clamped
        }
    }

    pub fn contains(&self, offset: f64) -> bool {
        (-self.max_offset..=0.0).contains(&offset)
    }
}
