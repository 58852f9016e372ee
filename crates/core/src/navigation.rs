//! Discrete one-stride paging for the prev/next controls.
//!
//! Each step moves exactly one item plus gap, whatever `visible_count` is,
//! so paging stays predictable with partial items at the edges.

use crate::geometry::Geometry;

pub fn scroll_left(offset: f64, stride: f64, geometry: &Geometry) -> f64 {
    geometry.clamp((offset + stride).min(0.0))
}

pub fn scroll_right(offset: f64, stride: f64, geometry: &Geometry) -> f64 {
    geometry.clamp((offset - stride).max(-geometry.max_offset))
}

/// The "previous" affordance shows whenever there is content to the left.
pub fn can_scroll_left(offset: f64) -> bool {
    offset < 0.0
}

/// The "next" affordance shows whenever there is content to the right.
pub fn can_scroll_right(offset: f64, geometry: &Geometry) -> bool {
    offset > -geometry.max_offset
}
