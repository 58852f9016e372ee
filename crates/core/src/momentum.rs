use crate::geometry::Geometry;

/// Project where a flick settles.
///
/// The exit velocity is the last raw drag delta, not an average over the
/// final few events. A zero velocity only re-clamps `offset`.
pub fn project(offset: f64, velocity: f64, multiplier: f64, geometry: &Geometry) -> f64 {
    let carry = velocity * multiplier;
    if !carry.is_finite() {
        // Unbounded flick: pin to whichever edge it points at.
        return if carry > 0.0 {
            0.0
        } else if carry < 0.0 {
            -geometry.max_offset
        } else {
            geometry.clamp(offset)
        };
    }
    geometry.clamp(offset + carry)
}
