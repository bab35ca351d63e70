//! Coordinate normalization into the scene's logical space.
//!
//! Raw view pixels are rescaled against the displayed image so that the
//! patch always sees coordinates in a fixed `0..=319` square, whatever the
//! device resolution.
//!
//! # Clamping
//!
//! Touches that slide off the image are pinned to its edge rather than
//! dropped, so a drag never "teleports" when the finger leaves the image.

use crate::touch::{ImageSize, Pointer};

/// Horizontal extent of the logical scene space.
pub const X_SCALE: f32 = 319.0;

/// Vertical extent of the logical scene space.
pub const Y_SCALE: f32 = 319.0;

/// Rescale a raw coordinate into `[0, scale]`.
///
/// # Arguments
/// * `v` - Raw coordinate in view pixels
/// * `scale` - Extent of the target axis (see [`X_SCALE`], [`Y_SCALE`])
/// * `dim` - Image extent along the same axis, in pixels (must be > 0)
///
/// # Example
/// ```
/// use scene_touch::normalize::{normalize, X_SCALE};
///
/// assert_eq!(normalize(160.0, X_SCALE, 320), 159.5);
/// assert_eq!(normalize(-5.0, X_SCALE, 320), 0.0);
/// assert_eq!(normalize(9000.0, X_SCALE, 320), X_SCALE);
/// ```
pub fn normalize(v: f32, scale: f32, dim: u32) -> f32 {
    let t = v * scale / dim as f32;
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, scale)
}

/// Normalize both axes of a pointer against the image.
pub fn normalize_point(pointer: &Pointer, image: ImageSize) -> (f32, f32) {
    (
        normalize(pointer.x, X_SCALE, image.width()),
        normalize(pointer.y, Y_SCALE, image.height()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_origin() {
        assert_eq!(normalize(0.0, X_SCALE, 320), 0.0);
    }

    #[test]
    fn test_normalize_clamps_negative() {
        assert_eq!(normalize(-40.0, X_SCALE, 320), 0.0);
    }

    #[test]
    fn test_normalize_clamps_past_edge() {
        assert_eq!(normalize(640.0, X_SCALE, 320), X_SCALE);
    }

    #[test]
    fn test_normalize_nan_is_zero() {
        assert_eq!(normalize(f32::NAN, X_SCALE, 320), 0.0);
    }

    #[test]
    fn test_normalize_point_uses_each_axis() {
        let image = ImageSize::new(638, 319).unwrap();
        let (x, y) = normalize_point(&Pointer::new(0, 319.0, 100.0), image);
        assert!((x - 159.5).abs() < 1e-4);
        assert!((y - 100.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_normalize_stays_in_range(v in -1.0e6f32..1.0e6, dim in 1u32..10_000) {
            let n = normalize(v, X_SCALE, dim);
            prop_assert!((0.0..=X_SCALE).contains(&n));
        }

        #[test]
        fn prop_identity_scaling_at_319(v in -1000.0f32..1000.0) {
            let n = normalize(v, X_SCALE, 319);
            prop_assert!((n - v.clamp(0.0, X_SCALE)).abs() < 1e-3);
        }
    }
}
