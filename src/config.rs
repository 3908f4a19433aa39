//! Default configuration for the viewer.
//!
//! These mirror the values the demo binary runs with. Everything here can be
//! overridden through the [`Viewer`](crate::Viewer) builder.

use std::time::Duration;

/// Window title.
pub const TITLE: &str = "phasetrail";

/// Scalars per coordinate passed to the vertex stage (x, y).
pub const VECTOR_SIZE: usize = 2;

/// Number of trail points retained in the ring buffer.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// Coordinate pairs per logical point group. Points are drawn one per group;
/// values above 1 reserve room for multi-vertex primitives.
pub const DEFAULT_GROUP_SIZE: usize = 1;

/// Pause between consecutive generator samples. Zero runs the generator
/// flat out.
pub const DEFAULT_GEN_DELAY: Duration = Duration::from_nanos(100);

/// Target frame rate of the render loop.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Base parameters for the bedhead attractor.
pub const BASE_A: f64 = -0.81;
pub const BASE_B: f64 = -0.92;
pub const BASE_M: f64 = 0.2;

/// Scales per-key deltas inversely with the frame rate, so a held key moves
/// the picture at the same perceived speed regardless of frame rate.
pub fn movement_multiplier(frame_rate: u32) -> f64 {
    60.0 / frame_rate as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_multiplier_at_reference_rate() {
        assert_eq!(movement_multiplier(60), 1.0);
    }

    #[test]
    fn test_movement_multiplier_scales_inversely() {
        assert_eq!(movement_multiplier(30), 2.0);
        assert_eq!(movement_multiplier(120), 0.5);
    }
}
