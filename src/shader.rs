//! Shader source and uniform data for the point-cloud pass.

use bytemuck::{Pod, Zeroable};

/// Per-frame uniforms: the window aspect ratio and the time-derived color
/// seed. Padded to 16 bytes for uniform-buffer layout.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub aspect_ratio: f32,
    pub seed: f32,
    pub _padding: [f32; 2],
}

/// Derive the color seed from a wall-clock timestamp in nanoseconds.
///
/// A sawtooth over `[0, 2π)` advancing at one quarter of real-time speed:
/// the timestamp is quartered, wrapped at one second, and mapped onto a full
/// turn. The fragment stage turns it into a cycling rainbow.
pub fn color_seed(unix_nanos: u128) -> f32 {
    let wrapped = (unix_nanos / 4) % 1_000_000_000;
    (wrapped as f64 * 1e-9 * std::f64::consts::TAU) as f32
}

/// Vertex + fragment shader for the trail point cloud.
///
/// The vertex stage divides x by the aspect ratio so the picture keeps its
/// proportions when the window is resized. The fragment stage colors every
/// point with a rainbow hue derived from the seed uniform.
pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    aspect_ratio: f32,
    seed: f32,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) coordinate: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(coordinate.x / uniforms.aspect_ratio, coordinate.y, 0.0, 1.0);
}

const PI: f32 = 3.1415926535897932384626433832795;

// Maps a seed running from 0 to 2π onto three phase-shifted cosine
// oscillators, producing a continuously cycling rainbow.
fn rainbow(seed: f32) -> vec4<f32> {
    let red = cos(seed) / 2.0 + 0.5;
    let green = cos(seed + PI * 2.0 / 3.0) / 2.0 + 0.5;
    let blue = cos(seed + PI * 4.0 / 3.0) / 2.0 + 0.5;
    return vec4<f32>(red, green, blue, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return rainbow(uniforms.seed);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_color_seed_stays_in_full_turn() {
        for nanos in [0u128, 1, 999_999_999, 4_000_000_000, u64::MAX as u128] {
            let seed = color_seed(nanos);
            assert!((0.0..TAU).contains(&seed), "seed {seed} out of range");
        }
    }

    #[test]
    fn test_color_seed_advances_at_quarter_speed() {
        // A full second of wall time advances the quartered clock by 0.25s,
        // i.e. a quarter turn.
        let start = color_seed(0);
        let later = color_seed(1_000_000_000);
        assert!((later - start - TAU / 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_color_seed_wraps_as_sawtooth() {
        // Four wall-clock seconds make one full quartered second: back to 0.
        let wrapped = color_seed(4_000_000_000);
        assert!(wrapped.abs() < 1e-3);
    }
}
