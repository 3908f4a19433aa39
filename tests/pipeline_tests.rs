//! Integration tests for the generate → trail → snapshot pipeline and the
//! shader source.

use std::sync::Arc;
use std::time::Duration;

use phasetrail::prelude::*;
use phasetrail::{Generator, LockedTrail, RelaxedTrail};

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_bedhead_pipeline_records_golden_first_point() {
    let params = Arc::new(BedheadParams::new(-0.81, -0.92, 0.2));
    let attractor = Box::new(Bedhead::new(params));
    let trail = Arc::new(RelaxedTrail::new(1024, 1));

    let generator = Generator::spawn(attractor, trail.clone(), Duration::from_millis(1));
    std::thread::sleep(Duration::from_millis(30));
    generator.join();

    assert!(trail.written() > 0);
    assert!(trail.written() < trail.capacity());

    // Slot 0 holds the first coordinate the attractor produced from (1, 1).
    let x_new = (1.0_f64 / -0.92).sin() + (-0.81_f64 - 1.0).cos();
    let y_new = 1.0 + 1.0_f64.sin() / -0.92;

    let mut snapshot = Vec::new();
    trail.fill_snapshot(&mut snapshot);
    assert!((snapshot[0] - (0.2 * x_new) as f32).abs() < 1e-6);
    assert!((snapshot[1] - (0.2 * y_new) as f32).abs() < 1e-6);
}

#[test]
fn test_locked_trail_works_under_the_generator() {
    let attractor = Box::new(TrigMap::new(-2.0, -2.0, -1.2, 2.0, 0.3));
    let trail = Arc::new(LockedTrail::new(64, 1));

    let generator = Generator::spawn(attractor, trail.clone(), Duration::ZERO);
    std::thread::sleep(Duration::from_millis(20));
    generator.join();

    // The flat-out worker wrapped the small ring; every slot was overwritten
    // with a bounded trig-map point.
    assert!(trail.written() > trail.capacity());

    let mut snapshot = Vec::new();
    trail.fill_snapshot(&mut snapshot);
    assert_eq!(snapshot.len(), 128);
    for value in snapshot {
        assert!(value.abs() <= (0.3 * 3.2) as f32, "unbounded point {value}");
    }
}

#[test]
fn test_live_parameter_shifts_reach_the_generator() {
    let params = Arc::new(BedheadParams::new(-0.81, -0.92, 0.2));
    let attractor = Box::new(Bedhead::new(params.clone()));
    let trail = Arc::new(RelaxedTrail::new(4096, 1));

    let generator = Generator::spawn(attractor, trail.clone(), Duration::from_micros(100));
    std::thread::sleep(Duration::from_millis(10));

    // Push the picture far off to one side while the generator runs.
    for _ in 0..50 {
        params.shift_x(1.0);
    }
    std::thread::sleep(Duration::from_millis(20));
    generator.join();

    // Late samples carry the large offset; early ones do not. The bedhead
    // iterates stay within a few units, so an offset of 250 dominates.
    let mut snapshot = Vec::new();
    trail.fill_snapshot(&mut snapshot);
    let written = trail.written().min(trail.capacity());

    let last_x = snapshot[(written - 1) * 2];
    assert!(last_x > 100.0, "offset never reached the generator: {last_x}");
    assert!(snapshot[0] < 100.0, "first sample already offset");
}

// ============================================================================
// WGSL Validation Tests
// ============================================================================

#[test]
fn test_trail_shader_validates() {
    let module = naga::front::wgsl::parse_str(phasetrail::shader::SHADER_SOURCE)
        .expect("WGSL parse error");

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("WGSL validation error");
}
