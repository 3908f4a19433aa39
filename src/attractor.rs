//! Attractor rules: stateful generators of 2D trajectories.
//!
//! Every attractor is a rule that maps its internal state to the next point
//! of a trajectory. The generator thread calls [`Attractor::next_coordinate`]
//! in a loop and feeds the points into the trail buffer.
//!
//! All recurrences run in `f64`; the formulas are total over doubles and
//! never fail. Unbounded growth is a property of the chosen parameters, not
//! an error condition, so nothing here guards against it.
//!
//! Only the [`Bedhead`] variant is tunable at runtime. Its parameters live in
//! a shared [`BedheadParams`] block so the render loop can shift them while
//! the generator iterates.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::DVec2;

/// A stateful rule producing the next point of a trajectory on each call.
///
/// Implementations advance their internal state on every invocation. They are
/// single-owner state: exactly one thread drives an attractor instance.
pub trait Attractor: Send {
    /// Advance the internal state and return the new point.
    fn next_coordinate(&mut self) -> DVec2;
}

fn load(cell: &AtomicU64) -> f64 {
    f64::from_bits(cell.load(Ordering::Relaxed))
}

fn store(cell: &AtomicU64, value: f64) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}

fn atomic_f64(value: f64) -> AtomicU64 {
    AtomicU64::new(value.to_bits())
}

/// Live-tunable parameters of the [`Bedhead`] attractor.
///
/// The render loop writes these while the generator thread reads them. The
/// fields are relaxed atomics: each access is a plain racy load/store with no
/// ordering between fields, matching the best-effort visibility the viewer
/// is designed around.
///
/// The multiplier must never be set to exactly zero; the offset shifts divide
/// by it.
pub struct BedheadParams {
    base_a: f64,
    base_b: f64,
    base_m: f64,
    a: AtomicU64,
    b: AtomicU64,
    multiplier: AtomicU64,
    offset_x: AtomicU64,
    offset_y: AtomicU64,
}

impl BedheadParams {
    /// Create a parameter block with the given base values.
    ///
    /// The base values are what [`reset`](Self::reset) restores.
    pub fn new(a: f64, b: f64, multiplier: f64) -> Self {
        Self {
            base_a: a,
            base_b: b,
            base_m: multiplier,
            a: atomic_f64(a),
            b: atomic_f64(b),
            multiplier: atomic_f64(multiplier),
            offset_x: atomic_f64(0.0),
            offset_y: atomic_f64(0.0),
        }
    }

    pub fn a(&self) -> f64 {
        load(&self.a)
    }

    pub fn b(&self) -> f64 {
        load(&self.b)
    }

    pub fn multiplier(&self) -> f64 {
        load(&self.multiplier)
    }

    pub fn offset_x(&self) -> f64 {
        load(&self.offset_x)
    }

    pub fn offset_y(&self) -> f64 {
        load(&self.offset_y)
    }

    /// Shift the X translation. The delta is divided by the current
    /// multiplier so a keypress moves the picture by a screen-space amount
    /// independent of zoom.
    pub fn shift_x(&self, amount: f64) {
        store(&self.offset_x, self.offset_x() + amount / self.multiplier());
    }

    /// Shift the Y translation, scaled like [`shift_x`](Self::shift_x).
    pub fn shift_y(&self, amount: f64) {
        store(&self.offset_y, self.offset_y() + amount / self.multiplier());
    }

    /// Add to the A shape parameter.
    pub fn shift_a(&self, amount: f64) {
        store(&self.a, self.a() + amount);
    }

    /// Add to the B shape parameter.
    pub fn shift_b(&self, amount: f64) {
        store(&self.b, self.b() + amount);
    }

    /// Scale the multiplier. A factor of 1.0 is a no-op; factors above and
    /// below 1.0 zoom in and out.
    pub fn shift_m(&self, factor: f64) {
        store(&self.multiplier, self.multiplier() * factor);
    }

    /// Restore A, B and the multiplier to their base values.
    ///
    /// The offsets are deliberately left alone: reset recovers the shape
    /// without recentering the view.
    pub fn reset(&self) {
        store(&self.a, self.base_a);
        store(&self.b, self.base_b);
        store(&self.multiplier, self.base_m);
    }
}

impl std::fmt::Debug for BedheadParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedheadParams")
            .field("a", &self.a())
            .field("b", &self.b())
            .field("multiplier", &self.multiplier())
            .field("offset_x", &self.offset_x())
            .field("offset_y", &self.offset_y())
            .finish()
    }
}

/// The bedhead attractor, the default scene and the only tunable variant.
///
/// Recurrence from (x, y), starting at (1, 1):
///
/// ```text
/// x' = sin(x*y / B) + cos(A*x - y)
/// y' = x + sin(y) / B
/// ```
///
/// The emitted point is the new iterate scaled by the multiplier and
/// translated by the offsets.
pub struct Bedhead {
    x: f64,
    y: f64,
    params: Arc<BedheadParams>,
}

impl Bedhead {
    pub fn new(params: Arc<BedheadParams>) -> Self {
        Self { x: 1.0, y: 1.0, params }
    }
}

impl Attractor for Bedhead {
    fn next_coordinate(&mut self) -> DVec2 {
        let a = self.params.a();
        let b = self.params.b();

        let x_new = (self.x * self.y / b).sin() + (a * self.x - self.y).cos();
        let y_new = self.x + self.y.sin() / b;

        self.x = x_new;
        self.y = y_new;

        let m = self.params.multiplier();
        DVec2::new(
            m * x_new + self.params.offset_x(),
            m * y_new + self.params.offset_y(),
        )
    }
}

/// Closed-form oscillator: two independent sinusoids over wall-clock time.
///
/// Not iterative; the only state is the construction timestamp. Mostly useful
/// as a smoke-test scene since its output is predictable.
pub struct OscillatingVector {
    initial_x: f64,
    initial_y: f64,
    multiplier: f64,
    // Periods in seconds per radian of phase.
    period_x: f64,
    period_y: f64,
    start: Instant,
}

impl OscillatingVector {
    pub fn new(x: f64, y: f64, multiplier: f64, period_x: Duration, period_y: Duration) -> Self {
        // A duration-long full cycle corresponds to 2π of phase.
        let period_x = period_x.as_nanos() as f64 * 1e-9 / TAU;
        let period_y = period_y.as_nanos() as f64 * 1e-9 / TAU;
        Self {
            initial_x: x,
            initial_y: y,
            multiplier,
            period_x,
            period_y,
            start: Instant::now(),
        }
    }
}

impl Attractor for OscillatingVector {
    fn next_coordinate(&mut self) -> DVec2 {
        let t = self.start.elapsed().as_secs_f64();
        DVec2::new(
            self.initial_x + self.multiplier * (t / self.period_x).sin(),
            self.initial_y + self.multiplier * (t / self.period_y).cos(),
        )
    }
}

/// Parametric Lissajous-style curve traced by a fixed-step internal time.
///
/// ```text
/// x(t) = i*cos(a*t) - cos(b*t)*sin(c*t)
/// y(t) = j*sin(d*t) - sin(e*t)
/// ```
pub struct ParametricCurve {
    i: f64,
    j: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    t: f64,
    step: f64,
    multiplier: f64,
}

impl ParametricCurve {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        i: f64,
        j: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        multiplier: f64,
        t: f64,
        step: f64,
    ) -> Self {
        Self { i, j, a, b, c, d, e, t, step, multiplier }
    }
}

impl Attractor for ParametricCurve {
    fn next_coordinate(&mut self) -> DVec2 {
        let t = self.t;
        let x = self.i * (self.a * t).cos() - (self.b * t).cos() * (self.c * t).sin();
        let y = self.j * (self.d * t).sin() - (self.e * t).sin();

        self.t = t + self.step;

        DVec2::new(x * self.multiplier, y * self.multiplier)
    }
}

/// Hénon-like map with a self-normalizing scale factor.
///
/// ```text
/// x' = y - 1 - sqrt(|b*x - 1 - c|)*sin(x - 1)
/// y' = a - x - 1
/// ```
///
/// Whenever an iterate escapes the current `1/M` box the scale `M` shrinks to
/// fit it, so `M` only ever decreases and the scaled output stays bounded
/// once the trajectory's extent is established.
pub struct HplAttractor {
    a: f64,
    b: f64,
    c: f64,
    x: f64,
    y: f64,
    scale: f64,
}

impl HplAttractor {
    pub fn new(a: f64, b: f64, c: f64, scale: f64) -> Self {
        Self { a, b, c, x: 1.0, y: 1.0, scale }
    }

    /// Current self-normalizing scale factor M.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Attractor for HplAttractor {
    fn next_coordinate(&mut self) -> DVec2 {
        let x_new =
            self.y - 1.0 - (self.b * self.x - 1.0 - self.c).abs().sqrt() * (self.x - 1.0).sin();
        let y_new = self.a - self.x - 1.0;

        let max = x_new.abs();
        if max != 0.0 && max > 1.0 / self.scale {
            self.scale = 1.0 / max;
        }
        let max = y_new.abs();
        if max != 0.0 && max > 1.0 / self.scale {
            self.scale = 1.0 / max;
        }

        self.x = x_new;
        self.y = y_new;

        DVec2::new(self.scale * x_new, self.scale * y_new)
    }
}

/// Trigonometric map in the Clifford/de Jong family, starting at (0.1, 0.1).
///
/// ```text
/// x' = d*sin(a*x) - sin(b*y)
/// y' = c*cos(a*x) + cos(b*y)
/// ```
pub struct TrigMap {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x: f64,
    y: f64,
    multiplier: f64,
}

impl TrigMap {
    pub fn new(a: f64, b: f64, c: f64, d: f64, multiplier: f64) -> Self {
        Self { a, b, c, d, x: 0.1, y: 0.1, multiplier }
    }
}

impl Attractor for TrigMap {
    fn next_coordinate(&mut self) -> DVec2 {
        let x_new = self.d * (self.x * self.a).sin() - (self.y * self.b).sin();
        let y_new = self.c * (self.x * self.a).cos() + (self.y * self.b).cos();

        self.x = x_new;
        self.y = y_new;

        DVec2::new(self.multiplier * x_new, self.multiplier * y_new)
    }
}
