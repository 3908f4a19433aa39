//! Circular trail buffer shared between the generator and the render loop.
//!
//! The buffer is a flat array of `capacity × group_size × 2` f32 slots,
//! addressed through a monotonically advancing cursor modulo capacity. The
//! generator thread is the sole writer; the render loop reads the whole
//! buffer once per frame and uploads it as vertex data.
//!
//! Two implementations of [`TrailStore`] exist:
//!
//! - [`RelaxedTrail`] (the default) uses relaxed atomics per slot. A frame
//!   may observe a point with x updated but y stale, or catch the buffer
//!   mid-wraparound. That tearing is at most one frame of visual noise, and
//!   accepting it keeps the hot generator path free of locks.
//! - [`LockedTrail`] trades a mutex on every access for consistent
//!   snapshots.
//!
//! Producer/consumer code only speaks [`TrailStore`], so the two can be
//! swapped without touching either loop.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use glam::DVec2;

/// Shared storage for the point trail.
///
/// `write` stores the coordinate at the first sub-slot of the given group;
/// any further sub-slots within a group keep their previous contents. Slots
/// that have never been written read as zero.
pub trait TrailStore: Send + Sync {
    /// Return the current cursor and advance it by one group, wrapping at
    /// capacity.
    fn next_index(&self) -> usize;

    /// Store a coordinate at the first coordinate pair of group `index`.
    fn write(&self, index: usize, point: DVec2);

    /// Copy the full flat contents into `out` (cleared first).
    fn fill_snapshot(&self, out: &mut Vec<f32>);

    /// Total number of writes so far (not wrapped).
    fn written(&self) -> usize;

    /// Maximum number of point groups retained.
    fn capacity(&self) -> usize;

    /// Coordinate pairs per group.
    fn group_size(&self) -> usize;

    /// Number of f32 slots in the flat buffer.
    fn len(&self) -> usize {
        self.capacity() * self.group_size() * 2
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which [`TrailStore`] implementation the viewer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailMode {
    /// Relaxed atomic slots; readers may see torn points.
    #[default]
    Relaxed,
    /// Mutex-guarded buffer; snapshots are consistent.
    Locked,
}

/// Lock-free trail with best-effort visibility.
///
/// Every f32 slot is an `AtomicU32` holding the float's bits, accessed with
/// `Ordering::Relaxed`. Individual slots are never torn, but nothing orders
/// an x store against the following y store, so a concurrent snapshot can
/// pair a fresh x with a stale y.
pub struct RelaxedTrail {
    slots: Vec<AtomicU32>,
    cursor: AtomicUsize,
    capacity: usize,
    group_size: usize,
}

impl RelaxedTrail {
    /// Create a trail for `capacity` point groups. Capacity must be at
    /// least one; the cursor wraps modulo capacity.
    pub fn new(capacity: usize, group_size: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity * group_size * 2);
        slots.resize_with(capacity * group_size * 2, || AtomicU32::new(0f32.to_bits()));
        Self {
            slots,
            cursor: AtomicUsize::new(0),
            capacity,
            group_size,
        }
    }
}

impl TrailStore for RelaxedTrail {
    fn next_index(&self) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % self.capacity
    }

    fn write(&self, index: usize, point: DVec2) {
        let base = index * self.group_size * 2;
        self.slots[base].store((point.x as f32).to_bits(), Ordering::Relaxed);
        self.slots[base + 1].store((point.y as f32).to_bits(), Ordering::Relaxed);
    }

    fn fill_snapshot(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend(
            self.slots
                .iter()
                .map(|slot| f32::from_bits(slot.load(Ordering::Relaxed))),
        );
    }

    fn written(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn group_size(&self) -> usize {
        self.group_size
    }
}

/// Mutex-guarded trail with consistent snapshots.
pub struct LockedTrail {
    inner: Mutex<LockedInner>,
    capacity: usize,
    group_size: usize,
}

struct LockedInner {
    slots: Vec<f32>,
    cursor: usize,
}

impl LockedTrail {
    /// Create a trail for `capacity` point groups. Capacity must be at
    /// least one; the cursor wraps modulo capacity.
    pub fn new(capacity: usize, group_size: usize) -> Self {
        Self {
            inner: Mutex::new(LockedInner {
                slots: vec![0.0; capacity * group_size * 2],
                cursor: 0,
            }),
            capacity,
            group_size,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LockedInner> {
        // A poisoned lock means a writer panicked mid-store of a plain f32;
        // the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TrailStore for LockedTrail {
    fn next_index(&self) -> usize {
        let mut inner = self.lock();
        let index = inner.cursor % self.capacity;
        inner.cursor += 1;
        index
    }

    fn write(&self, index: usize, point: DVec2) {
        let base = index * self.group_size * 2;
        let mut inner = self.lock();
        inner.slots[base] = point.x as f32;
        inner.slots[base + 1] = point.y as f32;
    }

    fn fill_snapshot(&self, out: &mut Vec<f32>) {
        let inner = self.lock();
        out.clear();
        out.extend_from_slice(&inner.slots);
    }

    fn written(&self) -> usize {
        self.lock().cursor
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn group_size(&self) -> usize {
        self.group_size
    }
}
