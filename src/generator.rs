//! Background point generation.
//!
//! A [`Generator`] owns a worker thread that repeatedly pulls coordinates
//! from an [`Attractor`](crate::attractor::Attractor) and writes them into a
//! shared [`TrailStore`](crate::trail::TrailStore). It runs independently of
//! the render loop, typically far faster, and is stopped and joined when
//! the window closes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::attractor::Attractor;
use crate::trail::TrailStore;

/// Handle to the generator worker thread.
pub struct Generator {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Generator {
    /// Spawn the worker.
    ///
    /// Each iteration asks the attractor for the next coordinate but records
    /// the previous iteration's coordinate at the current cursor, so the
    /// buffer always trails the attractor by one sample. With a zero `delay`
    /// the worker runs flat out; otherwise it sleeps between samples. The
    /// stop flag is observed once per iteration.
    pub fn spawn(
        mut attractor: Box<dyn Attractor>,
        trail: Arc<dyn TrailStore>,
        delay: Duration,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::Builder::new()
            .name("phasetrail-generator".into())
            .spawn(move || {
                let mut prev = attractor.next_coordinate();

                while !stop_flag.load(Ordering::Relaxed) {
                    let next = attractor.next_coordinate();

                    let index = trail.next_index();
                    trail.write(index, prev);

                    prev = next;

                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            })
            .expect("failed to spawn generator thread");

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signal the worker to finish its current iteration and exit.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stop the worker and wait for it to exit.
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Generator {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::RelaxedTrail;
    use glam::DVec2;
    use std::sync::atomic::AtomicUsize;

    /// Emits (n, n) on the n-th call and counts its invocations.
    struct Counter {
        n: usize,
        produced: Arc<AtomicUsize>,
    }

    impl Attractor for Counter {
        fn next_coordinate(&mut self) -> DVec2 {
            let n = self.n;
            self.n += 1;
            self.produced.store(self.n, Ordering::SeqCst);
            DVec2::new(n as f64, n as f64)
        }
    }

    #[test]
    fn test_generator_writes_with_one_sample_lag() {
        let produced = Arc::new(AtomicUsize::new(0));
        let attractor = Box::new(Counter {
            n: 0,
            produced: produced.clone(),
        });
        let trail: Arc<RelaxedTrail> = Arc::new(RelaxedTrail::new(4096, 1));

        let generator = Generator::spawn(attractor, trail.clone(), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(50));
        generator.join();

        let written = trail.written();
        assert!(written > 0, "generator never wrote");
        assert!(written < trail.capacity(), "test ran long enough to wrap");

        // The worker pulled exactly one coordinate more than it recorded.
        assert_eq!(produced.load(Ordering::SeqCst), written + 1);

        // Slot i holds the i-th produced coordinate: the write in iteration
        // k records the coordinate pulled in iteration k-1.
        let mut snapshot = Vec::new();
        trail.fill_snapshot(&mut snapshot);
        for i in 0..written {
            assert_eq!(snapshot[i * 2], i as f32);
            assert_eq!(snapshot[i * 2 + 1], i as f32);
        }
    }

    #[test]
    fn test_stop_terminates_flat_out_worker() {
        let produced = Arc::new(AtomicUsize::new(0));
        let attractor = Box::new(Counter { n: 0, produced });
        let trail: Arc<RelaxedTrail> = Arc::new(RelaxedTrail::new(16, 1));

        // Zero delay: the worker spins as fast as it can until stopped.
        let generator = Generator::spawn(attractor, trail.clone(), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(10));
        generator.join();

        let written = trail.written();
        // No further writes after join returns.
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(trail.written(), written);
    }
}
