//! # phasetrail
//!
//! Real-time visualizer for discrete-time dynamical systems. A background
//! thread iterates an attractor rule and accumulates the trajectory in a
//! fixed-capacity circular trail buffer; a frame-paced render loop draws the
//! buffer as a rainbow-cycling point cloud and feeds keyboard input back into
//! the attractor's parameters.
//!
//! ## Quick start
//!
//! ```ignore
//! use phasetrail::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_bedhead(-0.81, -0.92, 0.2)
//!         .with_capacity(100_000)
//!         .run()
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! Attractor ──> Generator thread ──> TrailStore ──> render loop ──> GPU
//!     ^                                                  │
//!     └────────────── parameter shifts (keyboard) ───────┘
//! ```
//!
//! The generator runs unthrottled (or lightly throttled) while the render
//! loop is paced to a fixed frame rate. By default the two share the trail
//! through [`trail::RelaxedTrail`], which allows torn reads in exchange for a
//! lock-free hot path; [`trail::LockedTrail`] is the consistent alternative.
//!
//! ## Scenes
//!
//! Five attractor rules ship with the crate: the tunable
//! [`Bedhead`](attractor::Bedhead) map (the default), the self-normalizing
//! [`HplAttractor`](attractor::HplAttractor), the
//! [`TrigMap`](attractor::TrigMap) family, a
//! [`ParametricCurve`](attractor::ParametricCurve) and a closed-form
//! [`OscillatingVector`](attractor::OscillatingVector). Anything implementing
//! [`Attractor`](attractor::Attractor) plugs in via
//! [`Viewer::with_attractor`].

pub mod attractor;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
mod gpu;
pub mod input;
pub mod shader;
pub mod trail;
mod viewer;

pub use attractor::{
    Attractor, Bedhead, BedheadParams, HplAttractor, OscillatingVector, ParametricCurve, TrigMap,
};
pub use error::{GpuError, ViewerError};
pub use generator::Generator;
pub use glam::DVec2;
pub use trail::{LockedTrail, RelaxedTrail, TrailMode, TrailStore};
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::attractor::{
        Attractor, Bedhead, BedheadParams, HplAttractor, OscillatingVector, ParametricCurve,
        TrigMap,
    };
    pub use crate::error::ViewerError;
    pub use crate::trail::{TrailMode, TrailStore};
    pub use crate::viewer::Viewer;
    pub use crate::DVec2;
}
