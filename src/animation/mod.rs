//! Animation module for the scatter/tree transition
//!
//! Holds the easing curves, the exponential progress integrator that every
//! population advances once per frame, and the single mode flag that sets
//! the integrators' target.

mod easing;
mod mode;
mod progress;

pub use easing::{lerp, smoothstep};
pub use mode::{ModeController, TargetState};
pub use progress::{damp, FormationPhase, ProgressIntegrator, SETTLE_EPSILON};
