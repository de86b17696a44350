//! Exponential progress integration
//!
//! Each population owns one `ProgressIntegrator`. Progress approaches the
//! target along `target + (current - target) * exp(-rate * dt)`, which never
//! overshoots and reaches the target only in the limit. Reversing the target
//! mid-flight simply reverses the approach from wherever progress is.

/// Distance from a terminal value below which a population counts as settled
pub const SETTLE_EPSILON: f32 = 1e-3;

/// Frame-rate independent exponential smoothing of `current` toward `target`.
///
/// Negative or non-finite `dt` is treated as a zero-length frame.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    target + (current - target) * (-rate * dt).exp()
}

/// Where a population sits on the scatter/tree continuum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationPhase {
    /// Progress settled near 0
    Scattered,
    /// Anywhere strictly between the two settled bands
    Transitioning,
    /// Progress settled near 1
    Assembled,
}

impl FormationPhase {
    pub fn from_progress(progress: f32) -> Self {
        if progress <= SETTLE_EPSILON {
            FormationPhase::Scattered
        } else if progress >= 1.0 - SETTLE_EPSILON {
            FormationPhase::Assembled
        } else {
            FormationPhase::Transitioning
        }
    }
}

/// Smoothed scalar progress for one population
#[derive(Debug, Clone, Copy)]
pub struct ProgressIntegrator {
    /// Current progress (0.0 = scattered, 1.0 = assembled)
    progress: f32,
    /// Smoothing rate in 1/seconds
    rate: f32,
}

impl ProgressIntegrator {
    /// Start fully scattered
    pub fn new(rate: f32) -> Self {
        Self::with_progress(rate, 0.0)
    }

    pub fn with_progress(rate: f32, progress: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            rate,
        }
    }

    /// Advance one frame toward `target` and return the new progress
    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        let target = target.clamp(0.0, 1.0);
        self.progress = damp(self.progress, target, self.rate, dt).clamp(0.0, 1.0);
        self.progress
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Whether progress is within `epsilon` of `target`
    pub fn is_settled(&self, target: f32, epsilon: f32) -> bool {
        (self.progress - target).abs() < epsilon
    }

    pub fn phase(&self) -> FormationPhase {
        FormationPhase::from_progress(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damp_reference_value() {
        let p = damp(0.0, 1.0, 2.0, 0.1);
        assert!((p - 0.1813).abs() < 1e-3, "got {}", p);
    }

    #[test]
    fn test_damp_ignores_bad_dt() {
        assert_eq!(damp(0.3, 1.0, 2.0, -0.5), 0.3);
        assert_eq!(damp(0.3, 1.0, 2.0, f32::NAN), 0.3);
        assert_eq!(damp(0.3, 1.0, 2.0, f32::INFINITY), 0.3);
    }

    #[test]
    fn test_large_dt_lands_on_target() {
        let mut integrator = ProgressIntegrator::new(2.0);
        let p = integrator.advance(1.0, 1000.0);
        assert!((p - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_convergence() {
        for &rate in &[0.5, 1.0, 1.8, 2.0, 5.0] {
            let mut integrator = ProgressIntegrator::new(rate);
            let dt = 1.0 / 60.0;
            let mut distance = 1.0;
            let mut ticks = 0;
            while distance >= SETTLE_EPSILON {
                integrator.advance(1.0, dt);
                let next = (1.0 - integrator.progress()).abs();
                assert!(next < distance, "distance must strictly shrink (rate {})", rate);
                distance = next;
                ticks += 1;
                // ln(1/eps) / (rate * dt) ticks with some slack
                let bound = (7.0 / (rate * dt)).ceil() as usize + 10;
                assert!(ticks <= bound, "rate {} took more than {} ticks", rate, bound);
            }
        }
    }

    #[test]
    fn test_idempotent_at_rest() {
        let mut integrator = ProgressIntegrator::with_progress(1.8, 0.9995);
        assert!(integrator.is_settled(1.0, SETTLE_EPSILON));
        for _ in 0..120 {
            let before = integrator.progress();
            integrator.advance(1.0, 1.0 / 60.0);
            assert!((integrator.progress() - before).abs() < SETTLE_EPSILON);
        }
    }

    #[test]
    fn test_bounded_under_reversals() {
        let mut integrator = ProgressIntegrator::new(5.0);
        let dts = [1.0 / 240.0, 1.0 / 30.0, 0.0, 0.5, 1.0 / 60.0, 3.0];
        for i in 0..500 {
            let target = if (i / 7) % 2 == 0 { 1.0 } else { 0.0 };
            let p = integrator.advance(target, dts[i % dts.len()]);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_reversal_is_continuous() {
        let mut integrator = ProgressIntegrator::new(2.0);
        let dt = 1.0 / 60.0;
        for _ in 0..30 {
            integrator.advance(1.0, dt);
        }
        let before = integrator.progress();
        let after = integrator.advance(0.0, dt);
        // One frame can move at most the full gap times (1 - exp(-rate*dt))
        let max_step = before * (1.0 - (-2.0f32 * dt).exp()) + 1e-6;
        assert!(after < before);
        assert!(before - after <= max_step);
    }

    #[test]
    fn test_phase() {
        assert_eq!(FormationPhase::from_progress(0.0), FormationPhase::Scattered);
        assert_eq!(FormationPhase::from_progress(0.5), FormationPhase::Transitioning);
        assert_eq!(FormationPhase::from_progress(1.0), FormationPhase::Assembled);
        assert_eq!(ProgressIntegrator::new(1.0).phase(), FormationPhase::Scattered);
    }

    #[test]
    fn test_with_progress_clamps() {
        assert_eq!(ProgressIntegrator::with_progress(1.0, 2.0).progress(), 1.0);
        assert_eq!(ProgressIntegrator::with_progress(1.0, -1.0).progress(), 0.0);
        assert_eq!(ProgressIntegrator::new(1.5).rate(), 1.5);
    }
}
