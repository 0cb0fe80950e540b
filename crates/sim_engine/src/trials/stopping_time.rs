//! Sum-of-uniforms stopping time.
//!
//! Draw U(0,1) values until their running sum exceeds 1 and count the draws.
//! The expected count is e, so the sample mean of many trials estimates e.

use sim_core::{Result, SeededSource, SimError};
use tracing::debug;

use crate::estimator::Trial;

/// Default draw cap per trial.
pub const DEFAULT_DRAW_CAP: u32 = 15;

/// Counts uniform draws until their sum exceeds 1.
///
/// The draw cap is a guard against non-termination, not part of the
/// mathematics: P(K > 15) = 1/15! ≈ 7.6e-13. A capped trial returns the cap
/// itself and is counted in [`capped_trials`](Self::capped_trials).
///
/// # Examples
///
/// ```rust
/// use sim_core::SeededSource;
/// use sim_engine::estimator::Trial;
/// use sim_engine::trials::StoppingTimeTrial;
///
/// let mut trial = StoppingTimeTrial::new();
/// let mut source = SeededSource::from_seed(1);
/// let k = trial.run(&mut source);
/// assert!(k >= 2.0 && k <= 15.0);
/// ```
#[derive(Clone, Debug)]
pub struct StoppingTimeTrial {
    cap: u32,
    capped: u64,
}

impl Default for StoppingTimeTrial {
    fn default() -> Self {
        Self {
            cap: DEFAULT_DRAW_CAP,
            capped: 0,
        }
    }
}

impl StoppingTimeTrial {
    /// Trial with the default cap of 15 draws.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trial with a custom draw cap.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] when `cap` is 0.
    pub fn with_cap(cap: u32) -> Result<Self> {
        if cap == 0 {
            return Err(SimError::invalid_parameter("cap", "draw cap must be at least 1"));
        }
        Ok(Self { cap, capped: 0 })
    }

    /// Configured draw cap.
    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Number of trials that stopped at the cap.
    pub fn capped_trials(&self) -> u64 {
        self.capped
    }
}

impl Trial for StoppingTimeTrial {
    fn run(&mut self, source: &mut SeededSource) -> f64 {
        let mut sum = 0.0;
        let mut draws = 0u32;
        loop {
            sum += source.gen_uniform();
            draws += 1;
            if sum > 1.0 {
                return f64::from(draws);
            }
            if draws >= self.cap {
                self.capped += 1;
                debug!(
                    cap = self.cap,
                    seed = source.seed(),
                    sum,
                    "stopping-time trial hit its draw cap"
                );
                return f64::from(draws);
            }
        }
    }
}
