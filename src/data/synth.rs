use super::model::{Sample, Trajectory};
use crate::error::AnalysisError;

/// Seeded xoshiro256** generator; reproducible walks without an RNG crate.
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        // Spread the seed over the four state words with an LCG step.
        let mut state = [0u64; 4];
        let mut x = seed;
        for word in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *word = x;
        }
        SimpleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.state;
        let out = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= shifted;
        s[3] = s[3].rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Two independent N(0, σ²) draws from one Box-Muller transform.
    pub fn normal_pair(&mut self, std_dev: f64) -> (f64, f64) {
        let u1 = self.next_unit().max(f64::MIN_POSITIVE);
        let angle = 2.0 * std::f64::consts::PI * self.next_unit();
        let radius = std_dev * (-2.0 * u1.ln()).sqrt();
        (radius * angle.cos(), radius * angle.sin())
    }
}

/// Parameters of a synthetic 2D Brownian walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkSpec {
    /// Number of samples to record.
    pub samples: usize,
    /// Uniform sampling interval (s).
    pub dt: f64,
    /// Diffusion coefficient (m²/s).
    pub diffusion: f64,
}

/// Generate a walk starting at the origin with Gaussian increments of
/// per-axis variance `2·D·dt`, so that MSD(t) = 4·D·t in the plane.
pub fn brownian_walk(
    label: impl Into<String>,
    spec: WalkSpec,
    rng: &mut SimpleRng,
) -> Result<Trajectory, AnalysisError> {
    let sigma = (2.0 * spec.diffusion * spec.dt).sqrt();
    let mut x = 0.0;
    let mut y = 0.0;
    let samples = (0..spec.samples)
        .map(|i| {
            if i > 0 {
                let (dx, dy) = rng.normal_pair(sigma);
                x += dx;
                y += dy;
            }
            // Timestamps from the index so equal lags give bit-identical times.
            Sample::new(i as f64 * spec.dt, x, y)
        })
        .collect();
    Trajectory::new(label, samples)
}
