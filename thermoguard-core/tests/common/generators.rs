//! Deterministic temperature generators
//!
//! No randomness from the environment: every generator is seeded so a failing
//! test reproduces exactly.

/// Sensor-like series: slow drift plus bounded noise
pub struct NoisyRoom {
    seed: u32,
    base: f32,
    drift_per_sample: f32,
    noise_amplitude: f32,
    sample: u32,
}

impl NoisyRoom {
    pub fn new(base: f32) -> Self {
        Self {
            seed: 42,
            base,
            drift_per_sample: 0.002,
            noise_amplitude: 0.05,
            sample: 0,
        }
    }

    pub fn with_noise(mut self, amplitude: f32) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    pub fn with_drift(mut self, per_sample: f32) -> Self {
        self.drift_per_sample = per_sample;
        self
    }

    /// Uniform in [-1, 1]
    fn unit_noise(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let unit = (self.seed >> 16) as f32 / 65_535.0;
        unit * 2.0 - 1.0
    }

    pub fn next_temperature(&mut self) -> f32 {
        let t = self.base
            + self.sample as f32 * self.drift_per_sample
            + self.unit_noise() * self.noise_amplitude;
        self.sample += 1;
        t
    }

    pub fn take(&mut self, n: usize) -> Vec<f32> {
        (0..n).map(|_| self.next_temperature()).collect()
    }
}

/// `n` copies of the same temperature
pub fn flat(temperature: f32, n: usize) -> Vec<f32> {
    vec![temperature; n]
}

/// base, base+step, base, base+step, ...
pub fn alternating(base: f32, step: f32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| if i % 2 == 0 { base } else { base + step })
        .collect()
}
