//! Trauma driven screen shake
//!
//! Trauma is a `[0, 1]` intensity that decays every frame. It is squared
//! before use, so small hits barely move the view while big ones rattle it.
//! Coherent noise keyed by time turns it into smooth jitter

use std::fmt;

use kamera_math::{DVec2, clamp, dvec2};
use noise::{NoiseFn, OpenSimplex};

/// Default frequency applied to noise coordinates
pub const DEFAULT_NOISE_FREQUENCY: f64 = 0.5;

/// Default noise seed
pub const DEFAULT_NOISE_SEED: u32 = 1337;

/// Offset along the X noise axis that decorrelates zoom from X jitter
const ZOOM_CHANNEL_OFFSET: f64 = 300.0;

/// Source of smooth, band-limited pseudo random values
///
/// Must be deterministic & continuous in its inputs, output in `[-1, 1]`
pub trait NoiseSource {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;
}

/// [`NoiseSource`] backed by any 3D function from the `noise` crate
#[derive(Clone)]
pub struct ShakeNoise<F = OpenSimplex> {
    source: F,
    /// Multiplier applied to every coordinate before sampling
    pub frequency: f64,
}

impl ShakeNoise {
    /// OpenSimplex noise seeded with `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(OpenSimplex::new(seed))
    }
}

impl Default for ShakeNoise {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl<F> ShakeNoise<F> {
    pub fn with_source(source: F) -> Self {
        Self {
            source,
            frequency: DEFAULT_NOISE_FREQUENCY,
        }
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn source(&self) -> &F {
        &self.source
    }
}

impl<F> fmt::Debug for ShakeNoise<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShakeNoise")
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}

impl<F: NoiseFn<f64, 3>> NoiseSource for ShakeNoise<F> {
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.frequency;
        clamp(self.source.get([x * f, y * f, z * f]), -1.0, 1.0)
    }
}

/// Camera shake options
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShakeOptions {
    /// Maximum position offset per axis, 0 disables that axis
    pub max_offset: DVec2,
    /// Maximum rotation in radians, 0 disables it
    pub max_angle: f64,
    /// Maximum zoom change relative to the base zoom, 0 disables it
    pub max_zoom: f64,
    /// Speed of the noise time domain
    pub time_scale: f64,
    /// Trauma lost per second
    pub decay: f64,
}

impl Default for ShakeOptions {
    fn default() -> Self {
        Self {
            max_offset: DVec2::splat(10.0),
            max_angle: 0.05,
            max_zoom: 0.1,
            time_scale: 10.0,
            decay: 0.666,
        }
    }
}

/// Per-frame shake state owned by the camera
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shake {
    pub trauma: f64,
    /// Position jitter for the current frame
    pub offset: DVec2,
    /// Angle jitter in radians for the current frame
    pub angle: f64,
    /// Zoom jitter relative to the base zoom for the current frame
    pub zoom: f64,
}

impl Shake {
    /// Clamped add into `[0, 1]`, NaN amounts are ignored
    pub fn add_trauma(&mut self, amount: f64) {
        if amount.is_nan() {
            return;
        }
        self.trauma = clamp(self.trauma + amount, 0.0, 1.0);
    }

    /// Sample the jitter for time `tick` then decay trauma by one `tick_step`
    pub fn update<N: NoiseSource + ?Sized>(
        &mut self,
        noise: &N,
        opts: &ShakeOptions,
        tick: f64,
        tick_step: f64,
    ) {
        if self.trauma <= 0.0 {
            self.offset = DVec2::ZERO;
            self.angle = 0.0;
            self.zoom = 0.0;
            return;
        }

        let shake = self.trauma * self.trauma;
        let t = tick * opts.time_scale;

        let sample = dvec2(noise.noise3(t, 0.0, 0.0), noise.noise3(0.0, t, 0.0));
        self.offset = sample * opts.max_offset * shake;
        self.angle = noise.noise3(0.0, 0.0, t) * opts.max_angle * shake;
        self.zoom = noise.noise3(t + ZOOM_CHANNEL_OFFSET, 0.0, 0.0) * opts.max_zoom * shake;

        self.trauma = clamp(self.trauma - tick_step * opts.decay, 0.0, 1.0);
        if self.trauma == 0.0 {
            log::debug!("camera trauma settled");
        }
    }

    /// Drop all trauma & jitter
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed value per noise axis so the jitter is predictable
    struct AxisNoise;

    impl NoiseSource for AxisNoise {
        fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
            if z != 0.0 {
                -1.0
            } else if y != 0.0 {
                0.25
            } else if x >= ZOOM_CHANNEL_OFFSET {
                1.0
            } else {
                0.5
            }
        }
    }

    #[test]
    fn add_trauma_clamps() {
        let mut shake = Shake::default();
        shake.add_trauma(0.6);
        shake.add_trauma(0.6);
        assert_eq!(shake.trauma, 1.0);
        shake.add_trauma(-3.0);
        assert_eq!(shake.trauma, 0.0);
        shake.add_trauma(0.5);
        shake.add_trauma(f64::NAN);
        assert_eq!(shake.trauma, 0.5);
    }

    #[test]
    fn jitter_scales_with_trauma_squared() {
        let opts = ShakeOptions::default();
        let mut shake = Shake {
            trauma: 0.5,
            ..Default::default()
        };
        shake.update(&AxisNoise, &opts, 1.0, 1.0 / 60.0);

        let s = 0.25;
        assert_eq!(shake.offset, dvec2(0.5 * 10.0 * s, 0.25 * 10.0 * s));
        assert_eq!(shake.angle, -1.0 * 0.05 * s);
        assert_eq!(shake.zoom, 1.0 * 0.1 * s);
        assert!((shake.trauma - (0.5 - 0.666 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn no_trauma_means_no_jitter() {
        let mut shake = Shake {
            trauma: 0.0,
            offset: dvec2(3.0, 3.0),
            angle: 0.1,
            zoom: 0.1,
        };
        shake.update(&AxisNoise, &ShakeOptions::default(), 5.0, 1.0 / 60.0);
        assert_eq!(shake, Shake::default());
    }

    #[test]
    fn shake_noise_is_bounded_and_deterministic() {
        let a = ShakeNoise::new(7);
        let b = ShakeNoise::new(7);
        for i in 0..500 {
            let t = i as f64 * 0.37;
            let v = a.noise3(t, 0.0, 0.0);
            assert!((-1.0..=1.0).contains(&v));
            assert_eq!(v, b.noise3(t, 0.0, 0.0));
        }
    }

    #[test]
    fn shake_noise_is_continuous() {
        let noise = ShakeNoise::default();
        for i in 0..200 {
            let t = i as f64 * 0.5;
            let d = (noise.noise3(0.0, t, 0.0) - noise.noise3(0.0, t + 1e-4, 0.0)).abs();
            assert!(d < 0.01, "jump of {d} at {t}");
        }
    }

    #[test]
    fn frequency_scales_coordinates() {
        let base = ShakeNoise::new(3).with_frequency(1.0);
        let half = ShakeNoise::new(3).with_frequency(0.5);
        assert_eq!(half.noise3(2.4, 0.0, 0.0), base.noise3(1.2, 0.0, 0.0));
    }
}
