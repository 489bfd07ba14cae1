pub mod camera;
pub mod canvas;
pub mod shake;
pub mod smoothing;

pub mod math {
    pub use kamera_math::{Bounds, DAffine2, DVec2, clamp, dvec2, lerp};
}

pub use camera::{Camera, TICK_STEP};
pub use canvas::{CameraUniform, Canvas};
pub use shake::{NoiseSource, ShakeNoise, ShakeOptions};
pub use smoothing::{SmoothOptions, Smoothing};
