use std::fmt;

use kamera_math::{Bounds, DAffine2, DVec2};

use crate::{
    shake::{NoiseSource, Shake, ShakeNoise, ShakeOptions},
    smoothing::{SmoothOptions, Smoothing, Tracker},
};

/// Simulated time added to the tick every update
pub const TICK_STEP: f64 = 1.0 / 60.0;

/// The tick wraps back to 0 past this value
pub const TICK_WRAP: f64 = 1_000_000.0;

/// A 2D camera that follows a target
///
/// Call [`Camera::look_at`] exactly once per frame, then use the transform &
/// conversion methods as often as needed. Calling it twice in a frame advances
/// smoothing & shake twice
#[derive(Debug)]
pub struct Camera<N = ShakeNoise> {
    /// Base zoom (scale) factor, 1 is no zoom
    pub zoom: f64,
    /// Movement smoothing type
    pub smoothing: Smoothing,
    pub smooth_options: SmoothOptions,
    /// When false [`Camera::add_trauma`] does nothing & shake is always 0
    pub shake_enabled: bool,
    pub shake_options: ShakeOptions,

    noise: N,
    angle: f64,
    size: DVec2,
    center_offset: DVec2,
    tracker: Tracker,
    shake: Shake,
    tick: f64,

    center: DVec2,
    top_left: DVec2,
    effective_angle: f64,
    effective_zoom: f64,
}

impl Camera {
    /// Create a camera of `size` centered on `look_at` with default noise
    pub fn new(look_at: DVec2, size: DVec2) -> Self {
        Self::with_noise(look_at, size, ShakeNoise::default())
    }
}

impl<N: NoiseSource> Camera<N> {
    /// Create a camera of `size` centered on `look_at` using `noise` for shake
    pub fn with_noise(look_at: DVec2, size: DVec2, noise: N) -> Self {
        let mut cam = Self {
            zoom: 1.0,
            smoothing: Smoothing::None,
            smooth_options: SmoothOptions::default(),
            shake_enabled: false,
            shake_options: ShakeOptions::default(),
            noise,
            angle: 0.0,
            size,
            center_offset: -size * 0.5,
            tracker: Tracker::at(look_at),
            shake: Shake::default(),
            tick: 0.0,
            center: look_at,
            top_left: look_at - size * 0.5,
            effective_angle: 0.0,
            effective_zoom: 1.0,
        };
        cam.look_at(look_at);
        cam
    }

    /// Move the view toward `target`, centering it there once smoothing settles
    ///
    /// Smoothing & shake only advance through this method
    pub fn look_at(&mut self, target: DVec2) {
        self.tracker.step(self.smoothing, target, &self.smooth_options);

        if self.shake_enabled {
            self.shake.update(&self.noise, &self.shake_options, self.tick, TICK_STEP);

            self.tick += TICK_STEP;
            if self.tick > TICK_WRAP {
                self.tick = 0.0;
            }
        } else {
            self.shake.clear();
        }

        self.compose();
        log::trace!(
            "look_at {target} -> center {} trauma {:.3}",
            self.center,
            self.shake.trauma
        );
    }

    // Rebuild the derived view from tracked position & current jitter
    fn compose(&mut self) {
        self.effective_angle = self.angle + self.shake.angle;
        self.effective_zoom = self.zoom + self.zoom * self.shake.zoom;
        self.center = self.tracker.position + self.shake.offset;
        self.top_left = self.center + self.center_offset;
    }

    /// Add shake trauma, clamped to `[0, 1]`. Ignored while shake is disabled
    pub fn add_trauma(&mut self, amount: f64) {
        if self.shake_enabled {
            self.shake.add_trauma(amount);
        }
    }

    pub fn trauma(&self) -> f64 {
        self.shake.trauma
    }

    /// Position jitter applied this frame
    pub fn trauma_offset(&self) -> DVec2 {
        self.shake.offset
    }

    /// Internal noise time
    pub fn tick(&self) -> f64 {
        self.tick
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn noise_mut(&mut self) -> &mut N {
        &mut self.noise
    }

    /// Base rotation in radians, without shake
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the base rotation in radians, takes effect on the next update
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Rotation in radians including shake
    pub fn effective_angle(&self) -> f64 {
        self.effective_angle
    }

    /// Zoom including shake
    pub fn effective_zoom(&self) -> f64 {
        self.effective_zoom
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    /// Resize the viewport, keeping the current center in place
    pub fn set_size(&mut self, size: DVec2) {
        log::debug!("camera resized {} -> {size}", self.size);
        self.size = size;
        self.center_offset = -size * 0.5;
        self.top_left = self.center + self.center_offset;
    }

    /// Vector from the viewport center to its top-left corner
    pub fn center_offset(&self) -> DVec2 {
        self.center_offset
    }

    /// Top-left corner of the view in world space
    pub fn top_left(&self) -> DVec2 {
        self.top_left
    }

    /// Center of the view in world space
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Right edge of the view in world space
    pub fn right(&self) -> f64 {
        self.top_left.x + self.size.x
    }

    /// Bottom edge of the view in world space
    pub fn bottom(&self) -> f64 {
        self.top_left.y + self.size.y
    }

    /// The visible world region, rotation is ignored
    ///
    /// Useful for culling or visibility checks
    pub fn bounding_box(&self) -> Bounds {
        Bounds::from_extents(self.center(), self.size * 0.5)
    }

    /// Teleport the center to `center`, cancelling any smoothing in progress
    pub fn set_center(&mut self, center: DVec2) {
        log::debug!("camera cut to center {center}");
        self.tracker.snap(center);
        self.look_at(center);
    }

    /// Teleport the top-left corner to `top_left` without advancing the frame
    pub fn set_top_left(&mut self, top_left: DVec2) {
        log::debug!("camera cut to top-left {top_left}");
        self.tracker.snap(top_left - self.center_offset - self.shake.offset);
        self.compose();
    }

    /// Reset rotation to 0 & zoom to 1, position & trauma are untouched
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.zoom = 1.0;
        self.effective_zoom = 1.0;
    }

    /// The world to screen transform for the current frame
    ///
    /// Rotation & zoom pivot around the viewport center
    pub fn transform(&self) -> DAffine2 {
        let restore = self.center_offset.abs();
        DAffine2::from_translation(restore)
            * DAffine2::from_scale(DVec2::splat(self.effective_zoom))
            * DAffine2::from_angle(self.effective_angle)
            * DAffine2::from_translation(self.center_offset)
            * DAffine2::from_translation(-self.top_left)
    }

    /// Converts a point from world space to screen space
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self.transform().transform_point2(world)
    }

    /// Converts a point from screen space back to world space
    ///
    /// Returns `None` when the transform can't be inverted (zoom of 0)
    pub fn try_screen_to_world(&self, screen: DVec2) -> Option<DVec2> {
        let transform = self.transform();
        let det = transform.matrix2.determinant();
        if det == 0.0 || !det.is_finite() {
            log::debug!("camera transform is singular (zoom {})", self.effective_zoom);
            return None;
        }
        Some(transform.inverse().transform_point2(screen))
    }

    /// Converts a point from screen space back to world space
    ///
    /// Both coordinates are NaN when the transform can't be inverted
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        self.try_screen_to_world(screen).unwrap_or(DVec2::NAN)
    }

    /// Smoothed position before shake is applied
    pub fn tracked_position(&self) -> DVec2 {
        self.tracker.position
    }

    /// Spring velocity in world units per second, only moves in smooth damp mode
    pub fn tracked_velocity(&self) -> DVec2 {
        self.tracker.velocity
    }
}

impl<N> fmt::Display for Camera<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let center = self.center;
        let opts = &self.smooth_options;
        writeln!(f, "TargetX: {:.2}", center.x)?;
        writeln!(f, "TargetY: {:.2}", center.y)?;
        writeln!(f, "Top-left X: {:.2}", self.top_left.x)?;
        writeln!(f, "Top-left Y: {:.2}", self.top_left.y)?;
        writeln!(f, "Size: {:.2} {:.2}", self.size.x, self.size.y)?;
        writeln!(f, "Cam Rotation: {:.2}", self.effective_angle)?;
        writeln!(f, "Zoom factor: {:.2}", self.effective_zoom)?;
        writeln!(f, "ShakeEnabled: {}", self.shake_enabled)?;
        writeln!(f, "Smoothing Function: {}", self.smoothing)?;
        writeln!(f, "LerpSpeedX: {:.4}", opts.lerp_speed.x)?;
        writeln!(f, "LerpSpeedY: {:.4}", opts.lerp_speed.y)?;
        writeln!(f, "SmoothDampTimeX: {:.4}", opts.damp_time.x)?;
        writeln!(f, "SmoothDampTimeY: {:.4}", opts.damp_time.y)?;
        writeln!(f, "SmoothDampMaxSpeedX: {:.2}", opts.damp_max_speed.x)?;
        write!(f, "SmoothDampMaxSpeedY: {:.2}", opts.damp_max_speed.y)
    }
}
