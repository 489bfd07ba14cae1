//! Position trackers used by [`Camera::look_at`](crate::camera::Camera::look_at)
//!
//! Each tracker moves a tracked position toward a target once per frame. The
//! only state they carry (tracked position & spring velocity) is owned by the
//! camera and passed in

use std::fmt;

use kamera_math::{DVec2, dvec2, lerp};

use crate::camera::TICK_STEP;

/// Fixed simulation step of the spring, independent of the real frame time
pub const DAMP_STEP: f64 = TICK_STEP;

/// Smallest smooth time the spring accepts, avoids dividing by zero
pub const MIN_SMOOTH_TIME: f64 = 0.0001;

/// Camera movement smoothing type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Smoothing {
    /// Instant movement to the target, no smoothing
    #[default]
    None,
    /// Blend a fixed fraction of the remaining distance every frame
    Lerp,
    /// Critically damped spring
    SmoothDamp,
}

impl Smoothing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Smoothing::None => "None",
            Smoothing::Lerp => "Lerp",
            Smoothing::SmoothDamp => "SmoothDamp",
        }
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Camera movement smoothing settings, every parameter is per axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmoothOptions {
    /// Fraction of the remaining distance covered every frame, in `[0, 1]`
    ///
    /// A smaller value reaches the target slower. Not frame rate compensated
    pub lerp_speed: DVec2,
    /// Approximate time in seconds the spring takes to reach the target
    ///
    /// A smaller value reaches the target faster
    pub damp_time: DVec2,
    /// Maximum speed in world units per second while smooth damping
    pub damp_max_speed: DVec2,
    /// Snap the X axis to the target instead of smoothing it
    pub x_disabled: bool,
    /// Snap the Y axis to the target instead of smoothing it
    pub y_disabled: bool,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self {
            lerp_speed: DVec2::splat(0.09),
            damp_time: DVec2::splat(0.2),
            damp_max_speed: DVec2::splat(1000.0),
            x_disabled: false,
            y_disabled: false,
        }
    }
}

impl SmoothOptions {
    fn enabled(&self) -> (bool, bool) {
        (!self.x_disabled, !self.y_disabled)
    }
}

/// Tracked state advanced by a smoothing step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tracker {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl Tracker {
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
        }
    }

    /// Advance one frame toward `target` using `mode`
    pub fn step(&mut self, mode: Smoothing, target: DVec2, opts: &SmoothOptions) {
        match mode {
            Smoothing::None => self.position = target,
            Smoothing::Lerp => self.lerp(target, opts),
            Smoothing::SmoothDamp => self.smooth_damp(target, opts),
        }
    }

    /// Jump straight to `target` & forget any velocity, used for cuts
    pub fn snap(&mut self, target: DVec2) {
        *self = Self::at(target);
    }

    /// Per axis linear interpolation, a disabled axis jumps to the target
    pub fn lerp(&mut self, target: DVec2, opts: &SmoothOptions) {
        let (x_on, y_on) = opts.enabled();
        self.snap_disabled_axes(target, x_on, y_on);

        self.position = dvec2(
            lerp(self.position.x, target.x, opts.lerp_speed.x),
            lerp(self.position.y, target.y, opts.lerp_speed.y),
        );
    }

    /// Critically damped spring toward `target` (Unity style `SmoothDamp`)
    ///
    /// Disabled axes jump to the target & keep their velocity untouched. They
    /// take no part in the spring or the overshoot test
    pub fn smooth_damp(&mut self, target: DVec2, opts: &SmoothOptions) {
        let (x_on, y_on) = opts.enabled();
        self.snap_disabled_axes(target, x_on, y_on);
        let held = self.velocity;
        if !x_on {
            self.velocity.x = 0.0;
        }
        if !y_on {
            self.velocity.y = 0.0;
        }

        let smooth_time = opts.damp_time.max(DVec2::splat(MIN_SMOOTH_TIME));
        let omega = 2.0 / smooth_time;
        let x = omega * DAMP_STEP;
        // rational approximation of e^-x, keep the exact coefficients
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let max_change = opts.damp_max_speed * smooth_time;
        let change = limit_change(self.position - target, max_change);
        let adjusted_target = self.position - change;

        let temp = (self.velocity + change * omega) * DAMP_STEP;
        self.velocity = (self.velocity - temp * omega) * exp;
        let mut output = adjusted_target + (change + temp) * exp;

        if (target - self.position).dot(output - target) > 0.0 {
            output = target;
            self.velocity = (output - target) / DAMP_STEP;
        }

        self.position = output;
        if !x_on {
            self.velocity.x = held.x;
        }
        if !y_on {
            self.velocity.y = held.y;
        }
    }

    fn snap_disabled_axes(&mut self, target: DVec2, x_on: bool, y_on: bool) {
        if !x_on {
            self.position.x = target.x;
        }
        if !y_on {
            self.position.y = target.y;
        }
    }
}

// Clamp each component to `max` in magnitude, sign preserved
fn limit_change(change: DVec2, max: DVec2) -> DVec2 {
    let axis = |c: f64, m: f64| {
        if c * c > m * m { m.copysign(c) } else { c }
    };
    dvec2(axis(change.x, max.x), axis(change.y, max.y))
}
