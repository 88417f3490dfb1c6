use crate::foundation::core::Fps;

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass of the moving body.
    pub mass: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Clamp output to the target once it is reached.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 10.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Config with the given stiffness and damping, unit mass.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Replace the mass.
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }
}

/// Distance from the target under which a spring counts as settled.
const REST_THRESHOLD: f64 = 0.005;
/// Upper bound on the settle search, in seconds.
const MAX_SETTLE_SECS: f64 = 60.0;

/// A spring animation sampled at integer or fractional frames.
///
/// Sampling is a pure function of the frame: there is no integrator state, so every frame can be
/// evaluated independently and in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    /// Physical parameters.
    pub config: SpringConfig,
    /// Frames to wait before the spring starts moving.
    pub delay: f64,
    /// Stretch the motion so it settles after this many frames.
    pub duration: Option<f64>,
    /// Start value.
    pub from: f64,
    /// Target value.
    pub to: f64,
}

impl Spring {
    /// A 0→1 spring with `config`.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            delay: 0.0,
            duration: None,
            from: 0.0,
            to: 1.0,
        }
    }

    /// Delay the start by `frames`.
    pub fn delay(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Stretch or compress the motion to settle after `frames`.
    pub fn duration(mut self, frames: f64) -> Self {
        self.duration = Some(frames);
        self
    }

    /// Animate between `from` and `to` instead of 0→1.
    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Value at `frame` for a timeline running at `fps`.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        let local = frame - self.delay;
        if local <= 0.0 {
            return self.from;
        }

        let local = match self.duration {
            Some(d) if d > 0.0 => {
                let natural = natural_duration_frames(self.config, fps);
                local * natural / d
            }
            _ => local,
        };

        let progress = step_response(local / fps.as_f64(), self.config);
        let progress = if self.config.overshoot_clamping {
            progress.min(1.0)
        } else {
            progress
        };
        self.from + (self.to - self.from) * progress
    }
}

/// Number of frames until the spring stays within the rest threshold of its target.
pub fn natural_duration_frames(config: SpringConfig, fps: Fps) -> f64 {
    let max_frames = (MAX_SETTLE_SECS * fps.as_f64()).ceil() as u64;
    let mut last_unsettled = 0u64;
    for f in 0..=max_frames {
        let x = step_response(f as f64 / fps.as_f64(), config);
        if (1.0 - x).abs() >= REST_THRESHOLD {
            last_unsettled = f;
        }
    }
    (last_unsettled + 1) as f64
}

/// Step response from 0 to 1 with `x(0)=0`, `v(0)=0` after `t` seconds.
fn step_response(t: f64, config: SpringConfig) -> f64 {
    let k = config.stiffness.max(0.0);
    let c = config.damping.max(0.0);
    let m = config.mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return t.min(1.0);
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let c1 = (wd * t).cos();
        let s1 = (wd * t).sin();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * (c1 + k * s1)
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
