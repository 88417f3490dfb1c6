/// Easing functions used to map normalized animation progress.
///
/// The `*Ease` and `*Back` variants follow the curve family used by frame-driven motion
/// libraries: `ease` is the cubic bezier `(0.42, 0, 1, 1)`, `Out(f)` mirrors `f` and `InOut(f)`
/// splices both halves.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Bezier `ease` curve.
    Ease,
    /// Mirrored bezier `ease` curve.
    OutEase,
    /// Symmetric bezier `ease` curve.
    InOutEase,
    /// Mirrored "back" curve that overshoots by `overshoot` before settling.
    OutBack(f64),
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Ease => ease_curve(t),
            Self::OutEase => 1.0 - ease_curve(1.0 - t),
            Self::InOutEase => {
                if t < 0.5 {
                    ease_curve(t * 2.0) / 2.0
                } else {
                    1.0 - ease_curve((1.0 - t) * 2.0) / 2.0
                }
            }
            Self::OutBack(s) => {
                let u = 1.0 - t;
                1.0 - u * u * ((s + 1.0) * u - s)
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

fn ease_curve(t: f64) -> f64 {
    cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0)
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Given x in [0,1], solve u such that bx(u)=x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson, then bisection if the slope flattened out.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }
    if (sample_curve(x1, x2, t) - x).abs() > 1e-6 {
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..32 {
            t = (lo + hi) / 2.0;
            if sample_curve(x1, x2, t) < x {
                lo = t;
            } else {
                hi = t;
            }
        }
    }
    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
