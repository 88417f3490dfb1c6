use crate::animation::ease::Ease;

/// What to do when the input falls outside the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Extrapolate {
    /// Continue the boundary segment linearly.
    #[default]
    Extend,
    /// Pin to the boundary output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolateOpts {
    /// Easing applied to the normalized position within a segment.
    pub ease: Ease,
    /// Behavior below the first input point.
    pub left: Extrapolate,
    /// Behavior above the last input point.
    pub right: Extrapolate,
}

impl Default for InterpolateOpts {
    fn default() -> Self {
        Self {
            ease: Ease::Linear,
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        }
    }
}

impl InterpolateOpts {
    /// Clamp both sides.
    pub fn clamped() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Clamp only the right side (left extends).
    pub fn clamp_right() -> Self {
        Self {
            right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Replace the easing function.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Map `input` from a two-point input range onto a two-point output range.
pub fn interpolate(input: f64, from: [f64; 2], to: [f64; 2], opts: InterpolateOpts) -> f64 {
    let [in0, in1] = from;
    let [out0, out1] = to;

    if input < in0.min(in1) || input > in0.max(in1) {
        let side = if (input < in0) == (in0 <= in1) {
            opts.left
        } else {
            opts.right
        };
        match side {
            Extrapolate::Identity => return input,
            Extrapolate::Clamp => {
                return if (input < in0) == (in0 <= in1) {
                    out0
                } else {
                    out1
                };
            }
            Extrapolate::Extend => {}
        }
    }

    if in1 == in0 {
        return if input >= in1 { out1 } else { out0 };
    }

    let t = (input - in0) / (in1 - in0);
    // Easing only shapes the in-range part; extension stays linear.
    let shaped = if (0.0..=1.0).contains(&t) {
        opts.ease.apply(t)
    } else {
        t
    };
    out0 + (out1 - out0) * shaped
}

/// Map `input` through a monotonically increasing piecewise-linear range.
///
/// `inputs` and `outputs` must have the same length (at least two points). Extra points on
/// either side are ignored.
pub fn interpolate_points(input: f64, inputs: &[f64], outputs: &[f64], opts: InterpolateOpts) -> f64 {
    let n = inputs.len().min(outputs.len());
    if n == 0 {
        return input;
    }
    if n == 1 {
        return outputs[0];
    }
    let seg = inputs[..n]
        .windows(2)
        .position(|w| input < w[1])
        .unwrap_or(n - 2);
    let mut seg_opts = opts;
    if seg != 0 {
        seg_opts.left = Extrapolate::Extend;
    }
    if seg != n - 2 {
        seg_opts.right = Extrapolate::Extend;
    }
    interpolate(
        input,
        [inputs[seg], inputs[seg + 1]],
        [outputs[seg], outputs[seg + 1]],
        seg_opts,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
