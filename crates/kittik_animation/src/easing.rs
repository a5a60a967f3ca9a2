//! Easing functions for animations
//!
//! Every curve follows the classic `(t, b, c, d)` signature: elapsed time,
//! start value, change in value and total duration. The same curves are
//! addressable by their camelCase names (`"outQuad"`, `"inOutElastic"`, ...).

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_PERIOD: f64 = 0.3;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Easing {
    Linear,
    InQuad,
    #[default]
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Easing {
    /// Every supported easing, in table order
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::InOutElastic,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
    ];

    /// Name of the easing as used in configuration and serialized form
    pub const fn as_str(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InQuad => "inQuad",
            Easing::OutQuad => "outQuad",
            Easing::InOutQuad => "inOutQuad",
            Easing::InCubic => "inCubic",
            Easing::OutCubic => "outCubic",
            Easing::InOutCubic => "inOutCubic",
            Easing::InQuart => "inQuart",
            Easing::OutQuart => "outQuart",
            Easing::InOutQuart => "inOutQuart",
            Easing::InQuint => "inQuint",
            Easing::OutQuint => "outQuint",
            Easing::InOutQuint => "inOutQuint",
            Easing::InSine => "inSine",
            Easing::OutSine => "outSine",
            Easing::InOutSine => "inOutSine",
            Easing::InExpo => "inExpo",
            Easing::OutExpo => "outExpo",
            Easing::InOutExpo => "inOutExpo",
            Easing::InCirc => "inCirc",
            Easing::OutCirc => "outCirc",
            Easing::InOutCirc => "inOutCirc",
            Easing::InElastic => "inElastic",
            Easing::OutElastic => "outElastic",
            Easing::InOutElastic => "inOutElastic",
            Easing::InBack => "inBack",
            Easing::OutBack => "outBack",
            Easing::InOutBack => "inOutBack",
            Easing::InBounce => "inBounce",
            Easing::OutBounce => "outBounce",
            Easing::InOutBounce => "inOutBounce",
        }
    }

    /// Evaluate the easing at elapsed time `t` for a transition from `b` by
    /// `c` over duration `d`.
    ///
    /// Defined for `t` in `[0, d]`; returns `b` at `t = 0` and `b + c` at
    /// `t = d`. A non-positive duration yields the end value.
    pub fn ease(self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        if d <= 0.0 {
            return b + c;
        }

        match self {
            Easing::Linear => c * t / d + b,

            Easing::InQuad => {
                let t = t / d;
                c * t * t + b
            }
            Easing::OutQuad => {
                let t = t / d;
                -c * t * (t - 2.0) + b
            }
            Easing::InOutQuad => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t * t + b
                } else {
                    let t = t - 1.0;
                    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
                }
            }

            Easing::InCubic => c * (t / d).powi(3) + b,
            Easing::OutCubic => c * ((t / d - 1.0).powi(3) + 1.0) + b,
            Easing::InOutCubic => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(3) + b
                } else {
                    c / 2.0 * ((t - 2.0).powi(3) + 2.0) + b
                }
            }

            Easing::InQuart => c * (t / d).powi(4) + b,
            Easing::OutQuart => -c * ((t / d - 1.0).powi(4) - 1.0) + b,
            Easing::InOutQuart => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(4) + b
                } else {
                    -c / 2.0 * ((t - 2.0).powi(4) - 2.0) + b
                }
            }

            Easing::InQuint => c * (t / d).powi(5) + b,
            Easing::OutQuint => c * ((t / d - 1.0).powi(5) + 1.0) + b,
            Easing::InOutQuint => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * t.powi(5) + b
                } else {
                    c / 2.0 * ((t - 2.0).powi(5) + 2.0) + b
                }
            }

            Easing::InSine => -c * (t / d * (PI / 2.0)).cos() + c + b,
            Easing::OutSine => c * (t / d * (PI / 2.0)).sin() + b,
            Easing::InOutSine => -c / 2.0 * ((PI * t / d).cos() - 1.0) + b,

            Easing::InExpo => {
                if t <= 0.0 {
                    b
                } else {
                    c * 2f64.powf(10.0 * (t / d - 1.0)) + b
                }
            }
            Easing::OutExpo => {
                if t >= d {
                    b + c
                } else {
                    c * (1.0 - 2f64.powf(-10.0 * t / d)) + b
                }
            }
            Easing::InOutExpo => {
                if t <= 0.0 {
                    return b;
                }
                if t >= d {
                    return b + c;
                }
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b
                } else {
                    c / 2.0 * (2.0 - 2f64.powf(-10.0 * (t - 1.0))) + b
                }
            }

            Easing::InCirc => -c * ((1.0 - (t / d).powi(2)).sqrt() - 1.0) + b,
            Easing::OutCirc => {
                let t = t / d - 1.0;
                c * (1.0 - t * t).sqrt() + b
            }
            Easing::InOutCirc => {
                let t = t / (d / 2.0);
                if t < 1.0 {
                    -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
                }
            }

            Easing::InElastic => {
                if t <= 0.0 {
                    return b;
                }
                if t >= d {
                    return b + c;
                }
                let p = d * ELASTIC_PERIOD;
                let s = p / 4.0;
                let t = t / d - 1.0;
                -(c * 2f64.powf(10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin()) + b
            }
            Easing::OutElastic => {
                if t <= 0.0 {
                    return b;
                }
                if t >= d {
                    return b + c;
                }
                let p = d * ELASTIC_PERIOD;
                let s = p / 4.0;
                let t = t / d;
                c * 2f64.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
            }
            Easing::InOutElastic => {
                if t <= 0.0 {
                    return b;
                }
                if t >= d {
                    return b + c;
                }
                let p = d * (ELASTIC_PERIOD * 1.5);
                let s = p / 4.0;
                let t = t / (d / 2.0) - 1.0;
                let wave = ((t * d - s) * (2.0 * PI) / p).sin();
                if t < 0.0 {
                    -0.5 * (c * 2f64.powf(10.0 * t) * wave) + b
                } else {
                    c * 2f64.powf(-10.0 * t) * wave * 0.5 + c + b
                }
            }

            Easing::InBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d;
                c * t * t * ((s + 1.0) * t - s) + b
            }
            Easing::OutBack => {
                let s = BACK_OVERSHOOT;
                let t = t / d - 1.0;
                c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
            }
            Easing::InOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let t = t / (d / 2.0);
                if t < 1.0 {
                    c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
                } else {
                    let t = t - 2.0;
                    c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
                }
            }

            Easing::InBounce => c - bounce_out(d - t, 0.0, c, d) + b,
            Easing::OutBounce => bounce_out(t, b, c, d),
            Easing::InOutBounce => {
                if t < d / 2.0 {
                    (c - bounce_out(d - t * 2.0, 0.0, c, d)) * 0.5 + b
                } else {
                    bounce_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
                }
            }
        }
    }

    /// [`ease`](Self::ease) rounded to the nearest integer, the value ticks
    /// deliver to shapes
    pub fn ease_rounded(self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        self.ease(t, b, c, d).round()
    }

    /// Apply the easing to a normalized progress value (0.0 to 1.0)
    pub fn apply(self, progress: f64) -> f64 {
        self.ease(progress.clamp(0.0, 1.0), 0.0, 1.0, 1.0)
    }
}

fn bounce_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|easing| easing.as_str() == name)
            .ok_or_else(|| AnimationError::UnknownEasing(name.to_string()))
    }
}

impl TryFrom<String> for Easing {
    type Error = AnimationError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Easing> for &'static str {
    fn from(easing: Easing) -> Self {
        easing.as_str()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
