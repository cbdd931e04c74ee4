use std::str::FromStr;

use crate::foundation::error::DrawoutError;

/// Easing curves that map normalized tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    InQuad,
    /// Default for reveals; matches the usual tween-engine default (`power1.out`).
    #[default]
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    /// Apply this curve to progress `t`, clamped to `[0, 1]`.
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
        }
    }
}

impl FromStr for Ease {
    type Err = DrawoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "none" => Self::Linear,
            "in-quad" | "power1.in" => Self::InQuad,
            "out-quad" | "power1.out" => Self::OutQuad,
            "in-out-quad" | "power1.inout" => Self::InOutQuad,
            "in-cubic" | "power2.in" => Self::InCubic,
            "out-cubic" | "power2.out" => Self::OutCubic,
            "in-out-cubic" | "power2.inout" => Self::InOutCubic,
            _ => {
                return Err(DrawoutError::validation(format!("unknown ease '{s}'")));
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
