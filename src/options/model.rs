use std::str::FromStr;

use crate::{
    foundation::core::NodeId,
    foundation::error::{DrawoutError, DrawoutResult},
    markup::query::MarkupQuery,
};

/// Reveal effect applied to a shape.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    /// Stroke draw: dash offset tweened from the outline length to zero.
    #[default]
    Draw,
    /// Opacity tweened from 0 to 1.
    FadeIn,
}

impl FromStr for Effect {
    type Err = DrawoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match norm.as_str() {
            "draw" => Ok(Self::Draw),
            "fadein" => Ok(Self::FadeIn),
            _ => Err(DrawoutError::validation(format!(
                "unknown effect '{s}' (expected 'draw' or 'fadeIn')"
            ))),
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Draw => "draw",
            Self::FadeIn => "fadeIn",
        })
    }
}

/// Fully populated options for one shape (or for the container level).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionSet {
    /// Seconds per element. `0` reveals instantly.
    pub speed: f64,
    /// Seconds before the timeline starts.
    pub delay: f64,
    /// Signed seconds between consecutive reveals; negative overlaps.
    pub offset: f64,
    /// Total seconds across all elements; overrides `speed` at the container level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_complete: Option<f64>,
    pub effect: Effect,
}

impl OptionSet {
    /// Library defaults, the bottom of every layer chain.
    pub const LIBRARY_DEFAULTS: Self = Self {
        speed: 0.5,
        delay: 0.0,
        offset: -0.8,
        to_complete: None,
        effect: Effect::Draw,
    };

    /// Copy of `self` with every field that `layer` defines replaced.
    pub fn overlay(self, layer: &PartialOptions) -> Self {
        Self {
            speed: layer.speed.unwrap_or(self.speed),
            delay: layer.delay.unwrap_or(self.delay),
            offset: layer.offset.unwrap_or(self.offset),
            to_complete: layer.to_complete.or(self.to_complete),
            effect: layer.effect.unwrap_or(self.effect),
        }
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::LIBRARY_DEFAULTS
    }
}

/// One configuration layer; `None` fields defer to lower layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_complete: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

impl PartialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(mut self, secs: f64) -> Self {
        self.speed = Some(secs);
        self
    }

    pub fn with_delay(mut self, secs: f64) -> Self {
        self.delay = Some(secs);
        self
    }

    pub fn with_offset(mut self, secs: f64) -> Self {
        self.offset = Some(secs);
        self
    }

    pub fn with_to_complete(mut self, secs: f64) -> Self {
        self.to_complete = Some(secs);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check value ranges: `speed >= 0`, `delay >= 0`, `to_complete > 0`, all finite.
    pub fn validate(&self) -> DrawoutResult<()> {
        for (name, value) in self.numeric_fields() {
            if let Some(v) = value {
                check_range(name, v)?;
            }
        }
        Ok(())
    }

    /// Read a layer from the node's inline `data-*` attributes.
    ///
    /// Malformed or out-of-range values are dropped so the field falls through to lower
    /// layers.
    pub fn from_data<M: MarkupQuery + ?Sized>(markup: &M, node: NodeId) -> Self {
        let number = |key: &'static str| -> Option<f64> {
            let raw = markup.data(node, key)?;
            let parsed = raw
                .parse::<f64>()
                .map_err(|_| DrawoutError::validation(format!("'{raw}' is not a number")))
                .and_then(|v| check_range(key, v).map(|()| v));
            match parsed {
                Ok(v) => Some(v),
                Err(err) => {
                    tracing::debug!(%node, key, %err, "ignoring inline data value");
                    None
                }
            }
        };

        let effect = markup
            .data(node, "effect")
            .and_then(|raw| match raw.parse::<Effect>() {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::debug!(%node, %err, "ignoring inline data value");
                    None
                }
            });

        Self {
            speed: number("speed"),
            delay: number("delay"),
            offset: number("offset"),
            to_complete: number("toComplete"),
            effect,
        }
    }

    fn numeric_fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("speed", self.speed),
            ("delay", self.delay),
            ("offset", self.offset),
            ("toComplete", self.to_complete),
        ]
    }
}

fn check_range(name: &str, v: f64) -> DrawoutResult<()> {
    if !v.is_finite() {
        return Err(DrawoutError::validation(format!("{name} must be finite")));
    }
    match name {
        "speed" | "delay" if v < 0.0 => Err(DrawoutError::validation(format!(
            "{name} must be >= 0 (got {v})"
        ))),
        "toComplete" if v <= 0.0 => Err(DrawoutError::validation(format!(
            "toComplete must be > 0 (got {v})"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/model.rs"]
mod tests;
