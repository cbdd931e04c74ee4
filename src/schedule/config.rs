use crate::{
    animation::ease::Ease,
    animation::timeline::OffsetAnchor,
    foundation::error::{DrawoutError, DrawoutResult},
    geometry::shape::ShapeKind,
    options::model::{OptionSet, PartialOptions},
};

/// Sequencer-wide settings. Every field has a default, so a JSON config only needs the
/// keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Bottom layer of every option chain.
    pub defaults: OptionSet,
    /// Local tag names selected as shapes. Tags without a length function can still fade.
    pub shapes: Vec<String>,
    /// Shapes carrying this class are left alone. Empty disables the filter.
    pub exclude_class: String,
    /// Duration of the one-time container reveal.
    pub reveal_secs: f64,
    pub anchor: OffsetAnchor,
    pub ease: Ease,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            defaults: OptionSet::LIBRARY_DEFAULTS,
            shapes: ShapeKind::ALL.iter().map(|k| k.tag().to_owned()).collect(),
            exclude_class: "exclude".to_owned(),
            reveal_secs: 2.0,
            anchor: OffsetAnchor::default(),
            ease: Ease::default(),
        }
    }
}

impl SequencerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> DrawoutResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| DrawoutError::serde(format!("parse sequencer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DrawoutResult<()> {
        let d = &self.defaults;
        PartialOptions {
            speed: Some(d.speed),
            delay: Some(d.delay),
            offset: Some(d.offset),
            to_complete: d.to_complete,
            effect: Some(d.effect),
        }
        .validate()?;

        if !self.reveal_secs.is_finite() || self.reveal_secs < 0.0 {
            return Err(DrawoutError::validation(format!(
                "reveal_secs must be finite and >= 0 (got {})",
                self.reveal_secs
            )));
        }
        if self.shapes.iter().any(|s| s.trim().is_empty()) {
            return Err(DrawoutError::validation("shape tag names must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/config.rs"]
mod tests;
