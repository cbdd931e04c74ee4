use std::collections::{HashMap, HashSet};

use crate::{
    animation::timeline::{StyleAssignment, StyleProp, Timeline, Tween},
    foundation::core::NodeId,
    foundation::error::{DrawoutError, DrawoutResult},
    markup::query::MarkupQuery,
    options::model::{OptionSet, PartialOptions},
    options::resolve::{apply_to_complete, resolve_over},
    schedule::config::SequencerConfig,
    schedule::scheduler::EffectScheduler,
};

/// Lifecycle of one container id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerState {
    #[default]
    Uninitialized,
    /// Options are being resolved.
    Configuring,
    /// Reveals are being appended.
    Building,
    /// Timeline started.
    Playing,
    /// The host reported the end of playback.
    Complete,
}

/// Result of one [`SvgController::init_svg`] call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    pub container_id: String,
    /// `None` when no element carries `container_id`.
    pub container: Option<NodeId>,
    /// Container-level options after `to_complete` was applied.
    pub options: OptionSet,
    pub shape_count: usize,
    /// One-time opacity reveal of the owning `<svg>`; only on the first call per container.
    pub reveal: Option<Tween>,
    pub timeline: Timeline,
}

impl Sequence {
    /// Seconds until every tween, including the container reveal, has finished.
    pub fn duration(&self) -> f64 {
        let reveal = self.reveal.as_ref().map_or(0.0, |t| t.duration);
        self.timeline.total_duration().max(reveal)
    }

    /// Style writes at `t` seconds after playback begins.
    pub fn sample(&self, t: f64) -> Vec<StyleAssignment> {
        let mut out: Vec<StyleAssignment> =
            self.reveal.iter().map(|r| r.assignment_at(t)).collect();
        out.extend(self.timeline.sample(t));
        out
    }

    /// Write the styles at `t` into `markup`.
    pub fn apply_at<M: MarkupQuery + ?Sized>(&self, markup: &mut M, t: f64) {
        for a in self.sample(t) {
            markup.set_style(a.target, a.prop.css_name(), &a.value.to_string());
        }
    }
}

/// Entry point: owns the per-container reveal flags and lifecycle states.
#[derive(Debug, Default)]
pub struct SvgController {
    config: SequencerConfig,
    revealed: HashSet<String>,
    states: HashMap<String, ContainerState>,
}

impl SvgController {
    pub fn new(config: SequencerConfig) -> Self {
        Self {
            config,
            revealed: HashSet::new(),
            states: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn state(&self, container_id: &str) -> ContainerState {
        self.states
            .get(container_id)
            .copied()
            .unwrap_or_default()
    }

    /// Whether the one-time container reveal was already produced for `container_id`.
    pub fn is_revealed(&self, container_id: &str) -> bool {
        self.revealed.contains(container_id)
    }

    /// Record that playback of `container_id` finished.
    pub fn mark_complete(&mut self, container_id: &str) -> DrawoutResult<()> {
        match self.state(container_id) {
            ContainerState::Playing => {
                self.states
                    .insert(container_id.to_owned(), ContainerState::Complete);
                Ok(())
            }
            other => Err(DrawoutError::validation(format!(
                "container '{container_id}' is {other:?}, not playing"
            ))),
        }
    }

    /// Resolve options, schedule every shape under `container_id` and start the timeline.
    ///
    /// Layering: config defaults < owning `<svg>` inline attributes < `args` < container
    /// inline attributes; groups and elements are layered per shape by the scheduler.
    /// Only invalid `args` fail. A missing container yields an empty playing timeline.
    #[tracing::instrument(skip(self, markup, args))]
    pub fn init_svg<M: MarkupQuery + ?Sized>(
        &mut self,
        markup: &M,
        container_id: &str,
        args: PartialOptions,
    ) -> DrawoutResult<Sequence> {
        args.validate()?;
        self.set_state(container_id, ContainerState::Configuring);

        let container = markup.find_container(container_id);
        if container.is_none() {
            tracing::warn!(container_id, "container not found, scheduling no shapes");
        }
        let owner_svg = container.and_then(|c| markup.owner_svg(c));

        let reveal = if self.revealed.insert(container_id.to_owned()) {
            owner_svg.map(|svg| {
                Tween::new(svg, StyleProp::Opacity, 0.0, 1.0, self.config.reveal_secs)
                    .with_ease(self.config.ease)
            })
        } else {
            None
        };

        let shapes = container
            .map(|c| {
                markup.select_shapes(c, &self.config.shapes, &self.config.exclude_class)
            })
            .unwrap_or_default();

        let mut layers = Vec::with_capacity(3);
        if let Some(svg) = owner_svg.filter(|&s| Some(s) != container) {
            layers.push(PartialOptions::from_data(markup, svg));
        }
        layers.push(args);
        if let Some(c) = container {
            layers.push(PartialOptions::from_data(markup, c));
        }
        let options = apply_to_complete(resolve_over(&self.config.defaults, &layers), shapes.len());
        tracing::debug!(shapes = shapes.len(), ?options, "resolved container options");

        self.set_state(container_id, ContainerState::Building);
        let timeline = match container {
            Some(scope) => EffectScheduler::new(markup)
                .with_anchor(self.config.anchor)
                .with_ease(self.config.ease)
                .schedule(scope, &shapes, &options),
            None => {
                let mut empty = Timeline::new(options.delay);
                empty.play();
                empty
            }
        };
        self.set_state(container_id, ContainerState::Playing);

        Ok(Sequence {
            container_id: container_id.to_owned(),
            container,
            options,
            shape_count: shapes.len(),
            reveal,
            timeline,
        })
    }

    fn set_state(&mut self, container_id: &str, state: ContainerState) {
        self.states.insert(container_id.to_owned(), state);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/controller.rs"]
mod tests;
