use crate::{
    animation::ease::Ease,
    animation::timeline::{
        OffsetAnchor, Position, StyleAssignment, StyleProp, StyleValue, SubAnimation, Timeline,
        Tween,
    },
    foundation::core::NodeId,
    foundation::error::DrawoutResult,
    geometry::measure::measure,
    geometry::shape::ShapeGeometry,
    markup::query::MarkupQuery,
    options::model::{Effect, OptionSet, PartialOptions},
    options::resolve::resolve_over,
};

/// Builds one reveal timeline over an ordered run of shapes.
pub struct EffectScheduler<'a, M: MarkupQuery + ?Sized> {
    markup: &'a M,
    anchor: OffsetAnchor,
    ease: Ease,
}

impl<'a, M: MarkupQuery + ?Sized> EffectScheduler<'a, M> {
    pub fn new(markup: &'a M) -> Self {
        Self {
            markup,
            anchor: OffsetAnchor::default(),
            ease: Ease::default(),
        }
    }

    pub fn with_anchor(mut self, anchor: OffsetAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Effective options for `shape`: `base` < groups inside `scope` (outermost first) <
    /// the shape's own inline attributes.
    pub fn shape_options(&self, scope: NodeId, shape: NodeId, base: &OptionSet) -> OptionSet {
        let mut layers: Vec<PartialOptions> = self
            .markup
            .ancestor_groups(shape, scope)
            .into_iter()
            .map(|g| PartialOptions::from_data(self.markup, g))
            .collect();
        layers.push(PartialOptions::from_data(self.markup, shape));
        resolve_over(base, &layers)
    }

    /// Append one reveal per shape, in order, then start the timeline.
    ///
    /// The first appended reveal starts at the origin; each later one is placed by its
    /// resolved offset. A shape whose reveal cannot be built is skipped on its own.
    #[tracing::instrument(skip_all, fields(shapes = shapes.len()))]
    pub fn schedule(&self, scope: NodeId, shapes: &[NodeId], base: &OptionSet) -> Timeline {
        let mut timeline = Timeline::new(base.delay);

        for (index, &shape) in shapes.iter().enumerate() {
            let opts = self.shape_options(scope, shape, base);
            let sub = match self.reveal(index, shape, &opts) {
                Ok(sub) => sub,
                Err(err) => {
                    tracing::warn!(index, %shape, %err, "skipping shape reveal");
                    continue;
                }
            };

            let position = if timeline.is_empty() {
                Position::At(0.0)
            } else {
                self.anchor.position(opts.offset)
            };
            match timeline.add(sub, position) {
                Ok(start) => tracing::debug!(
                    index,
                    %shape,
                    effect = %opts.effect,
                    speed = opts.speed,
                    %position,
                    start,
                    "scheduled reveal"
                ),
                Err(err) => tracing::warn!(index, %shape, %err, "skipping shape reveal"),
            }
        }

        timeline.play();
        timeline
    }

    fn reveal(&self, index: usize, shape: NodeId, opts: &OptionSet) -> DrawoutResult<SubAnimation> {
        let label = self.label(index, shape);
        match opts.effect {
            Effect::Draw => {
                let geometry = ShapeGeometry::read(self.markup, shape)?;
                let length = measure(&geometry);
                let tween = Tween::new(shape, StyleProp::StrokeDashoffset, length, 0.0, opts.speed)
                    .with_ease(self.ease);
                Ok(SubAnimation::new(label, Effect::Draw, tween).with_initial(vec![
                    StyleAssignment::new(
                        shape,
                        StyleProp::StrokeDasharray,
                        StyleValue::Dash([length, length]),
                    ),
                    StyleAssignment::new(
                        shape,
                        StyleProp::StrokeDashoffset,
                        StyleValue::Number(length),
                    ),
                ]))
            }
            Effect::FadeIn => {
                let tween = Tween::new(shape, StyleProp::Opacity, 0.0, 1.0, opts.speed)
                    .with_ease(self.ease);
                Ok(
                    SubAnimation::new(label, Effect::FadeIn, tween).with_initial(vec![
                        StyleAssignment::new(shape, StyleProp::Opacity, StyleValue::Number(0.0)),
                    ]),
                )
            }
        }
    }

    fn label(&self, index: usize, shape: NodeId) -> String {
        let tag = self.markup.tag_name(shape).unwrap_or("node");
        match self.markup.attribute(shape, "id") {
            Some(id) => format!("{tag}#{id}"),
            None => format!("{tag}[{index}]"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
