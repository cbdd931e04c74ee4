use std::str::FromStr;

use crate::{
    animation::ease::Ease,
    foundation::core::NodeId,
    foundation::error::{DrawoutError, DrawoutResult},
    options::model::Effect,
};

/// Start-time expression for a sub-animation.
///
/// Text form (see [`FromStr`]/[`Display`](std::fmt::Display)): `""` appends at the end,
/// `"2.5"` is absolute, `"+=x"`/`"-=x"` is relative to the current timeline end and
/// `"<+=x"`/`"<-=x"` is relative to the previous sub-animation's start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Append,
    At(f64),
    FromEnd(f64),
    FromPreviousStart(f64),
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn rel(d: f64) -> String {
            if d < 0.0 {
                format!("-={}", d.abs())
            } else {
                format!("+={d}")
            }
        }
        match *self {
            Self::Append => Ok(()),
            Self::At(s) => write!(f, "{s}"),
            Self::FromEnd(d) => f.write_str(&rel(d)),
            Self::FromPreviousStart(d) => write!(f, "<{}", rel(d)),
        }
    }
}

impl FromStr for Position {
    type Err = DrawoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DrawoutError::timeline(format!("invalid position expression '{s}'"));
        let number = |t: &str| -> DrawoutResult<f64> {
            let v = t.trim().parse::<f64>().map_err(|_| bad())?;
            if v.is_finite() { Ok(v) } else { Err(bad()) }
        };

        let t = s.trim();
        if t.is_empty() {
            return Ok(Self::Append);
        }
        let (from_prev, rest) = match t.strip_prefix('<') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, t),
        };
        let delta = if let Some(v) = rest.strip_prefix("+=") {
            Some(number(v)?)
        } else if let Some(v) = rest.strip_prefix("-=") {
            Some(-number(v)?)
        } else {
            None
        };

        match (from_prev, delta) {
            (true, Some(d)) => Ok(Self::FromPreviousStart(d)),
            (true, None) if rest.is_empty() => Ok(Self::FromPreviousStart(0.0)),
            (true, None) => Err(bad()),
            (false, Some(d)) => Ok(Self::FromEnd(d)),
            (false, None) => Ok(Self::At(number(rest)?)),
        }
    }
}

/// What a signed element offset is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetAnchor {
    /// Offset from the previous sub-animation's start.
    #[default]
    PreviousStart,
    /// Offset from the end of everything appended so far (`-=`/`+=` in tween engines).
    TimelineEnd,
}

impl OffsetAnchor {
    /// Position expression for a sub-animation that follows another by `offset` seconds.
    pub fn position(self, offset: f64) -> Position {
        match self {
            Self::PreviousStart => Position::FromPreviousStart(offset),
            Self::TimelineEnd => Position::FromEnd(offset),
        }
    }
}

impl FromStr for OffsetAnchor {
    type Err = DrawoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "previous-start" => Ok(Self::PreviousStart),
            "timeline-end" => Ok(Self::TimelineEnd),
            other => Err(DrawoutError::validation(format!(
                "unknown offset anchor '{other}' (expected 'previous-start' or 'timeline-end')"
            ))),
        }
    }
}

/// Style properties the sequencer reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProp {
    Opacity,
    StrokeDasharray,
    StrokeDashoffset,
}

impl StyleProp {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::StrokeDasharray => "stroke-dasharray",
            Self::StrokeDashoffset => "stroke-dashoffset",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    /// Dash/gap pair for `stroke-dasharray`.
    Dash([f64; 2]),
}

impl std::fmt::Display for StyleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Dash([a, b]) => write!(f, "{a} {b}"),
        }
    }
}

/// One style write: `target.style[prop] = value`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleAssignment {
    pub target: NodeId,
    pub prop: StyleProp,
    pub value: StyleValue,
}

impl StyleAssignment {
    pub fn new(target: NodeId, prop: StyleProp, value: StyleValue) -> Self {
        Self {
            target,
            prop,
            value,
        }
    }
}

/// Tween of one numeric style property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub target: NodeId,
    pub prop: StyleProp,
    pub from: f64,
    pub to: f64,
    /// Seconds; `0` jumps straight to `to`.
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(target: NodeId, prop: StyleProp, from: f64, to: f64, duration: f64) -> Self {
        Self {
            target,
            prop,
            from,
            to,
            duration,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> DrawoutResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(DrawoutError::timeline(format!(
                "tween duration must be finite and >= 0 (got {})",
                self.duration
            )));
        }
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(DrawoutError::timeline("tween endpoints must be finite"));
        }
        Ok(())
    }

    /// Linear progress in `[0, 1]` at `local` seconds after the tween starts.
    pub fn progress(&self, local: f64) -> f64 {
        if local < 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Eased property value at `local` seconds after the tween starts.
    pub fn value_at(&self, local: f64) -> f64 {
        let t = self.ease.apply(self.progress(local));
        self.from + (self.to - self.from) * t
    }

    pub fn assignment_at(&self, local: f64) -> StyleAssignment {
        StyleAssignment::new(self.target, self.prop, StyleValue::Number(self.value_at(local)))
    }
}

/// Timeline child: a tween plus the styles that hide its target until it starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubAnimation {
    /// Human-readable target description (`path#logo`, `rect[3]`).
    pub label: String,
    pub effect: Effect,
    pub tween: Tween,
    /// Requested start expression.
    pub position: Position,
    /// Resolved start in seconds from the timeline origin (delay excluded).
    pub start: f64,
    /// Styles written before playback.
    pub initial: Vec<StyleAssignment>,
}

impl SubAnimation {
    pub fn new(label: impl Into<String>, effect: Effect, tween: Tween) -> Self {
        Self {
            label: label.into(),
            effect,
            tween,
            position: Position::Append,
            start: 0.0,
            initial: Vec::new(),
        }
    }

    pub fn with_initial(mut self, initial: Vec<StyleAssignment>) -> Self {
        self.initial = initial;
        self
    }

    pub fn end(&self) -> f64 {
        self.start + self.tween.duration
    }

    /// Style writes for this child at `local` seconds from the timeline origin.
    fn sample_into(&self, local: f64, out: &mut Vec<StyleAssignment>) {
        if local < self.start {
            out.extend(self.initial.iter().cloned());
            return;
        }
        out.extend(
            self.initial
                .iter()
                .filter(|a| a.target != self.tween.target || a.prop != self.tween.prop)
                .cloned(),
        );
        out.push(self.tween.assignment_at(local - self.start));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Paused,
    Playing,
}

/// Ordered, pausable collection of sub-animations.
///
/// Children are only accepted while paused, so a playing timeline is always complete.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    delay: f64,
    state: PlayState,
    children: Vec<SubAnimation>,
}

impl Timeline {
    /// New paused timeline whose origin is `delay` seconds after playback begins.
    pub fn new(delay: f64) -> Self {
        Self {
            delay: if delay.is_finite() { delay.max(0.0) } else { 0.0 },
            state: PlayState::Paused,
            children: Vec::new(),
        }
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn children(&self) -> &[SubAnimation] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    /// End of the last child, in seconds from the origin.
    pub fn duration(&self) -> f64 {
        self.children
            .iter()
            .map(SubAnimation::end)
            .fold(0.0, f64::max)
    }

    /// Delay plus duration.
    pub fn total_duration(&self) -> f64 {
        self.delay + self.duration()
    }

    /// Append `sub` at `position` and return its resolved start.
    ///
    /// A start before the origin shifts every child later so the earliest start is `0`;
    /// the spacing between children is preserved.
    pub fn add(&mut self, mut sub: SubAnimation, position: Position) -> DrawoutResult<f64> {
        if self.state == PlayState::Playing {
            return Err(DrawoutError::timeline(
                "cannot append to a playing timeline",
            ));
        }
        sub.tween.validate()?;

        let end = self.duration();
        let prev_start = self.children.last().map_or(0.0, |c| c.start);
        let mut start = match position {
            Position::Append => end,
            Position::At(s) => s,
            Position::FromEnd(d) => end + d,
            Position::FromPreviousStart(d) => prev_start + d,
        };
        if !start.is_finite() {
            return Err(DrawoutError::timeline(format!(
                "position {position} resolves to a non-finite start"
            )));
        }
        if start < 0.0 {
            let shift = -start;
            for c in &mut self.children {
                c.start += shift;
            }
            start = 0.0;
        }

        sub.position = position;
        sub.start = start;
        self.children.push(sub);
        Ok(start)
    }

    /// Style writes for every child at `t` seconds after playback begins.
    ///
    /// Children that have not started report their initial (hidden) styles.
    pub fn sample(&self, t: f64) -> Vec<StyleAssignment> {
        let local = t - self.delay;
        let mut out = Vec::with_capacity(self.children.len() * 2);
        for c in &self.children {
            c.sample_into(local, &mut out);
        }
        out
    }

    /// Whether a playing timeline has run past its last child at time `t`.
    pub fn is_complete_at(&self, t: f64) -> bool {
        self.state == PlayState::Playing && t >= self.total_duration()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
