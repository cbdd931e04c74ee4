//! drawout sequences stroke-draw and fade-in reveals across the shapes of an SVG drawing.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: SVG text -> [`Document`] (owned snapshot, stable [`NodeId`]s in document order)
//! 2. **Resolve**: config defaults < owning `<svg>` data < call-site [`PartialOptions`] <
//!    container data < group data < element data -> one [`OptionSet`] per shape
//! 3. **Schedule**: shapes + options -> [`Timeline`] of [`SubAnimation`]s, measured with
//!    [`measure`] for the draw effect
//! 4. **Sample** (optional): [`Sequence::sample`] / [`styled_at`] / [`render_frame`] at any time
//!
//! [`SvgController::init_svg`] runs steps 2 and 3 for one container and owns the per-container
//! one-time reveal flag.
//!
//! ```no_run
//! use drawout::{Document, PartialOptions, SvgController};
//!
//! let doc = Document::parse(&std::fs::read_to_string("logo.svg")?)?;
//! let mut controller = SvgController::default();
//! let seq = controller.init_svg(&doc, "logo", PartialOptions::new().with_to_complete(4.0))?;
//! println!("{} reveals over {:.2}s", seq.timeline.len(), seq.duration());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod geometry;
mod markup;
mod options;
mod render;
mod schedule;

pub use animation::ease::Ease;
pub use animation::timeline::{
    OffsetAnchor, PlayState, Position, StyleAssignment, StyleProp, StyleValue, SubAnimation,
    Timeline, Tween,
};
pub use foundation::core::{BezPath, NodeId, Point};
pub use foundation::error::{DrawoutError, DrawoutResult};
pub use geometry::measure::{FALLBACK_LENGTH, PATH_ACCURACY, measure, outline_length};
pub use geometry::shape::{ShapeGeometry, ShapeKind, parse_points};
pub use markup::document::{Descendants, Document, Element, NodeData};
pub use markup::query::MarkupQuery;
pub use options::model::{Effect, OptionSet, PartialOptions};
pub use options::resolve::{apply_to_complete, resolve, resolve_over};
pub use render::frame::{FrameRGBA, RenderSettings, render_frame, styled_at, write_png};
pub use schedule::config::SequencerConfig;
pub use schedule::controller::{ContainerState, Sequence, SvgController};
pub use schedule::scheduler::EffectScheduler;
