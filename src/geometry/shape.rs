use crate::{
    foundation::core::{NodeId, Point},
    foundation::error::{DrawoutError, DrawoutResult},
    foundation::math::{parse_number_list, parse_number_or_nan},
    markup::query::MarkupQuery,
};

/// Outline kinds the measurer knows how to traverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Path,
    Rect,
    Polygon,
    Polyline,
}

impl ShapeKind {
    /// Every supported kind, in the default selector order.
    pub const ALL: [ShapeKind; 6] = [
        Self::Line,
        Self::Circle,
        Self::Path,
        Self::Rect,
        Self::Polygon,
        Self::Polyline,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "line" => Self::Line,
            "circle" => Self::Circle,
            "path" => Self::Path,
            "rect" => Self::Rect,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            _ => return None,
        })
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
        }
    }
}

/// Kind-specific geometry read from a shape's attributes.
///
/// Missing or unparsable numbers are kept as NaN; the measurer turns a non-finite result
/// into its fallback length.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Line { from: Point, to: Point },
    Circle { r: f64 },
    Rect { width: f64, height: f64 },
    /// Closed point loop.
    Polygon { points: Vec<Point> },
    /// Open point chain.
    Polyline { points: Vec<Point> },
    /// Raw path data (`d` attribute).
    Path { data: String },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line { .. } => ShapeKind::Line,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::Polyline { .. } => ShapeKind::Polyline,
            Self::Path { .. } => ShapeKind::Path,
        }
    }

    /// Read the geometry of `node`.
    ///
    /// Fails with [`DrawoutError::UnsupportedShape`] when the tag is not one of
    /// [`ShapeKind::ALL`].
    pub fn read<M: MarkupQuery + ?Sized>(markup: &M, node: NodeId) -> DrawoutResult<Self> {
        let tag = markup.tag_name(node).unwrap_or("#text");
        let kind =
            ShapeKind::from_tag(tag).ok_or_else(|| DrawoutError::unsupported_shape(tag))?;
        let num = |name: &str| parse_number_or_nan(markup.attribute(node, name));

        Ok(match kind {
            ShapeKind::Line => Self::Line {
                from: Point::new(num("x1"), num("y1")),
                to: Point::new(num("x2"), num("y2")),
            },
            ShapeKind::Circle => Self::Circle { r: num("r") },
            ShapeKind::Rect => Self::Rect {
                width: num("width"),
                height: num("height"),
            },
            ShapeKind::Polygon => Self::Polygon {
                points: parse_points(markup.attribute(node, "points").unwrap_or("")),
            },
            ShapeKind::Polyline => Self::Polyline {
                points: parse_points(markup.attribute(node, "points").unwrap_or("")),
            },
            ShapeKind::Path => Self::Path {
                data: markup.attribute(node, "d").unwrap_or("").to_owned(),
            },
        })
    }
}

/// Parse an SVG point list.
///
/// Coordinates are paired in order regardless of how commas and whitespace group them, and
/// may abut when the next one starts with a sign or a dot (`"3-4"` is `(3, -4)`). Parsing
/// stops at the first thing that is not a number; a trailing unpaired coordinate is
/// dropped.
pub fn parse_points(list: &str) -> Vec<Point> {
    parse_number_list(list)
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
