use kurbo::Shape as _;

use crate::{
    foundation::core::{BezPath, Point},
    geometry::shape::ShapeGeometry,
};

/// Length substituted when an outline cannot be measured, so the draw reveal still shows a
/// visible stroke animation.
pub const FALLBACK_LENGTH: f64 = 200.0;

/// Arclength accuracy for path data.
pub const PATH_ACCURACY: f64 = 1e-3;

/// Raw outline length. May be NaN or infinite for degenerate input.
pub fn outline_length(geom: &ShapeGeometry) -> f64 {
    match geom {
        ShapeGeometry::Line { from, to } => from.distance(*to),
        ShapeGeometry::Circle { r } => 2.0 * std::f64::consts::PI * r,
        ShapeGeometry::Rect { width, height } => 2.0 * (width + height),
        ShapeGeometry::Polygon { points } => chain_length(points, true),
        ShapeGeometry::Polyline { points } => chain_length(points, false),
        ShapeGeometry::Path { data } => match BezPath::from_svg(data) {
            Ok(path) => path.perimeter(PATH_ACCURACY),
            Err(err) => {
                tracing::debug!(%err, "path data did not parse");
                f64::NAN
            }
        },
    }
}

/// Outline length used by the draw reveal; always finite and `>= 0`.
pub fn measure(geom: &ShapeGeometry) -> f64 {
    let raw = outline_length(geom);
    if raw.is_finite() && raw >= 0.0 {
        return raw;
    }
    tracing::debug!(kind = ?geom.kind(), raw, "outline not measurable, using fallback length");
    FALLBACK_LENGTH
}

fn chain_length(points: &[Point], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(first), Some(last)) => open + last.distance(*first),
        _ => open,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/measure.rs"]
mod tests;
