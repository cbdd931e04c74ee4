use crate::options::model::{OptionSet, PartialOptions};

/// Fold `layers` over the library defaults; for each field the last layer that defines it
/// wins.
pub fn resolve(layers: &[PartialOptions]) -> OptionSet {
    resolve_over(&OptionSet::LIBRARY_DEFAULTS, layers)
}

/// Fold `layers` over an explicit `base`.
pub fn resolve_over(base: &OptionSet, layers: &[PartialOptions]) -> OptionSet {
    layers.iter().fold(*base, |acc, layer| acc.overlay(layer))
}

/// Spread `to_complete` evenly over `shape_count` shapes: `speed = to_complete / count`.
///
/// Applied once at the container level. With no shapes there is nothing to spread and
/// `options` is returned unchanged.
pub fn apply_to_complete(options: OptionSet, shape_count: usize) -> OptionSet {
    match options.to_complete {
        Some(total) if shape_count > 0 => OptionSet {
            speed: total / shape_count as f64,
            ..options
        },
        _ => options,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/resolve.rs"]
mod tests;
