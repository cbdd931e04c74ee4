use crate::{foundation::core::NodeId, markup::document::Document};

/// Narrow view of the markup layer used by the sequencer.
///
/// Reads are snapshots: the sequencer never relies on a node changing between two calls.
/// Writes are limited to inline style properties.
pub trait MarkupQuery {
    /// Element whose `id` attribute equals `id`.
    fn find_container(&self, id: &str) -> Option<NodeId>;

    /// Descendants of `scope` whose local tag name is in `tags`, skipping elements that
    /// carry `exclude_class`. Document order.
    fn select_shapes(&self, scope: NodeId, tags: &[String], exclude_class: &str) -> Vec<NodeId>;

    /// Local tag name of an element (`"path"` for `svg:path`).
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Raw attribute value.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// `<g>` ancestors of `node` strictly inside `scope`, outermost first.
    fn ancestor_groups(&self, node: NodeId, scope: NodeId) -> Vec<NodeId>;

    /// Closest `<svg>` element at or above `node`.
    fn owner_svg(&self, node: NodeId) -> Option<NodeId>;

    /// Write one CSS property into the element's inline style.
    fn set_style(&mut self, node: NodeId, prop: &str, value: &str);

    /// Non-empty inline data value for a camelCase `key` (`toComplete` reads
    /// `data-to-complete`, falling back to the lowercased `data-tocomplete`).
    fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        let kebab = format!("data-{}", camel_to_kebab(key));
        let lower = format!("data-{}", key.to_ascii_lowercase());
        self.attribute(node, &kebab)
            .or_else(|| self.attribute(node, &lower))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

pub(crate) fn local_name(tag: &str) -> &str {
    tag.rsplit_once(':').map_or(tag, |(_, local)| local)
}

fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

impl MarkupQuery for Document {
    fn find_container(&self, id: &str) -> Option<NodeId> {
        self.find_by_id(id)
    }

    fn select_shapes(&self, scope: NodeId, tags: &[String], exclude_class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| {
                self.tag(n)
                    .is_some_and(|t| tags.iter().any(|want| want == local_name(t)))
            })
            .filter(|&n| exclude_class.is_empty() || !self.has_class(n, exclude_class))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tag(node).map(local_name)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attr(node, name)
    }

    fn ancestor_groups(&self, node: NodeId, scope: NodeId) -> Vec<NodeId> {
        let mut groups: Vec<NodeId> = self
            .ancestors(node)
            .take_while(|&a| a != scope)
            .filter(|&a| self.tag(a).map(local_name) == Some("g"))
            .collect();
        groups.reverse();
        groups
    }

    fn owner_svg(&self, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&n| self.tag(n).map(local_name) == Some("svg"))
    }

    fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        self.set_inline_style(node, prop, value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/query.rs"]
mod tests;
