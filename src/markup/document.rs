use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_till,
    character::complete::char,
    combinator::{map, value},
    multi::separated_list0,
    sequence::separated_pair,
};

use crate::{
    foundation::core::NodeId,
    foundation::error::{DrawoutError, DrawoutResult},
};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Clone, Debug, PartialEq)]
/// Element node: qualified tag name plus attributes in source order.
pub struct Element {
    /// Qualified tag name (`"path"`, `"svg"`, `"sodipodi:namedview"`).
    pub name: String,
    /// Qualified attribute names and raw values, namespace declarations first.
    pub attrs: Vec<(String, String)>,
}

impl Element {
    /// Raw value of attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace attribute `name`.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    /// Whitespace-separated `class` tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Payload of one document node.
pub enum NodeData {
    /// Element with attributes.
    Element(Element),
    /// Character data (text or CDATA), kept verbatim.
    Text(String),
}

#[derive(Clone, Debug)]
struct NodeEntry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned snapshot of a parsed SVG document.
///
/// Nodes live in an arena in document order, so [`NodeId`] order equals document order.
/// Comments and processing instructions are dropped on import.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeEntry>,
    root: NodeId,
}

impl Document {
    /// Parse SVG/XML text into an owned document.
    pub fn parse(text: &str) -> DrawoutResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| DrawoutError::markup(format!("parse svg: {e}")))?;

        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.import(xml.root_element(), None);
        Ok(doc)
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let id = self.push(NodeData::Element(element_from_xml(node)), parent);
        for child in node.children() {
            if child.is_element() {
                let c = self.import(child, Some(id));
                self.nodes[id.index()].children.push(c);
            } else if child.is_text() {
                let text = child.text().unwrap_or("").to_owned();
                let c = self.push(NodeData::Text(text), Some(id));
                self.nodes[id.index()].children.push(c);
            }
        }
        id
    }

    fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeEntry {
            data,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total node count (elements and text).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node payload, if `id` is in range.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index()).map(|n| &n.data)
    }

    /// Element payload, if `id` names an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.node(id)? {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.index())?.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Qualified tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    /// Raw attribute value of an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Insert or replace an attribute. No-op for text nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index())?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First element in document order whose `id` attribute equals `value`.
    pub fn find_by_id(&self, value: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.attr(n, "id") == Some(value))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.classes().any(|c| c == class))
    }

    /// Value of one property in the element's inline `style` attribute.
    pub fn inline_style(&self, id: NodeId, prop: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        parse_declarations(style)
            .into_iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v)
    }

    /// Set one property in the element's inline `style` attribute, keeping the others.
    pub fn set_inline_style(&mut self, id: NodeId, prop: &str, value: &str) {
        let mut decls = self
            .attr(id, "style")
            .map(parse_declarations)
            .unwrap_or_default();
        match decls.iter_mut().find(|(k, _)| k == prop) {
            Some(slot) => slot.1 = value.to_owned(),
            None => decls.push((prop.to_owned(), value.to_owned())),
        }
        let joined = decls
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr(id, "style", joined);
    }

    /// Serialize the document back to SVG text.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(self.nodes.len() * 32);
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let entry = &self.nodes[id.index()];
        match &entry.data {
            NodeData::Text(t) => escape_into(t, false, out),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (k, v) in &el.attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    escape_into(v, true, out);
                    out.push('"');
                }
                if entry.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &c in &entry.children {
                    self.write_node(c, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

fn element_from_xml(node: roxmltree::Node<'_, '_>) -> Element {
    let mut attrs = Vec::new();

    // Declare only namespaces that are new relative to the parent element.
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.uri() == XML_NS || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_owned(),
        };
        attrs.push((key, ns.uri().to_owned()));
    }

    for a in node.attributes() {
        attrs.push((qualified(node, a.namespace(), a.name()), a.value().to_owned()));
    }

    let tag = node.tag_name();
    Element {
        name: qualified(node, tag.namespace(), tag.name()),
        attrs,
    }
}

fn qualified(node: roxmltree::Node<'_, '_>, ns: Option<&str>, local: &str) -> String {
    match ns {
        None => local.to_owned(),
        Some(XML_NS) => format!("xml:{local}"),
        Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
            _ => local.to_owned(),
        },
    }
}

/// `name: value` pairs of an inline `style`; items without a colon or a name are skipped.
fn parse_declarations(style: &str) -> Vec<(String, String)> {
    fn item(input: &str) -> IResult<&str, Option<(&str, &str)>> {
        alt((
            map(
                separated_pair(
                    take_till(|c: char| c == ':' || c == ';'),
                    char(':'),
                    take_till(|c: char| c == ';'),
                ),
                Some,
            ),
            value(None, take_till(|c: char| c == ';')),
        ))(input)
    }

    separated_list0(char(';'), item)(style)
        .map_or_else(|_| Vec::new(), |(_, items)| items)
        .into_iter()
        .flatten()
        .filter_map(|(k, v)| {
            let k = k.trim();
            (!k.is_empty()).then(|| (k.to_owned(), v.trim().to_owned()))
        })
        .collect()
}

fn escape_into(s: &str, attr: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/document.rs"]
mod tests;
